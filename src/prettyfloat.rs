//! A `%g`-like formatter for the numbers we print in reports.

use std::fmt::{Display, Formatter, Result};

/// Wrap this type around an `f64` in order to print it nicely: the
/// shortest of the plain, fixed-precision and scientific renderings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrettyFloat(pub f64);

/// Convenience for `PrettyFloat(x)`.
pub trait Pretty {
    /// Wrap for pretty printing.
    fn pretty(self) -> PrettyFloat;
}

impl Pretty for f64 {
    fn pretty(self) -> PrettyFloat {
        PrettyFloat(self)
    }
}

/// The number of decimals needed to show `digits` significant digits.
fn n_decimals(value: f64, digits: usize) -> usize {
    let log10 = value.abs().log10();
    if log10 > digits as f64 {
        0
    } else {
        std::cmp::min((digits as f64 - log10) as usize + 1, 330)
    }
}

fn shortest(candidates: Vec<String>) -> String {
    // min_by_key keeps the first of equally short strings, so the
    // plain rendering wins ties.
    candidates.into_iter().min_by_key(|s| s.len()).unwrap_or_default()
}

impl Display for PrettyFloat {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let x = self.0;
        if x == 0.0 || !x.is_finite() {
            return write!(f, "{}", x);
        }
        let mut candidates = vec![format!("{}", x), format!("{:e}", x)];
        if let Some(precision) = f.precision() {
            candidates.push(format!("{:.*}", n_decimals(x, precision), x));
            candidates.push(format!("{:.*e}", precision, x));
        }
        f.write_str(&shortest(candidates))
    }
}

#[test]
fn short_representation_with_prec() {
    for &prec in &[1, 3, 6, 16] {
        for &f in &[0.1_f64, 1e-100, 0.1111111111111111, 2.2692, 12345.678] {
            shortest_with_prec(f, prec);
        }
    }
}

#[cfg(test)]
fn shortest_with_prec(f: f64, prec: usize) {
    use std::str::FromStr;
    let pretty = format!("{:.*}", prec, PrettyFloat(f));
    println!("{:.prec$} {}", f, pretty, prec = prec);
    assert!(pretty.len() <= format!("{:.*e}", prec, f).len());
    let back = f64::from_str(&pretty).expect("pretty output should parse");
    assert!(((back - f) / f).abs() < 10_f64.powf(-(prec as f64)));
}

#[test]
fn short_representation() {
    use std::str::FromStr;
    for &f in &[0.1_f64, 1e-100, 0.1111111111111111, -4.0] {
        let pretty = format!("{}", f.pretty());
        assert!(pretty.len() <= format!("{}", f).len());
        assert!(pretty.len() <= format!("{:e}", f).len());
        assert_eq!(f64::from_str(&pretty), Ok(f));
    }
}

#[test]
fn zero_and_friends() {
    assert_eq!(format!("{:.3}", PrettyFloat(0.0)), "0");
    assert_eq!(format!("{}", PrettyFloat(std::f64::INFINITY)), "inf");
}
