//! Boltzmann factors for a single spin flip.
//!
//! Flipping one spin with four ±1 neighbors changes the energy by
//! `2·spin·Σ neighbors`, so the only uphill moves cost 4 or 8.  We
//! precompute `exp(-4β)` and `exp(-8β)` once per temperature.

use crate::error::Error;

/// The acceptance probabilities for the two possible uphill moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcceptanceTable {
    beta: f64,
    factors: [f64; 2],
}

impl AcceptanceTable {
    /// Build the table for inverse temperature `beta`.
    pub fn new(beta: f64) -> Result<AcceptanceTable, Error> {
        if !(beta > 0.0 && beta.is_finite()) {
            return Err(Error::InvalidInverseTemperature(beta));
        }
        Ok(AcceptanceTable {
            beta,
            factors: [(-4.0 * beta).exp(), (-8.0 * beta).exp()],
        })
    }

    /// The inverse temperature this table was built for.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// `exp(-β·ΔE)` for an uphill move, which must have `ΔE` of 4 or 8.
    #[inline]
    pub fn factor(&self, delta_e: i32) -> f64 {
        debug_assert!(delta_e == 4 || delta_e == 8, "impossible uphill move {}", delta_e);
        if delta_e == 4 {
            self.factors[0]
        } else {
            self.factors[1]
        }
    }
}

#[test]
fn factors_match_boltzmann() {
    let beta = 1.0 / 2.2692;
    let t = AcceptanceTable::new(beta).unwrap();
    assert_eq!(t.factor(4), (-4.0 * beta).exp());
    assert_eq!(t.factor(8), (-8.0 * beta).exp());
    assert!(t.factor(8) < t.factor(4));
    assert!(t.factor(4) < 1.0 && t.factor(8) > 0.0);
}

#[test]
fn same_beta_same_table() {
    assert_eq!(AcceptanceTable::new(0.7).unwrap(), AcceptanceTable::new(0.7).unwrap());
    assert_ne!(AcceptanceTable::new(0.7).unwrap(), AcceptanceTable::new(0.8).unwrap());
}

#[test]
fn nonsense_beta_is_rejected() {
    for &b in &[0.0, -1.0, std::f64::NAN, std::f64::INFINITY] {
        assert!(AcceptanceTable::new(b).is_err());
    }
}
