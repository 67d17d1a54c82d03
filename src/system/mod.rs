//! The physical model: a lattice of spins, who neighbors whom, and
//! how much energy each site carries.

use super::error::Error;

pub mod ising;
pub mod lattice;

/// An energy, in units of the coupling constant J.
pub type Energy = f64;

/// A spin, always +1 or -1.
pub type Spin = i8;

/// The smallest lattice side we allow.  With fewer than three sites a
/// site would see the same neighbor from both directions.
pub const MIN_SIDE: usize = 3;

/// The largest lattice side we allow.
pub const MAX_SIDE: usize = 400;

/// Check that a lattice of `nx` by `ny` sites is one we support.
pub fn check_dimensions(nx: usize, ny: usize) -> Result<(), Error> {
    let ok = |n: usize| n >= MIN_SIDE && n <= MAX_SIDE;
    if ok(nx) && ok(ny) {
        Ok(())
    } else {
        Err(Error::InvalidDimensions { nx, ny, min: MIN_SIDE, max: MAX_SIDE })
    }
}

#[test]
fn dimension_bounds() {
    assert!(check_dimensions(3, 3).is_ok());
    assert!(check_dimensions(400, 3).is_ok());
    assert!(check_dimensions(2, 10).is_err());
    assert!(check_dimensions(10, 401).is_err());
    assert!(check_dimensions(0, 0).is_err());
}
