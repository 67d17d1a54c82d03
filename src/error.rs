//! The ways a simulation request can be malformed.

use thiserror::Error;

/// A rejected input.  Every operation that can fail checks its
/// arguments before touching any state, so an `Err` always leaves the
/// simulation exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A lattice side is outside the supported range.
    #[error("invalid argument: lattice {nx}x{ny} must have sides in [{min}, {max}]")]
    InvalidDimensions {
        /// Requested number of rows.
        nx: usize,
        /// Requested number of columns.
        ny: usize,
        /// Smallest allowed side.
        min: usize,
        /// Largest allowed side.
        max: usize,
    },
    /// β must be strictly positive and finite.
    #[error("invalid argument: inverse temperature {0} must be positive and finite")]
    InvalidInverseTemperature(f64),
    /// T must be strictly positive and finite.
    #[error("invalid argument: temperature {0} must be positive and finite")]
    InvalidTemperature(f64),
    /// We never run zero sweeps.
    #[error("invalid argument: sweep count must be at least 1")]
    InvalidSweepCount,
    /// A site index past the end of the lattice.
    #[error("invalid argument: site {site} is not among the {num_sites} sites")]
    InvalidSite {
        /// The requested site.
        site: usize,
        /// How many sites the lattice has.
        num_sites: usize,
    },
    /// A hand-built lattice does not hold `nx*ny` spins of ±1.
    #[error("invalid argument: {0}")]
    InvalidLattice(String),
}

#[test]
fn messages_name_the_argument() {
    let e = Error::InvalidDimensions { nx: 2, ny: 7, min: 3, max: 400 };
    assert_eq!(format!("{}", e),
               "invalid argument: lattice 2x7 must have sides in [3, 400]");
    assert!(format!("{}", Error::InvalidTemperature(-1.0)).contains("-1"));
}
