//! Monte Carlo for the Ising model, and the machinery for driving it.

pub mod acceptance;
pub mod metropolis;
pub mod report;
pub mod scan;

/// The version of the code that produced a run.
pub const VERSION: &str = git_version::git_version!(args = ["--always", "--dirty"],
                                                    fallback = "unknown");
