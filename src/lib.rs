//! This crate simulates the square-lattice Ising model with
//! single-spin-flip Metropolis Monte Carlo.

#![cfg_attr(feature = "strict", deny(warnings))]
#![deny(missing_docs)]

#[macro_use]
extern crate serde_derive;

pub mod atomicfile;
pub mod error;
pub mod mc;
pub mod observe;
pub mod prettyfloat;
pub mod rng;
pub mod system;

pub use crate::error::Error;
