//! Run independent simulations over a range of temperatures.
//!
//! Each temperature gets its own engine with its own random stream,
//! so the points can run on separate threads without sharing anything.

use crate::error::Error;
use crate::mc::metropolis::{Metropolis, MetropolisParams};
use crate::observe::{Accumulator, Summary};
use crate::system::ising::IsingParams;

use auto_args::AutoArgs;
use rayon::prelude::*;

/// The parameters needed to configure a temperature scan.
#[derive(AutoArgs, Debug, Clone, PartialEq)]
pub struct ScanParams {
    /// The lowest temperature
    pub t_min: f64,
    /// The highest temperature
    pub t_max: f64,
    /// How many temperatures to simulate
    pub temperatures: usize,
    /// Sweeps to run before measuring
    pub equilibration: Option<u64>,
    /// Frames to measure at each temperature
    pub frames: Option<u64>,
    /// Sweeps between measurements
    pub sweeps_per_frame: Option<u64>,
    /// The seed for the first temperature; the k-th uses seed + k
    pub seed: Option<u64>,
}

impl Default for ScanParams {
    fn default() -> Self {
        ScanParams {
            t_min: 1.5,
            t_max: 3.5,
            temperatures: 21,
            equilibration: None,
            frames: None,
            sweeps_per_frame: None,
            seed: None,
        }
    }
}

impl ScanParams {
    /// The temperatures to visit, evenly spaced from `t_min` to `t_max`.
    pub fn temperature_list(&self) -> Vec<f64> {
        match self.temperatures {
            0 => Vec::new(),
            1 => vec![self.t_min],
            n => {
                let step = (self.t_max - self.t_min) / (n - 1) as f64;
                (0..n).map(|k| self.t_min + k as f64 * step).collect()
            }
        }
    }
}

/// Simulate one temperature: equilibrate, then average over frames.
pub fn run_point(ising: &IsingParams, temperature: f64, seed: Option<u64>,
                 scan: &ScanParams) -> Result<Summary, Error> {
    let mut mc = Metropolis::from_params(ising.clone(),
                                         MetropolisParams { temperature: Some(temperature), seed })?;
    let equilibration = scan.equilibration.unwrap_or(1000);
    if equilibration > 0 {
        mc.run_sweeps(equilibration)?;
    }
    let sweeps_per_frame = scan.sweeps_per_frame.unwrap_or(10);
    let mut acc = Accumulator::new();
    for _ in 0..scan.frames.unwrap_or(100) {
        mc.run_sweeps(sweeps_per_frame)?;
        acc.add(Summary::of(&mc));
    }
    // With no measured frames all we can offer is where we stand.
    Ok(acc.mean().unwrap_or_else(|| Summary::of(&mc)))
}

/// Simulate every temperature of the scan in parallel.  The results
/// come back in order of increasing index into `temperature_list`.
pub fn run(ising: &IsingParams, scan: &ScanParams) -> Result<Vec<Summary>, Error> {
    crate::system::check_dimensions(ising.nx, ising.ny)?;
    scan.temperature_list()
        .into_par_iter()
        .enumerate()
        .map(|(k, t)| run_point(ising, t, scan.seed.map(|s| s.wrapping_add(k as u64)), scan))
        .collect()
}

#[cfg(test)]
fn small_scan() -> ScanParams {
    ScanParams {
        t_min: 1.0,
        t_max: 5.0,
        temperatures: 3,
        equilibration: Some(200),
        frames: Some(20),
        sweeps_per_frame: Some(5),
        seed: Some(42),
    }
}

#[test]
fn default_scan_brackets_the_transition() {
    let temperatures = ScanParams::default().temperature_list();
    assert_eq!(temperatures.len(), 21);
    assert_eq!(temperatures[0], 1.5);
    assert!((temperatures[20] - 3.5).abs() < 1e-12);
    let tc = crate::mc::metropolis::CRITICAL_TEMPERATURE;
    assert!(temperatures.iter().any(|&t| (t - tc).abs() < 0.05));
}

#[test]
fn temperatures_are_evenly_spaced() {
    assert_eq!(small_scan().temperature_list(), vec![1.0, 3.0, 5.0]);
    let one = ScanParams { temperatures: 1, ..small_scan() };
    assert_eq!(one.temperature_list(), vec![1.0]);
    let none = ScanParams { temperatures: 0, ..small_scan() };
    assert!(none.temperature_list().is_empty());
}

#[test]
fn cold_orders_and_hot_does_not() {
    let ising = IsingParams { nx: 12, ny: 12 };
    let scan = ScanParams { equilibration: Some(1000), ..small_scan() };
    let results = run(&ising, &scan).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].temperature, 1.0);
    assert_eq!(results[0].sweeps, 1000 + 20 * 5);
    // Cold lattices may still hold a stripe or two, but most bonds are
    // satisfied either way.
    assert!(results[0].mean_energy < -2.5, "cold: {:?}", results[0]);
    assert!(results[2].mean_abs_spin < 0.4, "hot: {:?}", results[2]);
    assert!(results[2].mean_energy > -2.0, "hot: {:?}", results[2]);
}

#[test]
fn scan_is_reproducible() {
    let ising = IsingParams { nx: 6, ny: 6 };
    let scan = ScanParams { equilibration: Some(10), frames: Some(3), ..small_scan() };
    let a = run(&ising, &scan).unwrap();
    let b = run(&ising, &scan).unwrap();
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.mean_energy, y.mean_energy);
        assert_eq!(x.mean_spin, y.mean_spin);
        assert_eq!(x.accepted, y.accepted);
    }
}

#[test]
fn scan_rejects_bad_input() {
    assert!(run(&IsingParams { nx: 2, ny: 6 }, &small_scan()).is_err());
    let freezing = ScanParams { t_min: 0.0, ..small_scan() };
    assert_eq!(run(&IsingParams { nx: 6, ny: 6 }, &freezing).unwrap_err(),
               Error::InvalidTemperature(0.0));
}
