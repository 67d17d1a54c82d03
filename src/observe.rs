//! Numbers a viewer wants to see about a simulation, and saving them.
//!
//! None of this feeds back into the simulation.  It reads an engine
//! between calls to `run_sweeps`, the same way a front end would.

use crate::atomicfile::AtomicFile;
use crate::mc::metropolis::Metropolis;
use crate::system::ising::SiteState;

use std::io::{Error, ErrorKind, Result};
use std::path::Path;

/// A summary of where a simulation stands.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of rows
    pub nx: usize,
    /// Number of columns
    pub ny: usize,
    /// The temperature
    pub temperature: f64,
    /// The inverse temperature
    pub beta: f64,
    /// Sweeps completed
    pub sweeps: u64,
    /// How fast we are going
    pub sweeps_per_second: f64,
    /// Accepted moves
    pub accepted: u64,
    /// Rejected moves
    pub rejected: u64,
    /// Fraction of moves accepted, if any moves were made
    pub acceptance_rate: Option<f64>,
    /// Mean site energy
    pub mean_energy: f64,
    /// Mean spin
    pub mean_spin: f64,
    /// Magnitude of the mean spin
    pub mean_abs_spin: f64,
}

impl Summary {
    /// Summarize an engine as it stands.
    pub fn of(mc: &Metropolis) -> Summary {
        let snapshot = mc.snapshot();
        let mean_spin = mean_spin(&snapshot);
        Summary {
            nx: mc.nx(),
            ny: mc.ny(),
            temperature: mc.temperature(),
            beta: mc.beta(),
            sweeps: mc.sweeps_completed(),
            sweeps_per_second: mc.sweeps_per_second(),
            accepted: mc.accepted(),
            rejected: mc.rejected(),
            acceptance_rate: acceptance_rate(mc.accepted(), mc.rejected()),
            mean_energy: mean_energy(&snapshot),
            mean_spin,
            mean_abs_spin: mean_spin.abs(),
        }
    }
}

/// The fraction of moves accepted, or `None` when there were no moves.
pub fn acceptance_rate(accepted: u64, rejected: u64) -> Option<f64> {
    let total = accepted + rejected;
    if total == 0 {
        None
    } else {
        Some(accepted as f64 / total as f64)
    }
}

/// The average site energy.
pub fn mean_energy(snapshot: &[SiteState]) -> f64 {
    snapshot.iter().map(|s| s.energy).sum::<f64>() / snapshot.len() as f64
}

/// The average spin.
pub fn mean_spin(snapshot: &[SiteState]) -> f64 {
    snapshot.iter().map(|s| s.spin as f64).sum::<f64>() / snapshot.len() as f64
}

/// Averages summaries taken at many moments of one run.
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    frames: u64,
    sweeps_per_second: f64,
    accepted: u64,
    rejected: u64,
    energy: f64,
    spin: f64,
    abs_spin: f64,
    last: Option<Summary>,
}

impl Accumulator {
    /// Nothing seen yet.
    pub fn new() -> Accumulator {
        Accumulator::default()
    }
    /// Include one more summary.
    pub fn add(&mut self, s: Summary) {
        self.frames += 1;
        self.sweeps_per_second += s.sweeps_per_second;
        self.accepted += s.accepted;
        self.rejected += s.rejected;
        self.energy += s.mean_energy;
        self.spin += s.mean_spin;
        self.abs_spin += s.mean_abs_spin;
        self.last = Some(s);
    }
    /// The average over everything added so far, labeled with the
    /// dimensions, temperature and sweep count of the latest summary.
    pub fn mean(&self) -> Option<Summary> {
        let last = self.last.as_ref()?;
        let n = self.frames as f64;
        Some(Summary {
            sweeps_per_second: self.sweeps_per_second / n,
            accepted: self.accepted,
            rejected: self.rejected,
            acceptance_rate: acceptance_rate(self.accepted, self.rejected),
            mean_energy: self.energy / n,
            mean_spin: self.spin / n,
            mean_abs_spin: self.abs_spin / n,
            ..last.clone()
        })
    }
}

fn other<E: std::fmt::Display>(e: E) -> Error {
    Error::new(ErrorKind::Other, e.to_string())
}

/// Save anything serializable to `path`, picking the format from the
/// extension: `yaml`, `json` or `cbor`.
pub fn save<T: serde::Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let mut f = AtomicFile::create(path)?;
    match path.extension().and_then(|x| x.to_str()) {
        Some("yaml") => serde_yaml::to_writer(&mut f, value).map_err(other)?,
        Some("json") => serde_json::to_writer_pretty(&mut f, value).map_err(other)?,
        Some("cbor") => serde_cbor::to_writer(&mut f, value).map_err(other)?,
        _ => {
            return Err(Error::new(ErrorKind::InvalidInput,
                                  format!("I don't know how to create file {:?}", path)));
        }
    }
    f.commit()
}

#[cfg(test)]
fn site(spin: i8, energy: f64) -> SiteState {
    SiteState { i: 0, j: 0, spin, energy }
}

#[test]
fn means_of_a_snapshot() {
    let snap = vec![site(1, -4.0), site(1, -2.0), site(-1, 2.0), site(1, 0.0)];
    assert_eq!(mean_energy(&snap), -1.0);
    assert_eq!(mean_spin(&snap), 0.5);
}

#[test]
fn acceptance_rate_needs_moves() {
    assert_eq!(acceptance_rate(0, 0), None);
    assert_eq!(acceptance_rate(1, 3), Some(0.25));
}

#[test]
fn summary_of_a_fresh_engine() {
    let mc = Metropolis::new(4, 5, crate::rng::from_seed(Some(7))).unwrap();
    let s = Summary::of(&mc);
    assert_eq!((s.nx, s.ny, s.sweeps), (4, 5, 0));
    assert_eq!(s.acceptance_rate, None);
    assert_eq!(s.mean_abs_spin, s.mean_spin.abs());
    let m = mc.system().lattice().magnetization() as f64 / 20.0;
    assert_eq!(s.mean_spin, m);
}

#[test]
fn accumulator_averages() {
    let mut mc = Metropolis::new(5, 5, crate::rng::from_seed(Some(8))).unwrap();
    let mut acc = Accumulator::new();
    assert!(acc.mean().is_none());
    let mut energies = Vec::new();
    for _ in 0..4 {
        mc.run_sweeps(2).unwrap();
        let s = Summary::of(&mc);
        energies.push(s.mean_energy);
        acc.add(s);
    }
    let mean = acc.mean().unwrap();
    assert_eq!(mean.sweeps, 8);
    assert_eq!(mean.accepted + mean.rejected, 4 * 2 * 25);
    let expected = energies.iter().sum::<f64>() / 4.0;
    assert!((mean.mean_energy - expected).abs() < 1e-12);
}

#[test]
fn save_picks_format_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mc = Metropolis::new(3, 3, crate::rng::from_seed(Some(9))).unwrap();
    let s = Summary::of(&mc);
    for ext in &["yaml", "json", "cbor"] {
        let path = dir.path().join(format!("summary.{}", ext));
        save(&path, &s).unwrap();
        let f = std::fs::File::open(&path).unwrap();
        let back: Summary = match *ext {
            "yaml" => serde_yaml::from_reader(f).unwrap(),
            "json" => serde_json::from_reader(f).unwrap(),
            _ => serde_cbor::from_reader(f).unwrap(),
        };
        assert_eq!((back.nx, back.ny, back.sweeps), (3, 3, 0));
        assert_eq!(back.acceptance_rate, None);
        assert!((back.beta - s.beta).abs() < 1e-12);
        assert!((back.mean_spin - s.mean_spin).abs() < 1e-12);
        assert!((back.mean_energy - s.mean_energy).abs() < 1e-12);
    }
    assert!(save(dir.path().join("summary.txt"), &s).is_err());
}

#[test]
fn json_keeps_the_rate_of_a_very_fast_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    let mut mc = Metropolis::new(3, 3, crate::rng::from_seed(Some(10))).unwrap();
    let mut acc = Accumulator::new();
    for _ in 0..3 {
        mc.run_sweeps(1).unwrap();
        assert!(mc.sweeps_per_second().is_finite());
        acc.add(Summary::of(&mc));
    }
    let mean = acc.mean().unwrap();
    save(&path, &vec![mean.clone()]).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("null,"), "{}", text);
    let back: Vec<Summary> = serde_json::from_str(&text).unwrap();
    let rate = back[0].sweeps_per_second;
    assert!(rate.is_finite() && rate > 0.0);
    assert!((rate - mean.sweeps_per_second).abs() <= 1e-9 * mean.sweeps_per_second);
}
