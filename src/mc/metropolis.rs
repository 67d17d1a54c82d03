//! Single-spin-flip Metropolis Monte Carlo.
//!
//! A sweep is `nx*ny` trial moves on sites chosen uniformly at random
//! *with replacement*, so some sites are tried twice and some not at
//! all.  Each trial flips the chosen spin with probability
//! `min(1, exp(-β·ΔE))`.
//!
//! The engine has no loop or timer of its own.  Whoever drives it
//! (a render loop, a command-line tool) calls `run_sweeps` as often as
//! it likes and reads the results between calls.

use crate::error::Error;
use crate::mc::acceptance::AcceptanceTable;
use crate::rng::MyRng;
use crate::system::ising::{Ising, IsingParams, SiteState};
use crate::system::lattice::Lattice;
use crate::system::check_dimensions;

use auto_args::AutoArgs;
use rand::Rng;
use std::time::{Duration, Instant};

/// The critical temperature of the square-lattice Ising model,
/// `2/ln(1+√2)`, to the precision we offer as a default.
pub const CRITICAL_TEMPERATURE: f64 = 2.2692;

/// The parameters needed to configure the Monte Carlo.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, AutoArgs)]
pub struct MetropolisParams {
    /// The temperature, in units of J/k (defaults to critical)
    pub temperature: Option<f64>,
    /// The seed for the random number generator.
    pub seed: Option<u64>,
}

impl Default for MetropolisParams {
    fn default() -> Self {
        MetropolisParams { temperature: None, seed: None }
    }
}

/// A Metropolis simulation of one Ising lattice.
///
/// Everything lives here: the spins, their energies, the neighbor
/// table, the acceptance table, the random stream and the counters.
/// Nothing is shared between two engines.
#[derive(Debug)]
pub struct Metropolis {
    system: Ising,
    acceptance: AcceptanceTable,
    rng: MyRng,
    sweeps: u64,
    accepted: u64,
    rejected: u64,
    sweeps_per_second: f64,
}

impl Metropolis {
    /// A random `nx` by `ny` lattice at the critical temperature.
    pub fn new(nx: usize, ny: usize, mut rng: MyRng) -> Result<Metropolis, Error> {
        let system = Ising::random(nx, ny, &mut rng)?;
        Ok(Metropolis::with_system(system, AcceptanceTable::new(1.0 / CRITICAL_TEMPERATURE)?, rng))
    }

    /// Build from command-line style parameters.
    pub fn from_params(ising: IsingParams, params: MetropolisParams) -> Result<Metropolis, Error> {
        let temperature = params.temperature.unwrap_or(CRITICAL_TEMPERATURE);
        let acceptance = AcceptanceTable::new(inverse(temperature)?)?;
        let mut rng = crate::rng::from_seed(params.seed);
        let system = Ising::random(ising.nx, ising.ny, &mut rng)?;
        Ok(Metropolis::with_system(system, acceptance, rng))
    }

    /// Start from a particular configuration rather than a random one.
    pub fn from_lattice(lattice: Lattice, beta: f64, rng: MyRng) -> Result<Metropolis, Error> {
        let acceptance = AcceptanceTable::new(beta)?;
        Ok(Metropolis::with_system(Ising::new(lattice), acceptance, rng))
    }

    fn with_system(system: Ising, acceptance: AcceptanceTable, rng: MyRng) -> Metropolis {
        Metropolis {
            system,
            acceptance,
            rng,
            sweeps: 0,
            accepted: 0,
            rejected: 0,
            sweeps_per_second: 0.0,
        }
    }

    /// Throw away the lattice and start over with fresh random spins
    /// on an `nx` by `ny` grid.  All counters go back to zero; the
    /// temperature and the random stream carry on.
    pub fn reinitialize(&mut self, nx: usize, ny: usize) -> Result<(), Error> {
        check_dimensions(nx, ny)?;
        self.system = Ising::random(nx, ny, &mut self.rng)?;
        self.sweeps = 0;
        self.accepted = 0;
        self.rejected = 0;
        self.sweeps_per_second = 0.0;
        Ok(())
    }

    /// Set β = 1/T.  Calling this again with the same β changes nothing.
    pub fn set_inverse_temperature(&mut self, beta: f64) -> Result<(), Error> {
        self.acceptance = AcceptanceTable::new(beta)?;
        Ok(())
    }

    /// Set the temperature T = 1/β.
    pub fn set_temperature(&mut self, temperature: f64) -> Result<(), Error> {
        self.set_inverse_temperature(inverse(temperature)?)
    }

    /// Run `sweep_count` sweeps, then refresh the site energies.
    ///
    /// The accepted and rejected counts afterwards describe this call
    /// only, and `sweeps_per_second` times only the trial moves.
    pub fn run_sweeps(&mut self, sweep_count: u64) -> Result<(), Error> {
        if sweep_count == 0 {
            return Err(Error::InvalidSweepCount);
        }
        self.accepted = 0;
        self.rejected = 0;
        let moves_per_sweep = self.system.num_sites();
        let start = Instant::now();
        for _ in 0..sweep_count {
            for _ in 0..moves_per_sweep {
                self.trial_move();
            }
        }
        let elapsed = start.elapsed();
        self.sweeps += sweep_count;
        self.system.compute_energy();
        self.sweeps_per_second = sweep_rate(sweep_count, elapsed);
        Ok(())
    }

    /// One trial move on a random site.
    #[inline]
    fn trial_move(&mut self) {
        let row = self.rng.gen_range(0, self.system.nx());
        let col = self.rng.gen_range(0, self.system.ny());
        let site = self.system.lattice().index(row, col);
        self.metropolis_step(site);
    }

    /// Propose flipping the spin at `site` and apply the Metropolis
    /// rule, counting the outcome.  Returns whether the flip happened.
    ///
    /// Downhill and level moves are always taken without consulting
    /// the random stream.  The site energies are not refreshed until
    /// the end of the next `run_sweeps`.
    pub fn attempt_flip(&mut self, site: usize) -> Result<bool, Error> {
        let num_sites = self.system.num_sites();
        if site >= num_sites {
            return Err(Error::InvalidSite { site, num_sites });
        }
        Ok(self.metropolis_step(site))
    }

    #[inline]
    fn metropolis_step(&mut self, site: usize) -> bool {
        let delta_e = self.system.flip_delta(site);
        if delta_e <= 0 || self.rng.gen::<f64>() < self.acceptance.factor(delta_e) {
            self.system.flip(site);
            self.accepted += 1;
            true
        } else {
            self.rejected += 1;
            false
        }
    }

    /// Every site with its spin and energy, as of the last
    /// `run_sweeps` or `reinitialize`.
    pub fn snapshot(&self) -> Vec<SiteState> {
        self.system.snapshot()
    }

    /// The model itself.
    pub fn system(&self) -> &Ising {
        &self.system
    }
    /// The current Boltzmann factors.
    pub fn acceptance(&self) -> &AcceptanceTable {
        &self.acceptance
    }
    /// Number of rows.
    pub fn nx(&self) -> usize {
        self.system.nx()
    }
    /// Number of columns.
    pub fn ny(&self) -> usize {
        self.system.ny()
    }
    /// The inverse temperature β.
    pub fn beta(&self) -> f64 {
        self.acceptance.beta()
    }
    /// The temperature T = 1/β.
    pub fn temperature(&self) -> f64 {
        1.0 / self.acceptance.beta()
    }
    /// Sweeps since the lattice was created.
    pub fn sweeps_completed(&self) -> u64 {
        self.sweeps
    }
    /// Moves accepted during the last `run_sweeps`.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }
    /// Moves rejected during the last `run_sweeps`.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
    /// How fast the last `run_sweeps` went.
    pub fn sweeps_per_second(&self) -> f64 {
        self.sweeps_per_second
    }
}

/// Sweeps per second, timing at least a nanosecond so the rate stays
/// finite on a coarse clock.
fn sweep_rate(sweep_count: u64, elapsed: Duration) -> f64 {
    let elapsed = std::cmp::max(elapsed, Duration::from_nanos(1));
    sweep_count as f64 / elapsed.as_secs_f64()
}

fn inverse(temperature: f64) -> Result<f64, Error> {
    if temperature > 0.0 && temperature.is_finite() {
        Ok(1.0 / temperature)
    } else {
        Err(Error::InvalidTemperature(temperature))
    }
}

#[cfg(test)]
fn seeded(nx: usize, ny: usize) -> Metropolis {
    Metropolis::new(nx, ny, crate::rng::from_seed(Some(10137))).unwrap()
}

#[test]
fn counts_add_up() {
    let mut mc = seeded(7, 5);
    for &n in &[1, 3, 10] {
        let before = mc.sweeps_completed();
        mc.run_sweeps(n).unwrap();
        assert_eq!(mc.sweeps_completed(), before + n);
        assert_eq!(mc.accepted() + mc.rejected(), n * 35);
        assert!(mc.sweeps_per_second() > 0.0);
    }
}

#[test]
fn downhill_moves_always_happen() {
    // A lone down spin in a sea of up spins: flipping it gains 8.
    let mut spins = vec![1; 16];
    spins[5] = -1;
    let lattice = Lattice::from_spins(4, 4, spins).unwrap();
    let mut mc = Metropolis::from_lattice(lattice, 10.0, crate::rng::from_seed(Some(1))).unwrap();
    assert_eq!(mc.system().flip_delta(5), -8);
    assert_eq!(mc.attempt_flip(5), Ok(true));
    assert_eq!(mc.system().lattice().spin(5), 1);
    assert_eq!(mc.accepted(), 1);
    assert_eq!(mc.rejected(), 0);
}

#[test]
fn level_moves_always_happen() {
    // Two up and two down neighbors: flipping costs nothing.
    let mut spins = vec![1; 9];
    spins[1] = -1; // (0,1) is above (1,1)
    spins[3] = -1; // (1,0) is left of (1,1)
    let lattice = Lattice::from_spins(3, 3, spins).unwrap();
    let mut mc = Metropolis::from_lattice(lattice, 100.0, crate::rng::from_seed(Some(2))).unwrap();
    assert_eq!(mc.system().flip_delta(4), 0);
    for k in 0..10 {
        assert_eq!(mc.attempt_flip(4), Ok(true));
        assert_eq!(mc.system().lattice().spin(4), if k % 2 == 0 { -1 } else { 1 });
    }
}

#[test]
fn uphill_moves_freeze_out_when_cold() {
    let lattice = Lattice::uniform(3, 3, 1).unwrap();
    let mut mc = Metropolis::from_lattice(lattice, 50.0, crate::rng::from_seed(Some(3))).unwrap();
    mc.run_sweeps(20).unwrap();
    assert_eq!(mc.accepted(), 0);
    assert_eq!(mc.rejected(), 180);
    assert_eq!(mc.system().lattice().magnetization(), 9);
}

#[test]
fn set_inverse_temperature_is_idempotent() {
    let mut mc = seeded(5, 5);
    mc.set_inverse_temperature(0.3).unwrap();
    let first = *mc.acceptance();
    mc.set_inverse_temperature(0.3).unwrap();
    assert_eq!(*mc.acceptance(), first);
    assert_eq!(mc.beta(), 0.3);
    mc.set_temperature(2.0).unwrap();
    assert_eq!(mc.beta(), 0.5);
    assert_eq!(mc.temperature(), 2.0);
}

#[test]
fn bad_input_changes_nothing() {
    let mut mc = seeded(6, 4);
    mc.run_sweeps(2).unwrap();
    let spins = mc.system().lattice().clone();
    let (accepted, beta) = (mc.accepted(), mc.beta());

    assert_eq!(mc.run_sweeps(0), Err(Error::InvalidSweepCount));
    assert!(mc.reinitialize(2, 10).is_err());
    assert!(mc.reinitialize(10, 401).is_err());
    assert!(mc.set_inverse_temperature(-1.0).is_err());
    assert!(mc.set_temperature(0.0).is_err());

    assert_eq!(mc.system().lattice(), &spins);
    assert_eq!(mc.accepted(), accepted);
    assert_eq!(mc.beta(), beta);
    assert_eq!(mc.sweeps_completed(), 2);
}

#[test]
fn reinitialize_starts_over() {
    let mut mc = seeded(5, 5);
    mc.set_temperature(4.0).unwrap();
    mc.run_sweeps(4).unwrap();
    mc.reinitialize(8, 3).unwrap();
    assert_eq!((mc.nx(), mc.ny()), (8, 3));
    assert_eq!(mc.sweeps_completed(), 0);
    assert_eq!(mc.accepted(), 0);
    assert_eq!(mc.rejected(), 0);
    assert_eq!(mc.sweeps_per_second(), 0.0);
    assert_eq!(mc.temperature(), 4.0);
    assert_eq!(mc.snapshot().len(), 24);
    assert_eq!(mc.system().neighbors().dimensions(), (8, 3));
}

#[test]
fn from_params_uses_defaults() {
    let mc = Metropolis::from_params(IsingParams::default(), MetropolisParams::default()).unwrap();
    assert_eq!((mc.nx(), mc.ny()), (20, 20));
    assert_eq!(mc.temperature(), 1.0 / (1.0 / CRITICAL_TEMPERATURE));
    let bad = MetropolisParams { temperature: Some(-2.0), seed: Some(1) };
    assert_eq!(Metropolis::from_params(IsingParams::default(), bad).unwrap_err(),
               Error::InvalidTemperature(-2.0));
}

#[test]
fn attempt_flip_checks_the_site() {
    let mut mc = seeded(4, 3);
    let spins = mc.system().lattice().clone();
    assert_eq!(mc.attempt_flip(12), Err(Error::InvalidSite { site: 12, num_sites: 12 }));
    assert!(mc.attempt_flip(std::usize::MAX).is_err());
    assert_eq!(mc.system().lattice(), &spins);
    assert_eq!(mc.accepted() + mc.rejected(), 0);
    assert!(mc.attempt_flip(11).is_ok());
    assert_eq!(mc.accepted() + mc.rejected(), 1);
}

#[test]
fn sweep_rate_is_finite_on_a_stopped_clock() {
    let fastest = sweep_rate(3, Duration::from_secs(0));
    assert!(fastest.is_finite());
    assert!((fastest - 3e9).abs() < 1.0);
    assert_eq!(sweep_rate(10, Duration::from_millis(500)), 20.0);
}
