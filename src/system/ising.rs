//! The Ising model

use super::*;
use super::lattice::{Lattice, NeighborTable};
use crate::rng::MyRng;

use auto_args::AutoArgs;

/// The parameters needed to configure an Ising model.
///
/// These parameters are normally set via command-line arguments.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, AutoArgs)]
pub struct IsingParams {
    /// Number of sites along x
    pub nx: usize,
    /// Number of sites along y
    pub ny: usize,
}

impl Default for IsingParams {
    fn default() -> Self {
        IsingParams { nx: 20, ny: 20 }
    }
}

/// What one site looks like from outside.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SiteState {
    /// Row
    pub i: usize,
    /// Column
    pub j: usize,
    /// The spin, +1 or -1
    pub spin: Spin,
    /// The energy of this site's four bonds, `-spin * neighbor sum`
    pub energy: Energy,
}

/// An Ising model with nearest-neighbor coupling `H = -Σ σᵢσⱼ` on a
/// periodic square lattice.
///
/// The per-site energies are a cache.  They are exact after
/// `compute_energy` and go stale as soon as a spin is flipped.
#[derive(Clone, Debug)]
pub struct Ising {
    lattice: Lattice,
    neighbors: NeighborTable,
    energies: Vec<Energy>,
}

impl Ising {
    /// Wrap a lattice, building its neighbor table and energies.
    pub fn new(lattice: Lattice) -> Ising {
        let mut ising = Ising {
            neighbors: NeighborTable::new(lattice.nx(), lattice.ny()),
            energies: vec![0.0; lattice.len()],
            lattice,
        };
        ising.compute_energy();
        ising
    }

    /// A fresh lattice of random spins.
    pub fn random(nx: usize, ny: usize, rng: &mut MyRng) -> Result<Ising, Error> {
        Ok(Ising::new(Lattice::random(nx, ny, rng)?))
    }

    /// Recompute every site energy from the spins.
    pub fn compute_energy(&mut self) {
        let lattice = &self.lattice;
        let neighbors = &self.neighbors;
        for (site, e) in self.energies.iter_mut().enumerate() {
            let s = lattice.spin(site) as i32;
            *e = -(s * neighbors.spin_sum(lattice, site)) as Energy;
        }
    }

    /// The change in energy if we flipped this spin: `2·spin·Σ neighbors`.
    #[inline]
    pub fn flip_delta(&self, site: usize) -> i32 {
        2 * self.lattice.spin(site) as i32 * self.neighbors.spin_sum(&self.lattice, site)
    }

    /// Flip one spin.  This leaves the energies stale.
    #[inline]
    pub fn flip(&mut self, site: usize) {
        self.lattice.flip(site);
    }

    /// The spins.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }
    /// Who neighbors whom.
    pub fn neighbors(&self) -> &NeighborTable {
        &self.neighbors
    }
    /// The cached site energies, row-major.
    pub fn energies(&self) -> &[Energy] {
        &self.energies
    }

    /// Number of rows.
    pub fn nx(&self) -> usize {
        self.lattice.nx()
    }
    /// Number of columns.
    pub fn ny(&self) -> usize {
        self.lattice.ny()
    }
    /// Number of sites.
    pub fn num_sites(&self) -> usize {
        self.lattice.len()
    }

    /// Every site with its spin and cached energy.
    pub fn snapshot(&self) -> Vec<SiteState> {
        self.energies
            .iter()
            .enumerate()
            .map(|(site, &energy)| {
                let (i, j) = self.lattice.coordinates(site);
                SiteState { i, j, spin: self.lattice.spin(site), energy }
            })
            .collect()
    }
}

#[cfg(test)]
fn assert_energies_consistent(ising: &Ising) {
    let lat = ising.lattice();
    for site in 0..ising.num_sites() {
        let sum: i32 = ising.neighbors().of(site).iter().map(|&n| lat.spin(n) as i32).sum();
        assert_eq!(ising.energies()[site], -(lat.spin(site) as i32 * sum) as f64);
        assert!([-4.0, -2.0, 0.0, 2.0, 4.0].contains(&ising.energies()[site]));
    }
}

#[cfg(test)]
fn energy_works_with(nx: usize, ny: usize) {
    use rand::Rng;
    let mut rng = crate::rng::from_seed(Some(10137));
    let mut ising = Ising::random(nx, ny, &mut rng).unwrap();
    assert_energies_consistent(&ising);
    for _ in 0..1000 {
        let site = rng.gen_range(0, ising.num_sites());
        let before: f64 = ising.energies().iter().sum();
        let delta = ising.flip_delta(site);
        ising.flip(site);
        ising.compute_energy();
        assert_energies_consistent(&ising);
        // Each bond is counted from both ends.
        let after: f64 = ising.energies().iter().sum();
        assert_eq!(after - before, 2.0 * delta as f64);
    }
}

#[test]
fn energy_works() {
    for &(nx, ny) in &[(3, 3), (3, 8), (10, 10), (15, 4), (37, 50)] {
        println!("testing with {}x{}", nx, ny);
        energy_works_with(nx, ny);
    }
}

#[test]
fn all_up_is_the_ground_state() {
    let ising = Ising::new(Lattice::uniform(4, 6, 1).unwrap());
    assert!(ising.energies().iter().all(|&e| e == -4.0));
    assert!((0..24).all(|site| ising.flip_delta(site) == 8));
}

#[test]
fn snapshot_lists_every_site() {
    let ising = Ising::new(Lattice::from_spins(3, 3, vec![1, -1, 1, 1, 1, 1, -1, 1, 1]).unwrap());
    let snap = ising.snapshot();
    assert_eq!(snap.len(), 9);
    assert_eq!(snap[1], SiteState { i: 0, j: 1, spin: -1, energy: 4.0 });
    assert_eq!(snap[6].i, 2);
    assert_eq!(snap[6].j, 0);
    assert_eq!(snap[6].spin, -1);
}
