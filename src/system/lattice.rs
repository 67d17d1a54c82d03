//! A periodic square lattice of spins and its neighbor table.
//!
//! Sites are stored row-major: site `(i, j)` lives at flat index
//! `i*ny + j`, with `i` in `0..nx` and `j` in `0..ny`.

use super::*;
use crate::rng::MyRng;

use rand::Rng;

/// The spins on an `nx` by `ny` grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    nx: usize,
    ny: usize,
    spins: Vec<Spin>,
}

impl Lattice {
    /// A lattice where every spin is an independent fair coin flip.
    pub fn random(nx: usize, ny: usize, rng: &mut MyRng) -> Result<Lattice, Error> {
        check_dimensions(nx, ny)?;
        let spins = (0..nx * ny).map(|_| if rng.gen::<bool>() { 1 } else { -1 }).collect();
        Ok(Lattice { nx, ny, spins })
    }

    /// A lattice with every spin the same.
    pub fn uniform(nx: usize, ny: usize, spin: Spin) -> Result<Lattice, Error> {
        Lattice::from_spins(nx, ny, vec![spin; nx * ny])
    }

    /// A lattice with the given row-major spins.
    pub fn from_spins(nx: usize, ny: usize, spins: Vec<Spin>) -> Result<Lattice, Error> {
        check_dimensions(nx, ny)?;
        if spins.len() != nx * ny {
            return Err(Error::InvalidLattice(
                format!("expected {} spins for {}x{}, got {}", nx * ny, nx, ny, spins.len())));
        }
        if let Some(s) = spins.iter().find(|&&s| s != 1 && s != -1) {
            return Err(Error::InvalidLattice(format!("spin {} is not +1 or -1", s)));
        }
        Ok(Lattice { nx, ny, spins })
    }

    /// Number of rows.
    pub fn nx(&self) -> usize {
        self.nx
    }
    /// Number of columns.
    pub fn ny(&self) -> usize {
        self.ny
    }
    /// Number of sites.
    pub fn len(&self) -> usize {
        self.spins.len()
    }
    /// Never true: a lattice has at least nine sites.
    pub fn is_empty(&self) -> bool {
        self.spins.is_empty()
    }

    /// The flat index of site `(i, j)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.ny + j
    }
    /// The `(i, j)` of a flat index.
    #[inline]
    pub fn coordinates(&self, site: usize) -> (usize, usize) {
        (site / self.ny, site % self.ny)
    }

    /// The spin at a flat index.
    #[inline]
    pub fn spin(&self, site: usize) -> Spin {
        self.spins[site]
    }
    /// All the spins, row-major.
    pub fn spins(&self) -> &[Spin] {
        &self.spins
    }
    /// Reverse one spin.
    #[inline]
    pub fn flip(&mut self, site: usize) {
        self.spins[site] = -self.spins[site];
    }

    /// The sum of all spins.
    pub fn magnetization(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }
}

/// For every site, the flat indices of its four nearest neighbors
/// `(i-1,j), (i+1,j), (i,j-1), (i,j+1)`, wrapped periodically.
#[derive(Clone, Debug, PartialEq)]
pub struct NeighborTable {
    nx: usize,
    ny: usize,
    neighbors: Vec<[usize; 4]>,
}

impl NeighborTable {
    /// Build the table for an `nx` by `ny` lattice.
    pub fn new(nx: usize, ny: usize) -> NeighborTable {
        let mut neighbors = Vec::with_capacity(nx * ny);
        for i in 0..nx {
            let up = (i + nx - 1) % nx;
            let down = (i + 1) % nx;
            for j in 0..ny {
                let left = (j + ny - 1) % ny;
                let right = (j + 1) % ny;
                neighbors.push([up * ny + j, down * ny + j, i * ny + left, i * ny + right]);
            }
        }
        NeighborTable { nx, ny, neighbors }
    }

    /// The dimensions this table was built for.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// The neighbors of one site.
    #[inline]
    pub fn of(&self, site: usize) -> &[usize; 4] {
        &self.neighbors[site]
    }

    /// The sum of the four neighboring spins, in `{-4,-2,0,2,4}`.
    #[inline]
    pub fn spin_sum(&self, lattice: &Lattice, site: usize) -> i32 {
        self.neighbors[site].iter().map(|&n| lattice.spin(n) as i32).sum()
    }
}

#[test]
fn neighbors_wrap_on_five_by_five() {
    let table = NeighborTable::new(5, 5);
    let lat = Lattice::uniform(5, 5, 1).unwrap();
    let coords: Vec<_> = table.of(lat.index(0, 0)).iter().map(|&n| lat.coordinates(n)).collect();
    assert_eq!(coords, vec![(4, 0), (1, 0), (0, 4), (0, 1)]);
    let coords: Vec<_> = table.of(lat.index(4, 4)).iter().map(|&n| lat.coordinates(n)).collect();
    assert_eq!(coords, vec![(3, 4), (0, 4), (4, 3), (4, 0)]);
}

#[test]
fn neighbors_of_rectangle() {
    let (nx, ny) = (3, 7);
    let table = NeighborTable::new(nx, ny);
    let lat = Lattice::uniform(nx, ny, -1).unwrap();
    assert_eq!(table.dimensions(), (3, 7));
    for site in 0..lat.len() {
        let (i, j) = lat.coordinates(site);
        let expected = [((i + nx - 1) % nx, j), ((i + 1) % nx, j),
                        (i, (j + ny - 1) % ny), (i, (j + 1) % ny)];
        for (k, &n) in table.of(site).iter().enumerate() {
            assert_eq!(lat.coordinates(n), expected[k]);
        }
        assert_eq!(table.spin_sum(&lat, site), -4);
    }
}

#[test]
fn random_lattice_is_plus_minus_one() {
    let mut rng = crate::rng::from_seed(Some(10137));
    let lat = Lattice::random(40, 30, &mut rng).unwrap();
    assert_eq!(lat.len(), 1200);
    assert!(lat.spins().iter().all(|&s| s == 1 || s == -1));
    // A fair coin should not land the same way 1200 times.
    assert!(lat.magnetization().abs() < 1200);
}

#[test]
fn from_spins_rejects_garbage() {
    assert!(Lattice::from_spins(3, 3, vec![1; 8]).is_err());
    assert!(Lattice::from_spins(3, 3, vec![0; 9]).is_err());
    assert!(Lattice::from_spins(2, 3, vec![1; 6]).is_err());
    let mut lat = Lattice::from_spins(3, 3, vec![1; 9]).unwrap();
    lat.flip(4);
    assert_eq!(lat.spin(4), -1);
    assert_eq!(lat.magnetization(), 7);
}
