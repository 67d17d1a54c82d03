extern crate isingmc;

use isingmc::mc::metropolis::{Metropolis, CRITICAL_TEMPERATURE};
use isingmc::observe::{Accumulator, Summary};
use isingmc::rng;

fn assert_consistent(mc: &Metropolis) {
    let lattice = mc.system().lattice();
    let snapshot = mc.snapshot();
    assert_eq!(snapshot.len(), mc.nx() * mc.ny());
    for (site, s) in snapshot.iter().enumerate() {
        assert_eq!(lattice.coordinates(site), (s.i, s.j));
        assert_eq!(lattice.spin(site), s.spin);
        let sum: i32 = mc.system().neighbors().of(site).iter()
            .map(|&n| lattice.spin(n) as i32).sum();
        assert_eq!(s.energy, -(s.spin as i32 * sum) as f64);
        assert!([-4.0, -2.0, 0.0, 2.0, 4.0].contains(&s.energy));
    }
}

#[test]
fn three_by_three_single_sweep() {
    let mut mc = Metropolis::new(3, 3, rng::from_seed(Some(2692))).unwrap();
    mc.set_inverse_temperature(1.0 / 2.2692).unwrap();
    assert_consistent(&mc);
    mc.run_sweeps(1).unwrap();
    assert_eq!(mc.sweeps_completed(), 1);
    assert_eq!(mc.accepted() + mc.rejected(), 9);
    assert_consistent(&mc);
}

#[test]
fn energies_track_spins_for_many_shapes() {
    for &(nx, ny) in &[(3, 3), (3, 17), (16, 5), (40, 40)] {
        let mut mc = Metropolis::new(nx, ny, rng::from_seed(Some((nx * ny) as u64))).unwrap();
        assert_consistent(&mc);
        for &t in &[0.5, CRITICAL_TEMPERATURE, 10.0] {
            mc.set_temperature(t).unwrap();
            mc.run_sweeps(3).unwrap();
            assert_consistent(&mc);
            assert_eq!(mc.accepted() + mc.rejected(), (3 * nx * ny) as u64);
        }
        assert_eq!(mc.sweeps_completed(), 9);
    }
}

#[test]
fn reinitialize_after_sweeps() {
    let mut mc = Metropolis::new(10, 10, rng::from_seed(Some(1))).unwrap();
    mc.run_sweeps(5).unwrap();
    mc.run_sweeps(5).unwrap();
    assert_eq!(mc.sweeps_completed(), 10);
    mc.reinitialize(10, 12).unwrap();
    assert_eq!(mc.sweeps_completed(), 0);
    assert_eq!(mc.accepted(), 0);
    assert_eq!(mc.rejected(), 0);
    assert_consistent(&mc);
}

#[test]
fn same_seed_same_history() {
    let mut a = Metropolis::new(12, 9, rng::from_seed(Some(99))).unwrap();
    let mut b = Metropolis::new(12, 9, rng::from_seed(Some(99))).unwrap();
    for _ in 0..5 {
        a.run_sweeps(4).unwrap();
        b.run_sweeps(4).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.accepted(), b.accepted());
    }
}

#[test]
fn engines_share_nothing() {
    let mut a = Metropolis::new(8, 8, rng::from_seed(Some(5))).unwrap();
    let b = Metropolis::new(8, 8, rng::from_seed(Some(5))).unwrap();
    let before = b.snapshot();
    a.run_sweeps(10).unwrap();
    a.reinitialize(5, 5).unwrap();
    assert_eq!(b.snapshot(), before);
    assert_eq!((b.nx(), b.ny()), (8, 8));
}

fn mean_abs_spin(mc: &mut Metropolis, frames: usize, sweeps: u64) -> f64 {
    let mut acc = Accumulator::new();
    for _ in 0..frames {
        mc.run_sweeps(sweeps).unwrap();
        acc.add(Summary::of(mc));
    }
    acc.mean().unwrap().mean_abs_spin
}

#[test]
fn cold_lattices_order() {
    let mut mc = Metropolis::new(8, 8, rng::from_seed(Some(10137))).unwrap();
    mc.set_temperature(1.5).unwrap();
    mc.run_sweeps(3000).unwrap();
    let m = mean_abs_spin(&mut mc, 50, 10);
    assert!(m > 0.9, "mean |m| at T = 1.5 was {}", m);
}

#[test]
fn hot_lattices_do_not() {
    let mut mc = Metropolis::new(20, 20, rng::from_seed(Some(10137))).unwrap();
    mc.set_inverse_temperature(0.01).unwrap();
    mc.run_sweeps(100).unwrap();
    let m = mean_abs_spin(&mut mc, 50, 5);
    assert!(m < 0.15, "mean |m| at beta = 0.01 was {}", m);
    let rate = Summary::of(&mc).acceptance_rate.unwrap();
    assert!(rate > 0.8, "acceptance rate {}", rate);
}
