#[macro_use]
extern crate criterion;

use criterion::Criterion;
use rand::Rng;

use isingmc::mc::metropolis::{Metropolis, CRITICAL_TEMPERATURE};
use isingmc::rng;
use isingmc::system::ising::Ising;

fn gen_mc(side: usize) -> Metropolis {
    let mut mc = Metropolis::new(side, side, rng::from_seed(Some(1))).unwrap();
    mc.set_temperature(CRITICAL_TEMPERATURE).unwrap();
    // Get away from the random start before timing anything.
    mc.run_sweeps(5).unwrap();
    mc
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = rng::from_seed(Some(0));
    c.bench_function("MyRng.gen<f64>", move |b| b.iter(|| rng.gen::<f64>()));
    let mut rng = rng::from_seed(Some(0));
    c.bench_function("MyRng.gen_range", move |b| b.iter(|| rng.gen_range(0, 400usize)));

    c.bench_function_over_inputs(
        "run_sweeps(1)",
        move |b, &&side| {
            let mut mc = gen_mc(side);
            b.iter(|| mc.run_sweeps(1).unwrap())
        },
        &[10, 40, 100, 400],
    );

    c.bench_function_over_inputs(
        "compute_energy",
        move |b, &&side| {
            let mut ising = Ising::random(side, side, &mut rng::from_seed(Some(2))).unwrap();
            b.iter(|| ising.compute_energy())
        },
        &[10, 40, 100, 400],
    );

    c.bench_function("40x40 run_sweeps(100)", |b| {
        let mut mc = gen_mc(40);
        b.iter(|| mc.run_sweeps(100).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
