use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use rand_pcg::Pcg64Mcg;

use twophase::cube::{CubieCube, random_moves, to_facelets};
use twophase::{SolveParams, Solver};

fn criterion_benchmark(c: &mut Criterion) {
    let tables = twophase::tables::shared();
    let mut rng = Pcg64Mcg::new(0x_5c8d_9681_fb97_0317_36ec_6b11_2fa3_c0bd);

    let scrambles: Vec<String> = (0..32)
        .map(|_| to_facelets(&CubieCube::SOLVED.apply_moves(&random_moves(&mut rng, 30))))
        .collect();

    let first_solution = SolveParams {
        optimize: false,
        timeout: Duration::from_secs(5),
        ..SolveParams::default()
    };
    c.bench_function("first solution of a 30-move scramble", |b| {
        let mut scrambles = scrambles.iter().cycle();
        b.iter(|| {
            Solver::new(tables, first_solution)
                .solve(std::hint::black_box(scrambles.next().unwrap()))
                .unwrap()
        });
    });

    let optimized = SolveParams {
        timeout: Duration::from_millis(100),
        ..SolveParams::default()
    };
    c.bench_function("100ms optimized solve", |b| {
        let mut scrambles = scrambles.iter().cycle();
        b.iter(|| {
            Solver::new(tables, optimized)
                .solve(std::hint::black_box(scrambles.next().unwrap()))
                .unwrap()
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
