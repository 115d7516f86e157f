use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terrain_core::{
    BumpConfig, BumpStampGenerator, ColorMode, FaultConfig, ParticleConfig,
    ParticleDepositionGenerator, RollDownParticleDepositionGenerator, SquareDiamondConfig,
    SquareDiamondGenerator, StepFaultGenerator, TerrainGenerator, normalize, save_png,
    utils::to_terrain_image,
};

const SIZE: usize = 257;
const SEED: u64 = 2025;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(SEED)
}

fn bench_particle_deposition(c: &mut Criterion) {
    c.bench_function("ParticleDeposition 100k particles", |b| {
        b.iter(|| {
            let mut g = ParticleDepositionGenerator::new(SIZE, ParticleConfig::default(), rng())
                .unwrap();
            g.generate().unwrap();
            g.into_grid()
        })
    });
}

fn bench_roll_down(c: &mut Criterion) {
    c.bench_function("RollDownParticleDeposition 100k particles", |b| {
        b.iter(|| {
            let mut g =
                RollDownParticleDepositionGenerator::new(SIZE, ParticleConfig::default(), rng())
                    .unwrap();
            g.generate().unwrap();
            g.into_grid()
        })
    });
}

fn bench_step_fault(c: &mut Criterion) {
    let mut group = c.benchmark_group("StepFault");
    // 300 faults scan the whole grid each; keep the sample count low
    group.sample_size(10);
    group.bench_function("300 faults", |b| {
        b.iter(|| {
            let mut g = StepFaultGenerator::new(SIZE, FaultConfig::default(), rng()).unwrap();
            g.generate().unwrap();
            g.into_grid()
        })
    });
    group.finish();
}

fn bench_bump(c: &mut Criterion) {
    c.bench_function("BumpStamp 1000 bumps", |b| {
        b.iter(|| {
            let mut g = BumpStampGenerator::new(SIZE, BumpConfig::default(), rng()).unwrap();
            g.generate().unwrap();
            g.into_grid()
        })
    });
}

fn bench_square_diamond(c: &mut Criterion) {
    c.bench_function("SquareDiamond", |b| {
        b.iter(|| {
            let mut g =
                SquareDiamondGenerator::new(SIZE, SquareDiamondConfig::default(), rng()).unwrap();
            g.generate().unwrap();
            g.into_grid()
        })
    });
}

fn bench_square_diamond_with_image(c: &mut Criterion) {
    let dir = std::env::temp_dir();
    c.bench_function("SquareDiamond + normalize + image + png", |b| {
        b.iter(|| {
            let mut g =
                SquareDiamondGenerator::new(SIZE, SquareDiamondConfig::default(), rng()).unwrap();
            g.generate().unwrap();
            let _img = to_terrain_image(&normalize(g.grid().as_slice()));
            save_png(g.grid(), dir.join("terrain_bench.png"), ColorMode::Gray).unwrap();
        })
    });
}

criterion_group!(
    terrain_benchmarks,
    bench_particle_deposition,
    bench_roll_down,
    bench_step_fault,
    bench_bump,
    bench_square_diamond,
    bench_square_diamond_with_image
);
criterion_main!(terrain_benchmarks);
