use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use lifeduel::{
    Game, GameConfig, Grid, Pos2, next_generation, next_generation_parallel,
    policy::{DecisionPolicy, Uniform},
};
use rand::{SeedableRng, rngs::StdRng};

fn make_grid(size: i32) -> Grid {
    let mut grid = Grid::new(size, size);
    for y in 0..size {
        for x in 0..size {
            if (x + y) % 3 == 0 {
                grid.set(Pos2 { x, y }, true);
            }
        }
    }
    grid
}

fn bench_next_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_generation");
    for size in [64, 128, 256] {
        let grid = make_grid(size);

        group.bench_with_input(BenchmarkId::new("serial", size), &grid, |b, grid| {
            b.iter(|| next_generation(grid));
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &grid, |b, grid| {
            b.iter(|| next_generation_parallel(grid));
        });
    }
    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("tick", |b| {
        b.iter_batched(
            || {
                let policies: Vec<Box<dyn DecisionPolicy>> =
                    vec![Box::new(Uniform), Box::new(Uniform)];
                Game::new(GameConfig::default(), policies, StdRng::seed_from_u64(9))
                    .expect("default game")
            },
            |mut game| {
                for _ in 0..50 {
                    game.tick();
                }
                game
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_next_generation, bench_tick);
criterion_main!(benches);
