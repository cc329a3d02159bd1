use criterion::{criterion_group, criterion_main, Criterion};
use engine::{AutonomousGame, ControlledGame, GameRng, Mode};

fn bench_controlled_laps(c: &mut Criterion) {
    c.bench_function("controlled_1000_passthrough_ticks", |b| {
        b.iter(|| {
            let mut game = ControlledGame::new(Mode::Passthrough, 20, GameRng::new(42))
                .expect("valid grid");
            game.start();
            for _ in 0..1000 {
                game.tick();
            }
            game.snapshot()
        });
    });
}

fn bench_autonomous_run(c: &mut Criterion) {
    c.bench_function("autonomous_1000_walls_ticks", |b| {
        b.iter(|| {
            let mut game =
                AutonomousGame::new(Mode::Walls, 20, GameRng::new(42)).expect("valid grid");
            for _ in 0..1000 {
                game.tick();
            }
            game.snapshot()
        });
    });
}

criterion_group!(benches, bench_controlled_laps, bench_autonomous_run);
criterion_main!(benches);
