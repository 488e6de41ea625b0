use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tower_stack::core::{place, Block, GameController};
use tower_stack::engine::{Scene, Session};
use tower_stack::term::{FrameBuffer, GameView, Viewport};
use tower_stack::types::{GameAction, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut game = GameController::new(12345);
    game.load();
    game.on_action();

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            game.on_tick();
        })
    });
}

fn bench_place(c: &mut Criterion) {
    let base = Block::base(0);
    let moving = Block::stacked_on(&base).starting_at(3.5);

    c.bench_function("place_chop", |b| {
        b.iter(|| {
            let mut m = moving.clone();
            black_box(place(&mut m, black_box(&base)).ok());
        })
    });
}

fn bench_session_step(c: &mut Criterion) {
    let mut session = Session::with_seed(12345, TICK_MS);
    session.apply(GameAction::Action);
    let mut scene = Scene::default();

    c.bench_function("session_step_and_scene", |b| {
        b.iter(|| {
            session.step();
            session.scene_into(&mut scene);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut session = Session::with_seed(12345, TICK_MS);
    session.apply(GameAction::Action);
    let scene = session.scene();
    let view = GameView::default();
    let vp = Viewport::new(120, 40);
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    c.bench_function("render_into_120x40", |b| {
        b.iter(|| {
            view.render_into(black_box(&scene), vp, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_place,
    bench_session_step,
    bench_render
);
criterion_main!(benches);
