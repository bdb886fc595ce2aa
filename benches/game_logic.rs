use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memory_match::core::{Dealer, GameSnapshot, GameState};
use memory_match::term::{FrameBuffer, GameView, Scene, Viewport};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("game_tick_50ms", |b| {
        b.iter(|| {
            state.tick(black_box(50));
        })
    });
}

fn bench_deal(c: &mut Criterion) {
    let mut dealer = Dealer::new(12345);

    c.bench_function("deal_12_cards", |b| b.iter(|| black_box(dealer.deal())));
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("perfect_game", |b| {
        b.iter(|| {
            let mut state = GameState::new(black_box(7));
            for id in 0..12u8 {
                if let Some(partner) = state.partner_of(id) {
                    state.flip(id);
                    state.flip(partner);
                }
            }
            state.take_finished()
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let state = GameState::new(12345);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(black_box(&mut snap));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = GameState::new(12345);
    let snap = state.snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(100, 40);

    c.bench_function("render_board", |b| {
        b.iter(|| {
            view.render_into(&Scene::board(&snap, 5), Viewport::new(100, 40), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_deal,
    bench_full_game,
    bench_snapshot,
    bench_render
);
criterion_main!(benches);
