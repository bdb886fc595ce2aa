use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use memory_match::core::{GameSnapshot, GameState};
use memory_match::store::ScoreRecord;
use memory_match::term::{
    changed_spans, DialogView, FrameBuffer, GameOverView, GameView, LeaderboardView, SaveView,
    Scene, Viewport,
};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

fn rows() -> Vec<ScoreRecord> {
    (0..10u32)
        .map(|i| ScoreRecord {
            id: i.to_string(),
            player_name: format!("player{i}"),
            score: 600 + i * 100,
            time_taken: 5 + i,
            created_at: "2024-05-01T10:00:00Z".parse().unwrap(),
        })
        .collect()
}

// Board, game-over and leaderboard frames, cycling with the frame counter.
fn scene<'a>(frame: u32, snap: &'a GameSnapshot, rows: &'a [ScoreRecord]) -> Scene<'a> {
    let dialog = match frame % 3 {
        0 => None,
        1 => Some(DialogView::GameOver(GameOverView {
            elapsed_secs: snap.elapsed_secs,
            moves: snap.moves,
            score: 1234,
            name: "Ada",
            save: SaveView::Editing {
                error: Some("Failed to save score locally"),
            },
        })),
        _ => Some(DialogView::Leaderboard(LeaderboardView::Loaded(rows))),
    };
    Scene {
        snap,
        cursor: (frame % 12) as u8,
        dialog,
    }
}

#[test]
fn game_view_render_is_allocation_free_after_warmup() {
    let view = GameView::default();
    let viewport = Viewport::new(90, 32);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let rows = rows();

    let mut game = GameState::new(7);
    let mut snap = game.snapshot();

    for frame in 0..3 {
        view.render_into(&scene(frame, &snap, &rows), viewport, &mut fb);
    }

    let allocs = with_alloc_counting(|| {
        for frame in 0..300u32 {
            if frame % 10 == 0 {
                game.flip((frame / 10 % 12) as u8);
            }
            game.tick(50);
            game.snapshot_into(&mut snap);
            view.render_into(&scene(frame, &snap, &rows), viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}

#[test]
fn frame_diff_is_allocation_free() {
    let view = GameView::default();
    let viewport = Viewport::new(90, 32);
    let rows = rows();
    let mut game = GameState::new(3);
    let mut snap = game.snapshot();

    let mut prev = view.render(&scene(0, &snap, &rows), viewport);
    let mut next = FrameBuffer::new(viewport.width, viewport.height);
    let mut dirty = 0usize;

    let allocs = with_alloc_counting(|| {
        for frame in 1..200u32 {
            game.tick(50);
            game.snapshot_into(&mut snap);
            view.render_into(&scene(frame, &snap, &rows), viewport, &mut next);
            dirty += changed_spans(&prev, &next).map(|s| s.len as usize).sum::<usize>();
            std::mem::swap(&mut prev, &mut next);
        }
    });

    assert_eq!(allocs, 0);
    assert!(dirty > 0);
}
