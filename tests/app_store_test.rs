//! App and store worker wired together the way the main loop does it.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};

use memory_match::app::{App, Dialog, GameOverDialog, LeaderboardDialog, SavePhase};
use memory_match::core::{ordered_layout, GameState};
use memory_match::store::{ScoreStore, StoreConfig, StoreWorker};

fn pump(app: &mut App, worker: &mut StoreWorker) {
    let requests = app.drain_requests();
    let pending = requests.len();
    for (id, request) in requests {
        worker.dispatch(id, request);
    }
    for _ in 0..pending {
        let reply = worker
            .recv_timeout(Duration::from_secs(5))
            .expect("store reply");
        app.on_store_reply(reply);
    }
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::from(code));
}

#[test]
fn finished_game_is_saved_and_listed() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScoreStore::from_config(&StoreConfig::local_only(dir.path().join("scores.json"))).unwrap();
    let mut worker = StoreWorker::start(store).unwrap();

    let mut app = App::with_game(GameState::from_layout(ordered_layout(), 5).unwrap());
    app.tick(3_000);
    for id in 0..6 {
        app.flip(id);
        app.flip(id + 6);
    }

    for c in "Grace".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);
    pump(&mut app, &mut worker);

    let saved = match app.dialog() {
        Some(Dialog::GameOver(GameOverDialog {
            phase: SavePhase::Saved(record),
            ..
        })) => record.clone(),
        other => panic!("unexpected dialog {other:?}"),
    };
    assert_eq!(saved.player_name, "Grace");
    assert_eq!(saved.time_taken, 3);
    assert_eq!(saved.score, 360);

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('b'));
    pump(&mut app, &mut worker);

    assert_eq!(
        app.dialog(),
        Some(&Dialog::Leaderboard(LeaderboardDialog::Loaded(vec![saved])))
    );
}

#[test]
fn empty_leaderboard_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScoreStore::from_config(&StoreConfig::local_only(dir.path().join("none.json"))).unwrap();
    let mut worker = StoreWorker::start(store).unwrap();
    let mut app = App::new(1);

    press(&mut app, KeyCode::Char('b'));
    pump(&mut app, &mut worker);
    assert_eq!(
        app.dialog(),
        Some(&Dialog::Leaderboard(LeaderboardDialog::Loaded(Vec::new())))
    );
}
