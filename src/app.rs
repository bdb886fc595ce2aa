//! Screen state for the terminal game.
//!
//! `App` owns the engine, the board cursor and whichever dialog is open. It
//! never talks to the score store directly: requests are queued in an outbox
//! that the main loop drains into the [`StoreWorker`](crate::store::StoreWorker),
//! and replies come back through [`App::on_store_reply`].

use crossterm::event::KeyEvent;
use tracing::{debug, info};

use crate::core::{GameFinished, GameSnapshot, GameState};
use crate::input::{
    is_interrupt, map_board_key, map_dialog_key, should_quit, BoardAction, DialogAction, Direction,
};
use crate::store::{NewScore, RequestId, ScoreRecord, StoreReply, StoreRequest};
use crate::term::{char_width, DialogView, GameOverView, LeaderboardView, SaveView, Scene};
use crate::types::{CardId, GameAction, DECK_SIZE, GRID_COLUMNS, GRID_ROWS, LEADERBOARD_SIZE, PLAYER_NAME_MAX_CHARS};

/// Whether the loop should keep running after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavePhase {
    Editing { error: Option<String> },
    Saving(RequestId),
    Saved(ScoreRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverDialog {
    pub finished: GameFinished,
    pub name: String,
    pub phase: SavePhase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardDialog {
    Loading(RequestId),
    /// May be empty.
    Loaded(Vec<ScoreRecord>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    GameOver(GameOverDialog),
    Leaderboard(LeaderboardDialog),
}

enum DialogEffect {
    Submit,
    NewGame,
    Reload,
    Close,
}

pub struct App {
    game: GameState,
    snap: GameSnapshot,
    cursor: CardId,
    dialog: Option<Dialog>,
    outbox: Vec<(RequestId, StoreRequest)>,
    next_request: RequestId,
}

impl App {
    pub fn new(seed: u64) -> Self {
        Self::with_game(GameState::new(seed))
    }

    /// Wrap an existing engine, e.g. one dealt from a fixed layout.
    pub fn with_game(game: GameState) -> Self {
        info!(session = game.session_id(), seed = game.seed(), "game started");
        let snap = game.snapshot();
        Self {
            game,
            snap,
            cursor: 0,
            dialog: None,
            outbox: Vec::new(),
            next_request: 1,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snap
    }

    pub fn cursor(&self) -> CardId {
        self.cursor
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Requests queued since the last call, oldest first.
    pub fn drain_requests(&mut self) -> Vec<(RequestId, StoreRequest)> {
        std::mem::take(&mut self.outbox)
    }

    /// Advance the clock by one fixed step.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.game.tick(elapsed_ms) {
            self.refresh();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if is_interrupt(key) {
            return Control::Quit;
        }

        if self.dialog.is_some() {
            if let Some(action) = map_dialog_key(key, self.text_entry()) {
                self.handle_dialog_action(action);
            }
            return Control::Continue;
        }

        if should_quit(key) {
            return Control::Quit;
        }
        if let Some(action) = map_board_key(key) {
            self.handle_board_action(action);
        }
        Control::Continue
    }

    pub fn handle_board_action(&mut self, action: BoardAction) {
        match action {
            BoardAction::Move(dir) => self.move_cursor(dir),
            BoardAction::Flip => self.flip(self.cursor),
            BoardAction::NewGame => self.new_game(),
            BoardAction::ShowLeaderboard => self.open_leaderboard(),
        }
    }

    pub fn flip(&mut self, id: CardId) {
        if !self.game.apply_action(GameAction::Flip(id)) {
            return;
        }
        debug!(card = id, moves = self.game.moves(), "flip");
        if let Some(finished) = self.game.take_finished() {
            self.open_game_over(finished);
        }
        self.refresh();
    }

    pub fn new_game(&mut self) {
        self.game.apply_action(GameAction::NewGame);
        self.dialog = None;
        self.refresh();
        info!(session = self.game.session_id(), "game started");
    }

    pub fn open_leaderboard(&mut self) {
        let id = self.request(StoreRequest::FetchTop(LEADERBOARD_SIZE));
        self.dialog = Some(Dialog::Leaderboard(LeaderboardDialog::Loading(id)));
    }

    /// Feed a completed store request back. Replies nobody is waiting for
    /// (dialog closed or request superseded) are dropped.
    pub fn on_store_reply(&mut self, reply: StoreReply) {
        match (reply, self.dialog.as_mut()) {
            (
                StoreReply::Submitted { id, result },
                Some(Dialog::GameOver(GameOverDialog { phase, .. })),
            ) if *phase == SavePhase::Saving(id) => {
                *phase = match result {
                    Ok(record) => SavePhase::Saved(record),
                    Err(e) => SavePhase::Editing {
                        error: Some(e.to_string()),
                    },
                };
            }
            (StoreReply::Fetched { id, result }, Some(Dialog::Leaderboard(board)))
                if *board == LeaderboardDialog::Loading(id) =>
            {
                *board = match result {
                    Ok(rows) => LeaderboardDialog::Loaded(rows),
                    Err(e) => LeaderboardDialog::Failed(e.to_string()),
                };
            }
            (reply, _) => debug!(id = reply.id(), "stale store reply ignored"),
        }
    }

    /// Borrow everything the view needs for one frame.
    pub fn scene(&self) -> Scene<'_> {
        let dialog = self.dialog.as_ref().map(|dialog| match dialog {
            Dialog::GameOver(d) => DialogView::GameOver(GameOverView {
                elapsed_secs: d.finished.elapsed_secs,
                moves: d.finished.moves,
                score: d.finished.score,
                name: &d.name,
                save: match &d.phase {
                    SavePhase::Editing { error } => SaveView::Editing {
                        error: error.as_deref(),
                    },
                    SavePhase::Saving(_) => SaveView::Saving,
                    SavePhase::Saved(_) => SaveView::Saved,
                },
            }),
            Dialog::Leaderboard(board) => DialogView::Leaderboard(match board {
                LeaderboardDialog::Loading(_) => LeaderboardView::Loading,
                LeaderboardDialog::Loaded(rows) => LeaderboardView::Loaded(rows),
                LeaderboardDialog::Failed(msg) => LeaderboardView::Failed(msg),
            }),
        });
        Scene {
            snap: &self.snap,
            cursor: self.cursor,
            dialog,
        }
    }

    fn text_entry(&self) -> bool {
        matches!(
            self.dialog,
            Some(Dialog::GameOver(GameOverDialog {
                phase: SavePhase::Editing { .. },
                ..
            }))
        )
    }

    fn handle_dialog_action(&mut self, action: DialogAction) {
        let effect = match self.dialog.as_mut() {
            None => return,
            Some(Dialog::GameOver(d)) => {
                let editing = matches!(d.phase, SavePhase::Editing { .. });
                let saved = matches!(d.phase, SavePhase::Saved(_));
                match action {
                    DialogAction::Input(c) if editing => {
                        // The name field is one column per character.
                        if char_width(c) == 1 && d.name.chars().count() < PLAYER_NAME_MAX_CHARS {
                            d.name.push(c);
                        }
                        return;
                    }
                    DialogAction::Backspace if editing => {
                        d.name.pop();
                        return;
                    }
                    DialogAction::Confirm if editing => DialogEffect::Submit,
                    DialogAction::PlayAgain if saved => DialogEffect::NewGame,
                    DialogAction::Confirm if saved => DialogEffect::Close,
                    DialogAction::Cancel => DialogEffect::Close,
                    _ => return,
                }
            }
            Some(Dialog::Leaderboard(board)) => {
                let loading = matches!(board, LeaderboardDialog::Loading(_));
                match action {
                    DialogAction::Retry if !loading => DialogEffect::Reload,
                    DialogAction::Cancel | DialogAction::Confirm => DialogEffect::Close,
                    _ => return,
                }
            }
        };

        match effect {
            DialogEffect::Submit => self.submit_score(),
            DialogEffect::NewGame => self.new_game(),
            DialogEffect::Reload => self.open_leaderboard(),
            DialogEffect::Close => self.dialog = None,
        }
    }

    fn submit_score(&mut self) {
        let Some(Dialog::GameOver(d)) = self.dialog.as_ref() else {
            return;
        };
        match NewScore::from_finished(&d.name, &d.finished) {
            Ok(score) => {
                info!(player = %score.player_name, score = score.score, "submitting score");
                let id = self.request(StoreRequest::Submit(score));
                if let Some(Dialog::GameOver(d)) = self.dialog.as_mut() {
                    d.phase = SavePhase::Saving(id);
                }
            }
            Err(e) => {
                if let Some(Dialog::GameOver(d)) = self.dialog.as_mut() {
                    d.phase = SavePhase::Editing {
                        error: Some(e.to_string()),
                    };
                }
            }
        }
    }

    fn open_game_over(&mut self, finished: GameFinished) {
        info!(
            session = finished.session_id,
            secs = finished.elapsed_secs,
            moves = finished.moves,
            score = finished.score,
            "game completed"
        );
        self.dialog = Some(Dialog::GameOver(GameOverDialog {
            finished,
            name: String::new(),
            phase: SavePhase::Editing { error: None },
        }));
    }

    fn request(&mut self, request: StoreRequest) -> RequestId {
        let id = self.next_request;
        self.next_request += 1;
        self.outbox.push((id, request));
        id
    }

    fn move_cursor(&mut self, dir: Direction) {
        let col = self.cursor % GRID_COLUMNS;
        let row = self.cursor / GRID_COLUMNS;
        let (col, row) = match dir {
            Direction::Left => (col.saturating_sub(1), row),
            Direction::Right => ((col + 1).min(GRID_COLUMNS - 1), row),
            Direction::Up => (col, row.saturating_sub(1)),
            Direction::Down => (col, (row + 1).min(GRID_ROWS - 1)),
        };
        self.cursor = (row * GRID_COLUMNS + col).min(DECK_SIZE as CardId - 1);
    }

    fn refresh(&mut self) {
        self.game.snapshot_into(&mut self.snap);
    }
}
