//! Game state module - manages one memory-match session
//!
//! This module ties together the deck, the flip/match state machine, the move
//! counter and the session clock. Time only advances through [`GameState::tick`],
//! so the clock and the mismatch revert are plain countdowns owned by the
//! session: dealing a new game replaces them and nothing from the previous
//! session can fire afterwards.

use arrayvec::ArrayVec;

use crate::deck::{is_valid_layout, Dealer, Layout};
use crate::scoring::calculate_score;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Emitted once when the last pair is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameFinished {
    pub session_id: u32,
    pub elapsed_secs: u32,
    pub moves: u32,
    pub score: u32,
}

/// Result of a flip request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Request did not change anything.
    Ignored,
    /// First card of a pair-attempt is now face-up.
    Revealed,
    /// Second card matched the first.
    Matched,
    /// Second card did not match; both turn back after the reveal delay.
    Mismatched,
    /// Second card matched and it was the last pair.
    Completed(GameFinished),
}

impl FlipOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, FlipOutcome::Ignored)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    layout: Layout,
    dealer: Dealer,
    /// Ids currently revealed but not matched (0-2).
    face_up: ArrayVec<CardId, MAX_FACE_UP>,
    /// Bit `i` set when card `i` is matched.
    matched: u16,
    moves: u32,
    elapsed_secs: u32,
    /// Milliseconds accumulated towards the next whole second.
    clock_ms: u32,
    /// Countdown until a mismatched pair is turned back.
    revert_timer_ms: Option<u32>,
    status: GameStatus,
    /// Monotonic session id (increments on new game).
    session_id: u32,
    /// Finish event (consumed by the presentation layer).
    finished: Option<GameFinished>,
}

impl GameState {
    /// Create an engine with the given shuffle seed and deal the first session.
    pub fn new(seed: u64) -> Self {
        let mut dealer = Dealer::new(seed);
        let layout = dealer.deal();
        Self::with_dealer(layout, dealer)
    }

    /// Create an engine with a fixed first layout.
    ///
    /// Returns `None` unless the layout holds each symbol exactly twice.
    /// Later sessions are dealt from a dealer seeded with `seed`.
    pub fn from_layout(layout: Layout, seed: u64) -> Option<Self> {
        if !is_valid_layout(&layout) {
            return None;
        }
        Some(Self::with_dealer(layout, Dealer::new(seed)))
    }

    fn with_dealer(layout: Layout, dealer: Dealer) -> Self {
        Self {
            layout,
            dealer,
            face_up: ArrayVec::new(),
            matched: 0,
            moves: 0,
            elapsed_secs: 0,
            clock_ms: 0,
            revert_timer_ms: None,
            status: GameStatus::Playing,
            session_id: 0,
            finished: None,
        }
    }

    /// Discard the current session and deal a fresh one.
    pub fn new_game(&mut self) {
        self.layout = self.dealer.deal();
        self.face_up.clear();
        self.matched = 0;
        self.moves = 0;
        self.elapsed_secs = 0;
        self.clock_ms = 0;
        self.revert_timer_ms = None;
        self.status = GameStatus::Playing;
        self.session_id = self.session_id.wrapping_add(1);
        self.finished = None;
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn seed(&self) -> u64 {
        self.dealer.seed()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn face_up(&self) -> &[CardId] {
        &self.face_up
    }

    pub fn matched_count(&self) -> usize {
        self.matched.count_ones() as usize
    }

    pub fn is_matched(&self, id: CardId) -> bool {
        (id as usize) < DECK_SIZE && self.matched & (1 << id) != 0
    }

    pub fn is_face_up(&self, id: CardId) -> bool {
        self.face_up.contains(&id)
    }

    pub fn revert_pending(&self) -> bool {
        self.revert_timer_ms.is_some()
    }

    pub fn symbol(&self, id: CardId) -> Option<&'static str> {
        self.layout.get(id as usize).copied()
    }

    /// The other card carrying the same symbol.
    pub fn partner_of(&self, id: CardId) -> Option<CardId> {
        let symbol = self.symbol(id)?;
        self.layout
            .iter()
            .enumerate()
            .find(|&(i, s)| i != id as usize && *s == symbol)
            .map(|(i, _)| i as CardId)
    }

    /// Take the pending finish event, if the last pair was just found.
    pub fn take_finished(&mut self) -> Option<GameFinished> {
        self.finished.take()
    }

    /// Turn a card face-up.
    ///
    /// Silently ignored when the session is not playing, the id is unknown,
    /// the card is matched or already face-up, or two cards are awaiting
    /// resolution.
    pub fn flip(&mut self, id: CardId) -> FlipOutcome {
        if self.status != GameStatus::Playing
            || id as usize >= DECK_SIZE
            || self.is_matched(id)
            || self.is_face_up(id)
            || self.face_up.is_full()
        {
            return FlipOutcome::Ignored;
        }

        self.face_up.push(id);
        if !self.face_up.is_full() {
            return FlipOutcome::Revealed;
        }

        self.moves = self.moves.saturating_add(1);
        let (first, second) = (self.face_up[0], self.face_up[1]);
        if self.layout[first as usize] != self.layout[second as usize] {
            self.revert_timer_ms = Some(MISMATCH_REVEAL_MS);
            return FlipOutcome::Mismatched;
        }

        self.matched |= (1 << first) | (1 << second);
        self.face_up.clear();

        if self.matched_count() < DECK_SIZE {
            return FlipOutcome::Matched;
        }

        self.status = GameStatus::Completed;
        let finished = GameFinished {
            session_id: self.session_id,
            elapsed_secs: self.elapsed_secs,
            moves: self.moves,
            score: calculate_score(self.elapsed_secs, self.moves),
        };
        self.finished = Some(finished);
        FlipOutcome::Completed(finished)
    }

    /// Advance the session clock by `elapsed_ms`.
    ///
    /// Only runs while playing. Returns true when anything visible changed
    /// (a second ticked over or a mismatched pair was turned back).
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }

        let mut changed = false;

        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        while self.clock_ms >= SECOND_MS {
            self.clock_ms -= SECOND_MS;
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            changed = true;
        }

        if let Some(remaining) = self.revert_timer_ms {
            let remaining = remaining.saturating_sub(elapsed_ms);
            if remaining == 0 {
                self.revert_timer_ms = None;
                self.face_up.clear();
                changed = true;
            } else {
                self.revert_timer_ms = Some(remaining);
            }
        }

        changed
    }

    /// Apply a game action. Returns whether state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Flip(id) => self.flip(id).changed(),
            GameAction::NewGame => {
                self.new_game();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (i, card) in out.cards.iter_mut().enumerate() {
            let id = i as CardId;
            let matched = self.is_matched(id);
            *card = Card {
                id,
                symbol: self.layout[i],
                is_flipped: matched || self.is_face_up(id),
                is_matched: matched,
            };
        }
        out.face_up_count = self.face_up.len() as u8;
        out.matched_count = self.matched_count() as u8;
        out.moves = self.moves;
        out.elapsed_secs = self.elapsed_secs;
        out.status = self.status;
        out.session_id = self.session_id;
        out.revert_pending = self.revert_pending();
        out.seed = self.dealer.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
