use crate::types::{Card, GameStatus, DECK_SIZE};

/// Read-only view of a session for rendering.
///
/// Per-card flags are derived from the engine's face-up and matched sets at
/// snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub cards: [Card; DECK_SIZE],
    pub face_up_count: u8,
    pub matched_count: u8,
    pub moves: u32,
    pub elapsed_secs: u32,
    pub status: GameStatus,
    pub session_id: u32,
    /// A non-matching pair is showing and will be turned back.
    pub revert_pending: bool,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        for (i, card) in self.cards.iter_mut().enumerate() {
            *card = Card {
                id: i as u8,
                ..Card::default()
            };
        }
        self.face_up_count = 0;
        self.matched_count = 0;
        self.moves = 0;
        self.elapsed_secs = 0;
        self.status = GameStatus::Playing;
        self.session_id = 0;
        self.revert_pending = false;
        self.seed = 0;
    }

    pub fn card(&self, id: u8) -> Option<&Card> {
        self.cards.get(id as usize)
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            cards: [Card::default(); DECK_SIZE],
            face_up_count: 0,
            matched_count: 0,
            moves: 0,
            elapsed_secs: 0,
            status: GameStatus::Playing,
            session_id: 0,
            revert_pending: false,
            seed: 0,
        };
        s.clear();
        s
    }
}
