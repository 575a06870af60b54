use crate::{CardType, Deck, GameConfig, PreferredSlots, RngState, SlotIndex, SlotTable};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

mod draw;
mod finalize;

#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrawRejected {
    #[error("a draw is already in flight")]
    AlreadyDrawing,
    #[error("no more draws available")]
    DrawLimitReached,
    #[error("deck empty")]
    DeckEmpty,
    #[error("all slots are full")]
    SlotsFull,
    #[error("game is being finalized")]
    Finalizing,
}

#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum FinalizeError {
    #[error("left torch not lit")]
    NotArmed,
    #[error("need 8 cards including at least one spade")]
    RequirementsNotMet,
    #[error("game already finalized")]
    AlreadyFinalized,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress,
    ReadyToFinalize,
    Finalizing,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FinalizeStage {
    Open,
    Confirmed,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawCounters {
    pub draws_done: u32,
    pub initial_picks_done: u32,
}

/// An accepted draw that has not landed in its slot yet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Draw {
    pub card_id: u32,
    pub card_type: CardType,
    pub slot: SlotIndex,
    pub draws_done: u32,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    generation: u64,
    deck: Deck,
    initial_deck_size: usize,
    counters: DrawCounters,
    slots: SlotTable,
    draw_in_flight: bool,
    left_torch_lit: bool,
    stage: FinalizeStage,
    next_card_id: u32,
    initial_picks: u32,
    max_total_draws: u32,
    preferred_slots: PreferredSlots,
}

impl GameSession {
    pub fn new(config: &GameConfig, rng: &mut RngState, generation: u64) -> Self {
        let deck = Deck::build(&config.deck, rng);
        debug!(generation, cards = deck.remaining(), "session created");
        Self {
            generation,
            initial_deck_size: deck.remaining(),
            deck,
            counters: DrawCounters::default(),
            slots: SlotTable::new(),
            draw_in_flight: false,
            left_torch_lit: false,
            stage: FinalizeStage::Open,
            next_card_id: 1,
            initial_picks: config.initial_picks,
            max_total_draws: config.max_total_draws(),
            preferred_slots: config.preferred_slots.clone(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn initial_deck_size(&self) -> usize {
        self.initial_deck_size
    }

    pub fn counters(&self) -> DrawCounters {
        self.counters
    }

    pub fn max_total_draws(&self) -> u32 {
        self.max_total_draws
    }

    pub fn draws_remaining(&self) -> u32 {
        self.max_total_draws.saturating_sub(self.counters.draws_done)
    }

    pub fn slots(&self) -> &SlotTable {
        &self.slots
    }

    pub fn is_drawing(&self) -> bool {
        self.draw_in_flight
    }

    pub fn left_torch_lit(&self) -> bool {
        self.left_torch_lit
    }

    /// Recomputed on every call so it always agrees with the slot table.
    pub fn check_ready_for_finalize(&self) -> bool {
        self.slots.is_full() && self.slots.contains_type(CardType::Spade)
    }

    pub fn phase(&self) -> SessionPhase {
        match self.stage {
            FinalizeStage::Completed => SessionPhase::Finalized,
            FinalizeStage::Confirmed => SessionPhase::Finalizing,
            FinalizeStage::Open if self.check_ready_for_finalize() => {
                SessionPhase::ReadyToFinalize
            }
            FinalizeStage::Open => SessionPhase::InProgress,
        }
    }

    fn gameplay_locked(&self) -> bool {
        self.stage != FinalizeStage::Open
    }

    fn alloc_card_id(&mut self) -> u32 {
        let id = self.next_card_id;
        self.next_card_id = self.next_card_id.saturating_add(1);
        id
    }
}
