use crate::{CardType, DrawRejected, FavoriteEntry, FinalizeError, SlotIndex, Timings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    GameStarted {
        generation: u64,
        seed: u64,
        deck_size: usize,
    },
    CardRevealed {
        card_id: u32,
        card_type: CardType,
        slot: SlotIndex,
    },
    CardPlaced {
        card_id: u32,
        card_type: CardType,
        slot: SlotIndex,
        draws_done: u32,
        max_draws: u32,
    },
    DrawRejected { reason: DrawRejected },
    SlotDiscarded { slot: SlotIndex, card_type: CardType },
    FinalizeArmed,
    FinalizeRejected { reason: FinalizeError, step: TorchStep },
    FinalizeConfirmed { entry: FavoriteEntry },
    FavoritesRecorded { stored: usize, persisted: bool },
}

/// Which torch a finalize attempt came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TorchStep {
    Arm,
    Confirm,
}

impl Event {
    pub fn status(&self, timings: &Timings) -> Option<StatusMessage> {
        let timed = |text: String, ms: u64| {
            Some(StatusMessage::new(text, Some(Duration::from_millis(ms))))
        };
        match self {
            Event::GameStarted { .. } => timed(
                "Game ready — click any moving back card to reveal.".to_string(),
                timings.ready_message_ms,
            ),
            Event::CardPlaced {
                card_type,
                draws_done,
                max_draws,
                ..
            } => timed(
                format!(
                    "Revealed {} ({}/{})",
                    card_type.name().to_uppercase(),
                    draws_done,
                    max_draws
                ),
                timings.revealed_message_ms,
            ),
            Event::DrawRejected { reason } => {
                let text = match reason {
                    DrawRejected::DrawLimitReached => "No more draws available.",
                    DrawRejected::DeckEmpty => "Deck empty.",
                    DrawRejected::SlotsFull => "All slots are full — discard a card first.",
                    DrawRejected::AlreadyDrawing | DrawRejected::Finalizing => return None,
                };
                timed(text.to_string(), timings.rejected_message_ms)
            }
            Event::SlotDiscarded { slot, .. } => {
                Some(StatusMessage::sticky(format!("Discarded slot {slot}.")))
            }
            Event::FinalizeArmed => timed(
                "Left torch lit — now click the right torch to finalize.".to_string(),
                timings.armed_message_ms,
            ),
            Event::FinalizeRejected { reason, step } => match (step, reason) {
                (_, FinalizeError::AlreadyFinalized) => None,
                (TorchStep::Arm, _) => timed(
                    "Need 8 cards including at least one spade to finalize.".to_string(),
                    timings.finalize_hint_ms,
                ),
                (TorchStep::Confirm, FinalizeError::NotArmed) => timed(
                    "Click the left torch first.".to_string(),
                    timings.not_armed_message_ms,
                ),
                (TorchStep::Confirm, FinalizeError::RequirementsNotMet) => timed(
                    "Finalization requirements not met.".to_string(),
                    timings.rejected_message_ms,
                ),
            },
            Event::CardRevealed { .. }
            | Event::FinalizeConfirmed { .. }
            | Event::FavoritesRecorded { .. } => None,
        }
    }
}

/// Text for the status line plus how long it stays before auto-clearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub clear_after: Option<Duration>,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, clear_after: Option<Duration>) -> Self {
        Self {
            text: text.into(),
            clear_after,
        }
    }

    pub fn sticky(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
