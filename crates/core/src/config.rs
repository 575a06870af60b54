use crate::{CardType, SlotIndex};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckCount {
    pub card_type: CardType,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreferredSlot {
    pub card_type: CardType,
    pub slot: SlotIndex,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreferredSlots {
    pub rules: Vec<PreferredSlot>,
}

impl PreferredSlots {
    pub fn for_type(&self, card_type: CardType) -> Option<SlotIndex> {
        self.rules
            .iter()
            .find(|rule| rule.card_type == card_type)
            .map(|rule| rule.slot)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timings {
    pub reveal_ms: u64,
    pub fade_ms: u64,
    pub favorites_delay_ms: u64,
    pub ready_message_ms: u64,
    pub revealed_message_ms: u64,
    pub rejected_message_ms: u64,
    pub finalize_hint_ms: u64,
    pub armed_message_ms: u64,
    pub not_armed_message_ms: u64,
}

impl Timings {
    pub fn reveal(&self) -> Duration {
        Duration::from_millis(self.reveal_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn favorites_delay(&self) -> Duration {
        Duration::from_millis(self.favorites_delay_ms)
    }

    /// Scales every delay, used to shorten the long finalize wait when play-testing.
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |ms: u64| ((ms as f64) * factor.max(0.0)).round() as u64;
        Self {
            reveal_ms: scale(self.reveal_ms),
            fade_ms: scale(self.fade_ms),
            favorites_delay_ms: scale(self.favorites_delay_ms),
            ready_message_ms: scale(self.ready_message_ms),
            revealed_message_ms: scale(self.revealed_message_ms),
            rejected_message_ms: scale(self.rejected_message_ms),
            finalize_hint_ms: scale(self.finalize_hint_ms),
            armed_message_ms: scale(self.armed_message_ms),
            not_armed_message_ms: scale(self.not_armed_message_ms),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            reveal_ms: 680,
            fade_ms: 650,
            favorites_delay_ms: 60_000,
            ready_message_ms: 6_000,
            revealed_message_ms: 1_600,
            rejected_message_ms: 2_000,
            finalize_hint_ms: 2_600,
            armed_message_ms: 2_200,
            not_armed_message_ms: 1_600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    pub deck: Vec<DeckCount>,
    pub initial_picks: u32,
    pub extra_draws: u32,
    pub max_favorites: usize,
    pub preferred_slots: PreferredSlots,
    #[serde(default)]
    pub timings: Timings,
}

impl GameConfig {
    pub fn max_total_draws(&self) -> u32 {
        self.initial_picks + self.extra_draws
    }

    pub fn deck_size(&self) -> usize {
        self.deck.iter().map(|entry| entry.count as usize).sum()
    }

    pub fn count_of(&self, card_type: CardType) -> u32 {
        self.deck
            .iter()
            .filter(|entry| entry.card_type == card_type)
            .map(|entry| entry.count)
            .sum()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let deck = [
            (CardType::Spade, 11),
            (CardType::Pyramid, 3),
            (CardType::Pharaoh, 3),
            (CardType::Prideflag, 5),
            (CardType::Anch, 8),
            (CardType::Rings, 21),
            (CardType::Sunflowerman, 3),
            (CardType::Gaycouple, 20),
            (CardType::Anubis, 15),
            (CardType::Oillamp, 101),
            (CardType::Pottery, 72),
        ]
        .into_iter()
        .map(|(card_type, count)| DeckCount { card_type, count })
        .collect();
        let preferred = [
            CardType::Spade,
            CardType::Pyramid,
            CardType::Pharaoh,
            CardType::Prideflag,
            CardType::Anch,
            CardType::Rings,
            CardType::Sunflowerman,
            CardType::Gaycouple,
        ];
        let rules = preferred
            .into_iter()
            .zip(SlotIndex::all())
            .map(|(card_type, slot)| PreferredSlot { card_type, slot })
            .collect();
        Self {
            deck,
            initial_picks: 8,
            extra_draws: 52,
            max_favorites: 5,
            preferred_slots: PreferredSlots { rules },
            timings: Timings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_config_matches_shipped_constants() {
        let config = GameConfig::default();
        assert_eq!(config.deck_size(), 262);
        assert_eq!(config.max_total_draws(), 60);
        assert_eq!(config.max_favorites, 5);
        assert_eq!(config.count_of(CardType::Oillamp), 101);
        assert_eq!(
            config.preferred_slots.for_type(CardType::Gaycouple),
            SlotIndex::new(8).ok()
        );
        for kind in [CardType::Anubis, CardType::Oillamp, CardType::Pottery] {
            assert_eq!(config.preferred_slots.for_type(kind), None);
        }
    }

    #[test]
    fn scaled_timings_shrink_every_delay() {
        let fast = Timings::default().scaled(0.01);
        assert_eq!(fast.favorites_delay_ms, 600);
        assert_eq!(fast.reveal_ms, 7);
    }
}
