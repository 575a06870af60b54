use crate::{CardType, DeckCount, RngState};
use std::collections::VecDeque;

/// Undrawn cards for one session, consumed from the front and never refilled.
#[derive(Debug, Default, Clone)]
pub struct Deck {
    draw: VecDeque<CardType>,
}

impl Deck {
    pub fn build(counts: &[DeckCount], rng: &mut RngState) -> Self {
        let mut cards = Self::expand(counts);
        rng.shuffle(&mut cards);
        Self { draw: cards.into() }
    }

    fn expand(counts: &[DeckCount]) -> Vec<CardType> {
        let total = counts.iter().map(|entry| entry.count as usize).sum();
        let mut cards = Vec::with_capacity(total);
        for entry in counts {
            for _ in 0..entry.count {
                cards.push(entry.card_type);
            }
        }
        cards
    }

    pub fn draw_front(&mut self) -> Option<CardType> {
        self.draw.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }

    pub fn count_of(&self, card_type: CardType) -> usize {
        self.draw.iter().filter(|kind| **kind == card_type).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = CardType> + '_ {
        self.draw.iter().copied()
    }
}
