use crate::{CardType, PlacedCard, PreferredSlots, SlotValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const SLOT_COUNT: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("slot index {0} out of range 1..=8")]
pub struct SlotIndexError(pub u8);

/// One-based slot position, always within `1..=8`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlotIndex(u8);

impl SlotIndex {
    pub const FIRST: SlotIndex = SlotIndex(1);

    pub fn new(value: u8) -> Result<Self, SlotIndexError> {
        if (1..=SLOT_COUNT as u8).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SlotIndexError(value))
        }
    }

    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (1..=SLOT_COUNT as u8).map(SlotIndex)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    fn offset(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for SlotIndex {
    type Error = SlotIndexError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SlotIndex> for u8 {
    fn from(value: SlotIndex) -> Self {
        value.0
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotTable {
    cells: [Option<PlacedCard>; SLOT_COUNT],
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: SlotIndex) -> Option<&PlacedCard> {
        self.cells[slot.offset()].as_ref()
    }

    pub fn is_empty_at(&self, slot: SlotIndex) -> bool {
        self.get(slot).is_none()
    }

    /// Writes unconditionally and hands back whatever was displaced.
    pub fn place(&mut self, slot: SlotIndex, card: PlacedCard) -> Option<PlacedCard> {
        self.cells[slot.offset()].replace(card)
    }

    pub fn take(&mut self, slot: SlotIndex) -> Option<PlacedCard> {
        self.cells[slot.offset()].take()
    }

    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.filled() == SLOT_COUNT
    }

    pub fn contains_type(&self, card_type: CardType) -> bool {
        self.cells
            .iter()
            .flatten()
            .any(|card| card.card_type == card_type)
    }

    pub fn first_empty(&self) -> Option<SlotIndex> {
        SlotIndex::all().find(|slot| self.is_empty_at(*slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, Option<&PlacedCard>)> + '_ {
        SlotIndex::all().map(move |slot| (slot, self.get(slot)))
    }

    pub fn snapshot(&self) -> [SlotValue; SLOT_COUNT] {
        let mut values = [SlotValue::Empty; SLOT_COUNT];
        for (value, cell) in values.iter_mut().zip(self.cells.iter()) {
            *value = cell.map(|card| card.card_type).into();
        }
        values
    }
}

/// Preferred slot when free, else the lowest free slot, else slot 1.
///
/// The slot-1 fallback overwrites; sessions refuse to draw into a full table so
/// it is only reachable by calling the policy directly.
pub fn choose_slot(
    card_type: CardType,
    slots: &SlotTable,
    preferred: &PreferredSlots,
) -> SlotIndex {
    if let Some(slot) = preferred.for_type(card_type) {
        if slots.is_empty_at(slot) {
            return slot;
        }
    }
    slots.first_empty().unwrap_or(SlotIndex::FIRST)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(value: u8) -> SlotIndex {
        SlotIndex::new(value).expect("slot")
    }

    #[test]
    fn index_rejects_out_of_range_values() {
        assert_eq!(SlotIndex::new(0), Err(SlotIndexError(0)));
        assert_eq!(SlotIndex::new(9), Err(SlotIndexError(9)));
        assert_eq!(SlotIndex::all().count(), SLOT_COUNT);
        let parsed: Result<SlotIndex, _> = serde_json::from_str("12");
        assert!(parsed.is_err());
    }

    #[test]
    fn place_and_take_report_previous_occupant() {
        let mut table = SlotTable::new();
        let first = PlacedCard {
            id: 1,
            card_type: CardType::Rings,
        };
        let second = PlacedCard {
            id: 2,
            card_type: CardType::Anch,
        };
        assert_eq!(table.place(slot(6), first), None);
        assert_eq!(table.place(slot(6), second), Some(first));
        assert_eq!(table.filled(), 1);
        assert_eq!(table.take(slot(6)), Some(second));
        assert_eq!(table.take(slot(6)), None);
    }

    #[test]
    fn snapshot_marks_unfilled_slots_empty() {
        let mut table = SlotTable::new();
        table.place(
            slot(3),
            PlacedCard {
                id: 9,
                card_type: CardType::Pharaoh,
            },
        );
        let snap = table.snapshot();
        assert_eq!(snap[2], SlotValue::Card(CardType::Pharaoh));
        assert_eq!(snap.iter().filter(|v| **v == SlotValue::Empty).count(), 7);
    }
}
