use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Spade,
    Pyramid,
    Pharaoh,
    Prideflag,
    Anch,
    Rings,
    Sunflowerman,
    Gaycouple,
    Anubis,
    Oillamp,
    Pottery,
}

impl CardType {
    pub const ALL: [CardType; 11] = [
        CardType::Spade,
        CardType::Pyramid,
        CardType::Pharaoh,
        CardType::Prideflag,
        CardType::Anch,
        CardType::Rings,
        CardType::Sunflowerman,
        CardType::Gaycouple,
        CardType::Anubis,
        CardType::Oillamp,
        CardType::Pottery,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Spade => "spade",
            Self::Pyramid => "pyramid",
            Self::Pharaoh => "pharaoh",
            Self::Prideflag => "prideflag",
            Self::Anch => "anch",
            Self::Rings => "rings",
            Self::Sunflowerman => "sunflowerman",
            Self::Gaycouple => "gaycouple",
            Self::Anubis => "anubis",
            Self::Oillamp => "oillamp",
            Self::Pottery => "pottery",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown card type: {0}")]
pub struct UnknownCardType(pub String);

impl FromStr for CardType {
    type Err = UnknownCardType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        CardType::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| UnknownCardType(value.to_string()))
    }
}

/// A card that has landed in a slot. Ids are never reused within a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PlacedCard {
    pub id: u32,
    pub card_type: CardType,
}

/// One cell of a finalized hand: a card type, or `empty` for a slot that was
/// never filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlotValue {
    Card(CardType),
    #[default]
    Empty,
}

impl SlotValue {
    pub const EMPTY_NAME: &'static str = "empty";

    pub fn name(self) -> &'static str {
        match self {
            Self::Card(kind) => kind.name(),
            Self::Empty => Self::EMPTY_NAME,
        }
    }

    pub fn card_type(self) -> Option<CardType> {
        match self {
            Self::Card(kind) => Some(kind),
            Self::Empty => None,
        }
    }

    /// Unknown names decode to `Empty`, matching how stored hands are rendered.
    pub fn from_name_lossy(value: &str) -> Self {
        value.parse::<CardType>().map(Self::Card).unwrap_or(Self::Empty)
    }
}

impl From<Option<CardType>> for SlotValue {
    fn from(value: Option<CardType>) -> Self {
        value.map(Self::Card).unwrap_or(Self::Empty)
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SlotValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for SlotValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_name_lossy(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in CardType::ALL {
            assert_eq!(kind.name().parse::<CardType>(), Ok(kind));
        }
        assert_eq!(" Spade ".parse::<CardType>(), Ok(CardType::Spade));
        assert!("joker".parse::<CardType>().is_err());
    }

    #[test]
    fn slot_value_serializes_as_plain_string() {
        let cells = vec![SlotValue::Card(CardType::Oillamp), SlotValue::Empty];
        let body = serde_json::to_string(&cells).expect("serialize");
        assert_eq!(body, r#"["oillamp","empty"]"#);
        let back: Vec<SlotValue> = serde_json::from_str(r#"["anubis","bogus"]"#).expect("parse");
        assert_eq!(back, vec![SlotValue::Card(CardType::Anubis), SlotValue::Empty]);
    }
}
