//! Core game logic for the reel-draw card game. Keep this crate free of IO and
//! platform concerns; storage arrives through [`KeyValueStore`].

pub mod cards;
pub mod config;
pub mod deck;
pub mod events;
pub mod favorites;
pub mod game;
pub mod rng;
pub mod session;
pub mod slots;
pub mod timeline;

pub use cards::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use favorites::*;
pub use game::*;
pub use rng::*;
pub use session::*;
pub use slots::*;
pub use timeline::*;
