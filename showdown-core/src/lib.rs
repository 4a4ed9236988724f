pub mod cards;
pub mod game;

pub use cards::{deck, hand};
pub use cards::{Card, Deck, Hand};
pub use game::Game;

/// 10 players x 5 cards = 50, which is all a 52 card deck can cover.
pub const MAX_PLAYERS: usize = 10;
