use super::card::{all_cards, Card};
use rand::prelude::*;
use rand_chacha::ChaChaRng;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use base64ct::{Base64, Encoding};

pub const DECK_LEN: usize = 52;
const SEED_LEN: usize = 32;
const ENCODED_SEED_LEN: usize = 4 * ((SEED_LEN + 3 - 1) / 3); // 4 * ceil(SEED_LEN / 3)

#[derive(Debug, PartialEq)]
pub enum DeckError {
    OutOfCards,
    DeckSeedDecodeError(base64ct::Error),
}

impl Error for DeckError {}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::OutOfCards => write!(f, "No more cards in deck"),
            DeckError::DeckSeedDecodeError(e) => write!(f, "{}", e),
        }
    }
}

impl From<base64ct::Error> for DeckError {
    fn from(e: base64ct::Error) -> Self {
        Self::DeckSeedDecodeError(e)
    }
}

/// The 52 card supply. Undealt cards live in `cards`; every card handed out
/// through `deal` is remembered in `dealt`, so `cards` plus `dealt` is always
/// the full deck and `restore` never has to reconstruct cards by absence.
#[derive(Debug, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
    dealt: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        let mut d = Deck {
            cards: all_cards().to_vec(),
            dealt: Vec::new(),
        };
        d.shuffle();
        d
    }
}

impl Deck {
    /// Generate a new single deck of cards, shuffled with the given seed
    pub fn new(seed: &DeckSeed) -> Self {
        let mut d = Self::default();
        d.seeded_shuffle(seed);
        d
    }

    pub fn deck_and_seed() -> (Deck, DeckSeed) {
        let ds = DeckSeed::default();
        let d = Deck::new(&ds);
        (d, ds)
    }

    /// Shuffle the undealt cards in-place with a fresh random seed
    pub fn shuffle(&mut self) {
        self.seeded_shuffle(&DeckSeed::default());
    }

    pub fn seeded_shuffle(&mut self, seed: &DeckSeed) {
        let mut rng = ChaChaRng::from_seed(seed.0);
        // For determinism given the same seed, the cards need to be in a known
        // order before shuffling. Card's Ord ignores suit, so sort by the
        // canonical key instead.
        self.cards.sort_unstable_by_key(|c| c.sort_key());
        self.cards.shuffle(&mut rng)
    }

    /// Remove and return the topmost card, or error if the deck is exhausted
    pub fn deal(&mut self) -> Result<Card, DeckError> {
        let card = self.cards.pop().ok_or(DeckError::OutOfCards)?;
        self.dealt.push(card);
        Ok(card)
    }

    /// Return every dealt card to the pool and reshuffle. The pool is back to
    /// its full 52 cards afterward no matter how many were dealt.
    pub fn restore(&mut self) {
        self.cards.append(&mut self.dealt);
        self.shuffle();
    }

    /// How many undealt cards remain
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckSeed([u8; SEED_LEN]);

impl DeckSeed {
    pub const fn new(b: [u8; SEED_LEN]) -> Self {
        Self(b)
    }
}

impl Default for DeckSeed {
    fn default() -> Self {
        Self(super::fill_random())
    }
}

impl fmt::Display for DeckSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b = [0u8; ENCODED_SEED_LEN];
        let s = Base64::encode(&self.0, &mut b).map_err(|_| fmt::Error)?;
        write!(f, "{}", s)
    }
}

impl FromStr for DeckSeed {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut b: [u8; SEED_LEN] = [0; SEED_LEN];
        Base64::decode(s, &mut b)?;
        Ok(DeckSeed(b))
    }
}
