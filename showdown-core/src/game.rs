use crate::cards::deck::{Deck, DeckError, DeckSeed};
use crate::cards::hand::{best_hand, Hand, HandCategory, HAND_SIZE};
use crate::cards::Card;
use crate::MAX_PLAYERS;
use serde::{Deserialize, Serialize};

#[derive(Debug, derive_more::Display)]
pub enum GameError {
    NotEnoughPlayers,
    TooManyPlayers,
    Deck(DeckError),
}

impl std::error::Error for GameError {}

impl From<DeckError> for GameError {
    fn from(d: DeckError) -> Self {
        GameError::Deck(d)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogItem {
    RoundStarted(usize),
    CardDealt(String, Card),
    RoundWon(String, HandCategory),
    DeckRestored,
}

impl std::fmt::Display for LogItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogItem::RoundStarted(n) => write!(f, "Round {} started", n),
            LogItem::CardDealt(name, card) => write!(f, "{} dealt {}", name, card),
            LogItem::RoundWon(name, category) => {
                write!(f, "{} won the round with {}", name, category)
            }
            LogItem::DeckRestored => write!(f, "Deck restored and reshuffled"),
        }
    }
}

/// One table: a deck and a fixed set of named hands, reused round after
/// round. All the poker knowledge lives in the cards module; this just deals,
/// asks which hand is greatest, and cleans up.
#[derive(Debug)]
pub struct Game {
    deck: Deck,
    hands: Vec<Hand>,
    round: usize,
    log: Vec<LogItem>,
}

impl Game {
    pub fn new<S: AsRef<str>>(names: &[S], seed: &DeckSeed) -> Result<Self, GameError> {
        if names.is_empty() {
            return Err(GameError::NotEnoughPlayers);
        }
        if names.len() > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }
        Ok(Game {
            deck: Deck::new(seed),
            hands: names.iter().map(|n| Hand::new(n.as_ref())).collect(),
            round: 0,
            log: Vec::new(),
        })
    }

    /// Deal a full round: one card per hand per pass, five passes, same as a
    /// live dealer would. A deck failure here means the table is
    /// mis-orchestrated and is surfaced, not swallowed.
    pub fn deal_round(&mut self) -> Result<(), GameError> {
        self.round += 1;
        self.log.push(LogItem::RoundStarted(self.round));
        for _ in 0..HAND_SIZE {
            for hand in self.hands.iter_mut() {
                let card = self.deck.deal()?;
                hand.add_card(card);
                self.log.push(LogItem::CardDealt(hand.name().to_string(), card));
            }
        }
        if let Some(winner) = best_hand(self.hands.iter()) {
            self.log
                .push(LogItem::RoundWon(winner.name().to_string(), winner.category()));
        }
        Ok(())
    }

    /// The strongest hand at the table, first of any tied maximal hands
    pub fn winner(&self) -> Option<&Hand> {
        best_hand(self.hands.iter())
    }

    /// Empty every hand and return all dealt cards to the deck, reshuffled
    pub fn finish_round(&mut self) {
        for hand in self.hands.iter_mut() {
            hand.reset();
        }
        self.deck.restore();
        self.log.push(LogItem::DeckRestored);
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn events(&self) -> impl Iterator<Item = &LogItem> {
        self.log.iter()
    }
}
