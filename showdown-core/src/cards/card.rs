use enum_map::Enum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const SPADE: char = 's';
pub const HEART: char = 'h';
pub const DIAMOND: char = 'd';
pub const CLUB: char = 'c';
const SPADE_GLYPH: char = '♤';
const HEART_GLYPH: char = '♡';
const DIAMOND_GLYPH: char = '♢';
const CLUB_GLYPH: char = '♧';

pub const ALL_SUITS: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];
pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

#[derive(
    Hash, Enum, Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize,
)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// 2..=14, so straight detection can use arithmetic adjacency.
    pub fn value(&self) -> u8 {
        use Rank::*;
        match *self {
            Two => 2,
            Three => 3,
            Four => 4,
            Five => 5,
            Six => 6,
            Seven => 7,
            Eight => 8,
            Nine => 9,
            Ten => 10,
            Jack => 11,
            Queen => 12,
            King => 13,
            Ace => 14,
        }
    }

    pub fn name(&self) -> &'static str {
        use Rank::*;
        match *self {
            Two => "Two",
            Three => "Three",
            Four => "Four",
            Five => "Five",
            Six => "Six",
            Seven => "Seven",
            Eight => "Eight",
            Nine => "Nine",
            Ten => "Ten",
            Jack => "Jack",
            Queen => "Queen",
            King => "King",
            Ace => "Ace",
        }
    }

    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Two => write!(f, "2"),
            Self::Three => write!(f, "3"),
            Self::Four => write!(f, "4"),
            Self::Five => write!(f, "5"),
            Self::Six => write!(f, "6"),
            Self::Seven => write!(f, "7"),
            Self::Eight => write!(f, "8"),
            Self::Nine => write!(f, "9"),
            Self::Ten => write!(f, "T"),
            Self::Jack => write!(f, "J"),
            Self::Queen => write!(f, "Q"),
            Self::King => write!(f, "K"),
            Self::Ace => write!(f, "A"),
        }
    }
}

#[derive(Hash, Enum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub fn glyph(&self) -> char {
        match self {
            Self::Club => CLUB_GLYPH,
            Self::Diamond => DIAMOND_GLYPH,
            Self::Heart => HEART_GLYPH,
            Self::Spade => SPADE_GLYPH,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Club => "Clubs",
            Self::Diamond => "Diamonds",
            Self::Heart => "Hearts",
            Self::Spade => "Spades",
        }
    }

    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            CLUB => Self::Club,
            DIAMOND => Self::Diamond,
            HEART => Self::Heart,
            SPADE => Self::Spade,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Club => write!(f, "{}", CLUB),
            Self::Diamond => write!(f, "{}", DIAMOND),
            Self::Heart => write!(f, "{}", HEART),
            Self::Spade => write!(f, "{}", SPADE),
        }
    }
}

/// All suits are equal; poker has no suit ranking
impl PartialOrd for Suit {
    fn partial_cmp(&self, _: &Self) -> Option<std::cmp::Ordering> {
        Some(std::cmp::Ordering::Equal)
    }
}

#[derive(Hash, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut i = s.chars();
        let r = i.next().ok_or_else(|| String::from("Empty card string"))?;
        let s = i.next().ok_or_else(|| String::from("Missing suit char"))?;
        if i.next().is_some() {
            return Err(String::from("Card string longer than two chars"));
        }
        Ok(Card {
            rank: Rank::from_char(r).ok_or_else(|| format!("Bad rank char {:?}", r))?,
            suit: Suit::from_char(s).ok_or_else(|| format!("Bad suit char {:?}", s))?,
        })
    }
}

#[cfg(test)]
impl From<[char; 2]> for Card {
    fn from(cs: [char; 2]) -> Self {
        Self {
            rank: Rank::from_char(cs[0]).unwrap(),
            suit: Suit::from_char(cs[1]).unwrap(),
        }
    }
}

/// We only consider Card Rank when determining order
impl std::cmp::PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// We only consider Card Rank when determining order
impl std::cmp::Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Card { rank, suit }
    }

    pub fn suit(self) -> Suit {
        self.suit
    }

    pub fn rank(self) -> Rank {
        self.rank
    }

    /// Long console form, e.g. "♧ Ten of Clubs"
    pub fn display_name(&self) -> String {
        format!("{} {} of {}", self.suit.glyph(), self.rank.name(), self.suit.name())
    }

    /// Canonical key for pre-shuffle sorting. Suits carry no poker order,
    /// so this stays out of the Ord impl.
    pub(crate) fn sort_key(self) -> (Rank, u8) {
        (self.rank, self.suit as u8)
    }
}

/// Returns an UNSHUFFLED array of cards
pub fn all_cards() -> [Card; 52] {
    use itertools::Itertools;
    let mut cards: [Card; 52] = [Card::new(Suit::Club, Rank::Ace); 52];
    let c_iter = ALL_SUITS
        .iter()
        .cartesian_product(ALL_RANKS.iter())
        .map(|x| Card::new(*x.0, *x.1));
    for (i, c) in c_iter.enumerate() {
        cards[i] = c;
    }
    cards
}

#[cfg(test)]
pub(crate) fn cards_from_str(s: &'static str) -> Vec<Card> {
    let mut v = vec![];
    let mut s_chars = s.chars();
    while let Some(r) = s_chars.next() {
        let s = s_chars.next().expect("Need even number of chars");
        v.push([r, s].into())
    }
    v
}
