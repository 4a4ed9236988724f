use super::card::{Card, Rank, Suit};
use enum_map::EnumMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const HAND_SIZE: usize = 5;

/// Weakest to strongest. None is what an incomplete hand holds; it loses to
/// everything except another incomplete hand.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum HandCategory {
    #[default]
    None,
    HighCard,
    Pair,
    TwoPairs,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl std::fmt::Display for HandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "Nothing",
            Self::HighCard => "High Card",
            Self::Pair => "Pair",
            Self::TwoPairs => "Two Pairs",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::Straight => "Straight",
            Self::Flush => "Flush",
            Self::FullHouse => "Full House",
            Self::FourOfAKind => "Four of a Kind",
            Self::StraightFlush => "Straight Flush",
            Self::RoyalFlush => "Royal Flush",
        };
        write!(f, "{}", s)
    }
}

/// The classifier's verdict on a completed hand: the category, the cards
/// justifying it, and the leftovers used only for tie breaks. Both card lists
/// are ordered most significant first.
#[derive(Clone, Debug, Default)]
pub struct Classification {
    pub category: HandCategory,
    pub winning: Vec<Card>,
    pub kickers: Vec<Card>,
}

/// Two classifications are equal when they tie: same category and the same
/// rank sequences, regardless of suits.
impl PartialEq for Classification {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Classification {}

impl PartialOrd for Classification {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Classification {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| cmp_by_rank(&self.winning, &other.winning))
            .then_with(|| cmp_by_rank(&self.kickers, &other.kickers))
    }
}

/// First rank mismatch decides. Card's Ord already ignores suit.
fn cmp_by_rank(a: &[Card], b: &[Card]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct StraightMatch {
    /// The 5-4-3-2-A wheel. Its Ace plays low, so it must compare below
    /// every other straight.
    ace_low: bool,
}

const LOW_STRAIGHT_RANKS: [Rank; 5] = [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];

/// `ranks` must be distinct and sorted descending.
fn find_straight(ranks: &[Rank]) -> Option<StraightMatch> {
    if ranks == LOW_STRAIGHT_RANKS {
        return Some(StraightMatch { ace_low: true });
    }
    if ranks.windows(2).all(|w| w[0].value() == w[1].value() + 1) {
        return Some(StraightMatch { ace_low: false });
    }
    None
}

/// Rank groups present in the hand, largest group first, ties broken by
/// higher rank first. This order is what makes a two-pair hand report its
/// bigger pair ahead of its smaller one.
fn rank_groups(cards: &[Card; HAND_SIZE]) -> Vec<(Rank, usize)> {
    let mut counts: EnumMap<Rank, usize> = EnumMap::default();
    for c in cards {
        counts[c.rank()] += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, n)| n > 0)
        .sorted_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)))
        .collect()
}

/// The hand's cards belonging to the given groups, in group order.
fn group_cards(cards: &[Card; HAND_SIZE], groups: &[(Rank, usize)]) -> Vec<Card> {
    groups
        .iter()
        .flat_map(|&(r, _)| cards.iter().copied().filter(move |c| c.rank() == r))
        .collect()
}

/// Classify exactly five cards. Total: every well-formed input lands in
/// exactly one category. Repeated-rank patterns are checked first since they
/// are mutually exclusive with straights and flushes, then the layered
/// straight/flush combinations, then high card.
pub fn classify(cards: &[Card; HAND_SIZE]) -> Classification {
    let groups = rank_groups(cards);
    let sizes: Vec<usize> = groups.iter().map(|&(_, n)| n).collect();

    let (category, split) = match sizes.as_slice() {
        [4, 1] => (HandCategory::FourOfAKind, 1),
        [3, 2] => (HandCategory::FullHouse, 2),
        [3, 1, 1] => (HandCategory::ThreeOfAKind, 1),
        [2, 2, 1] => (HandCategory::TwoPairs, 2),
        [2, 1, 1, 1] => (HandCategory::Pair, 1),
        _ => return classify_unpaired(cards, &groups),
    };
    Classification {
        category,
        winning: group_cards(cards, &groups[..split]),
        kickers: group_cards(cards, &groups[split..]),
    }
}

/// All five ranks are distinct here, so only the straight/flush family and
/// high card remain.
fn classify_unpaired(cards: &[Card; HAND_SIZE], groups: &[(Rank, usize)]) -> Classification {
    let ranks: Vec<Rank> = groups.iter().map(|&(r, _)| r).collect();
    let straight = find_straight(&ranks);
    let flush = is_flush(cards);

    let mut winning: Vec<Card> = cards.iter().copied().sorted_unstable().rev().collect();

    let category = match (straight, flush) {
        (Some(s), true) => {
            if !s.ace_low && ranks[0] == Rank::Ace {
                HandCategory::RoyalFlush
            } else {
                HandCategory::StraightFlush
            }
        }
        (Some(_), false) => HandCategory::Straight,
        (None, true) => HandCategory::Flush,
        (None, false) => {
            let kickers = winning.split_off(1);
            return Classification {
                category: HandCategory::HighCard,
                winning,
                kickers,
            };
        }
    };
    if matches!(straight, Some(StraightMatch { ace_low: true })) {
        // The Ace sorted to the front but plays as a One; move it to the
        // least significant end so sequence comparison gets the wheel right.
        winning.rotate_left(1);
    }
    Classification {
        category,
        winning,
        kickers: Vec::new(),
    }
}

fn is_flush(cards: &[Card; HAND_SIZE]) -> bool {
    let mut counts: EnumMap<Suit, usize> = EnumMap::default();
    for c in cards {
        counts[c.suit()] += 1;
    }
    counts.values().any(|&n| n == HAND_SIZE)
}

/// A named player's hand: up to five cards, classified exactly once on the
/// transition to five. Reused across rounds via `reset`.
#[derive(Clone, Debug, Default)]
pub struct Hand {
    name: String,
    cards: Vec<Card>,
    result: Classification,
}

impl Hand {
    pub fn new(name: impl Into<String>) -> Self {
        Hand {
            name: name.into(),
            cards: Vec::with_capacity(HAND_SIZE),
            result: Classification::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cards in the order they were dealt
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() == HAND_SIZE
    }

    /// Append a card. A sixth card is silently ignored; the dealer is
    /// responsible for never over-dealing a hand.
    pub fn add_card(&mut self, card: Card) {
        if self.cards.len() < HAND_SIZE {
            self.cards.push(card);
        }
        if let Ok(full) = <&[Card; HAND_SIZE]>::try_from(self.cards.as_slice()) {
            if self.result.category == HandCategory::None {
                self.result = classify(full);
            }
        }
    }

    /// Empty the hand and forget its classification, ready for the next round
    pub fn reset(&mut self) {
        self.cards.clear();
        self.result = Classification::default();
    }

    /// None until the fifth card arrives
    pub fn category(&self) -> HandCategory {
        self.result.category
    }

    /// The cards that define the category, most significant first.
    /// Empty until the fifth card arrives.
    pub fn winning_cards(&self) -> &[Card] {
        &self.result.winning
    }

    /// Tie-break cards, most significant first
    pub fn kickers(&self) -> &[Card] {
        &self.result.kickers
    }

    pub fn classification(&self) -> &Classification {
        &self.result
    }
}

/// Hands order by strength alone; the name plays no part.
impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.result == other.result
    }
}

impl Eq for Hand {}

impl PartialOrd for Hand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.result.cmp(&other.result)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}:", self.name)?;
        for card in &self.cards {
            writeln!(f, "{}", card.display_name())?;
        }
        Ok(())
    }
}

/// The strongest hand, first of any tied maximal hands. `Iterator::max`
/// would return the last, so do it by hand.
pub fn best_hand<'a, I>(hands: I) -> Option<&'a Hand>
where
    I: IntoIterator<Item = &'a Hand>,
{
    let mut best: Option<&Hand> = None;
    for hand in hands {
        match best {
            None => best = Some(hand),
            Some(b) if hand > b => best = Some(hand),
            Some(_) => {}
        }
    }
    best
}


#[cfg(test)]
mod test_ordering {
    use super::*;
    use crate::cards::card::cards_from_str;

    pub(super) fn hand(name: &str, s: &'static str) -> Hand {
        let mut h = Hand::new(name);
        for c in cards_from_str(s) {
            h.add_card(c);
        }
        h
    }

    fn win_lose(s1: &'static str, s2: &'static str, hc: HandCategory) {
        let h1 = hand("a", s1);
        let h2 = hand("b", s2);
        assert_eq!(h1.category(), hc);
        assert_eq!(h2.category(), hc);
        assert!(h1 > h2, "{} should beat {}", s1, s2);
        assert!(h2 < h1);
    }

    fn tie(s1: &'static str, s2: &'static str, hc: HandCategory) {
        let h1 = hand("a", s1);
        let h2 = hand("b", s2);
        assert_eq!(h1.category(), hc);
        assert_eq!(h2.category(), hc);
        assert_eq!(h1, h2, "{} should tie {}", s1, s2);
    }

    /// One representative hand per category, weakest first
    const LADDER: [(HandCategory, &str); 10] = [
        (HandCategory::HighCard, "Ah8d6c4s2h"),
        (HandCategory::Pair, "AhAs8d6c4s"),
        (HandCategory::TwoPairs, "AhAsKdKc4s"),
        (HandCategory::ThreeOfAKind, "AhAsAd6c4s"),
        (HandCategory::Straight, "6h5d4c3s2h"),
        (HandCategory::Flush, "Ah8h6h4h2h"),
        (HandCategory::FullHouse, "AhAsAdKcKs"),
        (HandCategory::FourOfAKind, "AhAsAdAc4s"),
        (HandCategory::StraightFlush, "6h5h4h3h2h"),
        (HandCategory::RoyalFlush, "AhKhQhJhTh"),
    ];

    #[test]
    fn category_order_is_strict_and_total() {
        let hands: Vec<Hand> = LADDER.iter().map(|&(c, s)| {
            let h = hand("x", s);
            assert_eq!(h.category(), c);
            h
        }).collect();
        for i in 0..hands.len() {
            for j in 0..hands.len() {
                match i.cmp(&j) {
                    Ordering::Less => assert!(hands[i] < hands[j]),
                    Ordering::Equal => assert_eq!(hands[i], hands[j]),
                    Ordering::Greater => assert!(hands[i] > hands[j]),
                }
            }
        }
    }

    #[test]
    fn incomplete_hand_loses_to_everything() {
        let empty = Hand::new("empty");
        assert_eq!(empty.category(), HandCategory::None);
        for (_, s) in LADDER {
            assert!(empty < hand("x", s));
        }
        let mut partial = Hand::new("partial");
        for c in cards_from_str("AhAsAdAc") {
            partial.add_card(c);
        }
        assert_eq!(partial.category(), HandCategory::None);
        assert_eq!(empty, partial);
    }

    #[test]
    fn wheel_below_broadway_straight_flush() {
        win_lose("KcQcJcTc9c", "5d4d3d2dAd", HandCategory::StraightFlush);
        win_lose("6c5c4c3c2c", "5d4d3d2dAd", HandCategory::StraightFlush);
        tie("5c4c3c2cAc", "5d4d3d2dAd", HandCategory::StraightFlush);
    }

    #[test]
    fn straights() {
        win_lose("AsKsQsJsTd", "KcQcJcTc9s", HandCategory::Straight);
        win_lose("AsKsQsJsTd", "Ac2c3c4c5s", HandCategory::Straight);
        win_lose("6s5s4s3s2d", "Ac2c3c4c5s", HandCategory::Straight);
        tie("AsKsQsJsTd", "AcKcQcJcTs", HandCategory::Straight);
    }

    #[test]
    fn quads() {
        win_lose("4c4d4h4s3c", "3c3d3h3s2d", HandCategory::FourOfAKind);
        win_lose("4c4d4h4s5c", "4c4d4h4s3c", HandCategory::FourOfAKind);
        tie("2c2d2h2s3c", "2c2d2h2s3d", HandCategory::FourOfAKind);
    }

    #[test]
    fn full_houses() {
        win_lose("4c4d4h3s3c", "3c3d3h2s2d", HandCategory::FullHouse);
        win_lose("4c4d4h5s5c", "4c4d4h3s3c", HandCategory::FullHouse);
        tie("AcAdAhKcKd", "AdAhAsKhKs", HandCategory::FullHouse);
    }

    #[test]
    fn flushes() {
        win_lose("AsKsQsJs3s", "AdKdQdJd2d", HandCategory::Flush);
        win_lose("As6s5s4s3s", "Kd7d6d5d4d", HandCategory::Flush);
        tie("AsKsQsJs2s", "AdKdQdJd2d", HandCategory::Flush);
    }

    #[test]
    fn sets() {
        win_lose("AcAdAh4s3d", "AsAcAd3c2s", HandCategory::ThreeOfAKind);
        win_lose("9c9d9hTsJd", "9s9c9d2c3s", HandCategory::ThreeOfAKind);
        tie("3c3d3hAsKd", "3s3c3dAcKs", HandCategory::ThreeOfAKind);
    }

    /// A top-card-only comparison would call these a tie; the full
    /// winning-then-kickers walk must not.
    #[test]
    fn two_pairs_decided_beyond_top_pair() {
        win_lose("AsAdKsKdJd", "AcAdQcQdKs", HandCategory::TwoPairs);
        win_lose("AsAdKsKdJd", "AcAdKcKdTs", HandCategory::TwoPairs);
        tie("AsAdKsKdTd", "AcAdKcKdTs", HandCategory::TwoPairs);
    }

    #[test]
    fn pairs() {
        win_lose("AcAdKh4s3d", "AcAd5h4s3d", HandCategory::Pair);
        win_lose("AcAd5h4s3d", "AcAd5h4s2d", HandCategory::Pair);
        win_lose("2c2d6h4s3d", "2c2d5h4s3d", HandCategory::Pair);
        tie("AcAd5h4s3d", "AcAd5s4c3h", HandCategory::Pair);
    }

    #[test]
    fn high_cards() {
        win_lose("Ac7d6h5s4d", "Ac6d5h4s3d", HandCategory::HighCard);
        win_lose("AcKdQhJs7d", "AcKdQhJs3d", HandCategory::HighCard);
        tie("KcQdJhTs5c", "KdQhJsTc5d", HandCategory::HighCard);
    }
}

#[cfg(test)]
mod test_hand {
    use super::test_ordering::hand;
    use super::*;
    use crate::cards::card::cards_from_str;

    #[test]
    fn sixth_card_is_a_noop() {
        let mut h = hand("x", "7d7h7c7s2h");
        assert!(h.is_full());
        let before = h.classification().clone();
        h.add_card("Ah".parse().unwrap());
        assert_eq!(h.len(), HAND_SIZE);
        assert_eq!(*h.classification(), before);
        assert_eq!(h.category(), HandCategory::FourOfAKind);
    }

    #[test]
    fn classification_appears_on_fifth_card() {
        let mut h = Hand::new("x");
        for c in cards_from_str("7d7h7c7s") {
            h.add_card(c);
            assert_eq!(h.category(), HandCategory::None);
            assert!(h.winning_cards().is_empty());
            assert!(h.kickers().is_empty());
        }
        h.add_card("2h".parse().unwrap());
        assert_eq!(h.category(), HandCategory::FourOfAKind);
        assert_eq!(h.winning_cards().len(), 4);
        assert_eq!(h.kickers().len(), 1);
    }

    #[test]
    fn reset_for_next_round() {
        let mut h = hand("x", "AhKhQhJhTh");
        assert_eq!(h.category(), HandCategory::RoyalFlush);
        h.reset();
        assert!(h.is_empty());
        assert_eq!(h.category(), HandCategory::None);
        assert!(h.winning_cards().is_empty());
        for c in cards_from_str("2h3d5s8cJh") {
            h.add_card(c);
        }
        assert_eq!(h.category(), HandCategory::HighCard);
    }

    #[test]
    fn display_lists_cards_by_name() {
        let mut h = Hand::new("Julia");
        h.add_card("Tc".parse().unwrap());
        h.add_card("As".parse().unwrap());
        assert_eq!(h.to_string(), "Julia:\n♧ Ten of Clubs\n♤ Ace of Spades\n");
    }

    #[test]
    fn best_hand_is_first_maximal() {
        let hands = vec![
            hand("low", "Ah8d6c4s2h"),
            hand("first", "AcAdKhKd2s"),
            hand("second", "AsAhKsKh2d"),
        ];
        let w = best_hand(&hands).unwrap();
        assert_eq!(w.name(), "first");
        assert!(best_hand(std::iter::empty()).is_none());
    }
}
