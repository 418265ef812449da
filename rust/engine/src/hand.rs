use std::cmp::Ordering;

use crate::cards::{Card, Rank, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl HandStrength {
    /// Packs category and kickers into one integer; higher is stronger.
    pub fn value(&self) -> u32 {
        let mut v = self.category as u32;
        for k in self.kickers {
            v = (v << 4) | u32::from(k);
        }
        v
    }

    pub fn label(&self) -> &'static str {
        if self.category == Category::StraightFlush && self.kickers[0] == 14 {
            "Royal Flush"
        } else {
            self.category.label()
        }
    }
}

/// Upper bound of [`HandStrength::value`]: category 8 followed by five 4-bit kickers.
const MAX_STRENGTH: u32 = (9 << 20) - 1;

/// Score and label assigned to one five-card hand by a [`HandRanker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandScore {
    /// Lower is stronger.
    pub score: u32,
    pub label: String,
}

/// Ranking capability used at showdown.
///
/// Implementations follow the "lower score wins" convention so the showdown
/// logic only ever looks for minimums.
pub trait HandRanker: Send + Sync {
    fn score_five(&self, cards: &[Card; 5]) -> HandScore;
}

/// Category-and-kicker evaluator for standard high hands.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRanker;

impl HandRanker for StandardRanker {
    fn score_five(&self, cards: &[Card; 5]) -> HandScore {
        let strength = evaluate_five(cards);
        HandScore {
            score: MAX_STRENGTH - strength.value(),
            label: strength.label().to_string(),
        }
    }
}

pub fn evaluate_five(cards: &[Card; 5]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_counts = [0u8; 4];
    for &c in cards.iter() {
        rank_counts[rank_val(c.rank) as usize] += 1;
        suit_counts[suit_index(c.suit)] += 1;
    }

    let is_flush = suit_counts.iter().any(|&count| count == 5);

    let mut uniq: Vec<u8> = (2..=14u8)
        .filter(|&r| rank_counts[r as usize] > 0)
        .collect();
    uniq.sort_unstable();
    let straight_high = detect_straight_high(&uniq);

    if is_flush {
        if let Some(high) = straight_high {
            return HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    let (trip_ranks, pair_ranks, mut singles) = classify_multiples(&rank_counts);
    singles.sort_unstable_by(|a, b| b.cmp(a));

    if is_flush {
        // Duplicate cards can leave fewer than five distinct ranks.
        let mut k = [0u8; 5];
        for (i, item) in k.iter_mut().enumerate() {
            *item = *singles.get(i).unwrap_or(&0);
        }
        return HandStrength {
            category: Category::Flush,
            kickers: k,
        };
    }

    if let Some(high) = straight_high {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    if let Some(t) = trip_ranks.first().copied() {
        let mut k = [t, 0, 0, 0, 0];
        k[1] = *singles.first().unwrap_or(&0);
        k[2] = *singles.get(1).unwrap_or(&0);
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: k,
        };
    }
    if pair_ranks.len() >= 2 {
        let mut prs = pair_ranks.clone();
        prs.sort_unstable_by(|a, b| b.cmp(a));
        return HandStrength {
            category: Category::TwoPair,
            kickers: [prs[0], prs[1], *singles.first().unwrap_or(&0), 0, 0],
        };
    }
    if let Some(p) = pair_ranks.first().copied() {
        let mut k = [p, 0, 0, 0, 0];
        for i in 0..3 {
            k[i + 1] = *singles.get(i).unwrap_or(&0);
        }
        return HandStrength {
            category: Category::OnePair,
            kickers: k,
        };
    }

    let mut k = [0u8; 5];
    for (i, item) in k.iter_mut().enumerate() {
        *item = *singles.get(i).unwrap_or(&0);
    }
    HandStrength {
        category: Category::HighCard,
        kickers: k,
    }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn rank_val(r: Rank) -> u8 {
    r as u8
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

fn detect_straight_high(sorted_unique_ranks: &[u8]) -> Option<u8> {
    if sorted_unique_ranks.len() < 5 {
        return None;
    }
    // Ace-low straight support: treat Ace as 1 additionally
    let mut w = sorted_unique_ranks.to_vec();
    if w.binary_search(&14).is_ok() {
        w.insert(0, 1);
    }

    let mut run = 1;
    let mut best_high = 0u8;
    for i in 1..w.len() {
        if w[i] == w[i - 1] + 1 {
            run += 1;
            if run >= 5 {
                best_high = w[i];
            }
        } else {
            run = 1;
        }
    }
    if best_high == 0 {
        None
    } else {
        Some(best_high)
    }
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let trip = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 3)?;
    let pair = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 2)?;
    Some((trip, pair))
}

fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in 2..=14u8 {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}
