//! Best-hand selection and winner resolution at showdown.

use crate::cards::Card;
use crate::hand::HandRanker;
use crate::player::Player;

/// Every `k`-element subset of `items`, in lexicographic index order.
pub fn k_combinations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    fn helper<T: Copy>(
        items: &[T],
        k: usize,
        start: usize,
        combo: &mut Vec<T>,
        out: &mut Vec<Vec<T>>,
    ) {
        if combo.len() == k {
            out.push(combo.clone());
            return;
        }
        for i in start..items.len() {
            combo.push(items[i]);
            helper(items, k, i + 1, combo, out);
            combo.pop();
        }
    }

    let mut out = Vec::new();
    if k > items.len() {
        return out;
    }
    let mut combo = Vec::with_capacity(k);
    helper(items, k, 0, &mut combo, &mut out);
    out
}

/// A player's strongest five cards and how the ranker scored them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestHand {
    pub score: u32,
    pub label: String,
    pub cards: [Card; 5],
}

/// Lowest-scoring five-card subset of `cards`, or `None` with fewer than five cards.
///
/// On equal scores the first subset in enumeration order is kept.
pub fn best_five(ranker: &dyn HandRanker, cards: &[Card]) -> Option<BestHand> {
    let mut best: Option<BestHand> = None;
    for combo in k_combinations(cards, 5) {
        let five: [Card; 5] = [combo[0], combo[1], combo[2], combo[3], combo[4]];
        let scored = ranker.score_five(&five);
        if best.as_ref().map_or(true, |b| scored.score < b.score) {
            best = Some(BestHand {
                score: scored.score,
                label: scored.label,
                cards: five,
            });
        }
    }
    best
}

/// A tied-for-best contender at showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowdownEntry {
    /// Index into the table's player list.
    pub player_index: usize,
    pub hand: BestHand,
}

/// Players holding the winning score, in seating order.
///
/// Folded players are skipped. Empty when no active player can make five cards.
pub fn evaluate_winners(
    ranker: &dyn HandRanker,
    players: &[Player],
    board: &[Card],
) -> Vec<ShowdownEntry> {
    let mut best: Vec<ShowdownEntry> = Vec::new();
    let mut best_score = u32::MAX;

    for (idx, player) in players.iter().enumerate() {
        if player.folded {
            continue;
        }
        let mut cards = Vec::with_capacity(2 + board.len());
        cards.extend_from_slice(&player.hand);
        cards.extend_from_slice(board);
        let Some(hand) = best_five(ranker, &cards) else {
            continue;
        };
        let entry = ShowdownEntry {
            player_index: idx,
            hand,
        };
        if best.is_empty() || entry.hand.score < best_score {
            best_score = entry.hand.score;
            best = vec![entry];
        } else if entry.hand.score == best_score {
            best.push(entry);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seven_choose_five_yields_twenty_one_distinct_subsets() {
        let items = [1, 2, 3, 4, 5, 6, 7];
        let combos = k_combinations(&items, 5);
        assert_eq!(combos.len(), 21);

        let unique: HashSet<Vec<i32>> = combos
            .iter()
            .map(|c| {
                let mut sorted = c.clone();
                sorted.sort_unstable();
                sorted
            })
            .collect();
        assert_eq!(unique.len(), 21);
        assert!(combos.iter().all(|c| c.len() == 5));
    }

    #[test]
    fn degenerate_sizes() {
        assert_eq!(k_combinations(&[1, 2, 3], 0), vec![Vec::<i32>::new()]);
        assert!(k_combinations(&[1, 2], 3).is_empty());
        assert_eq!(k_combinations(&[1, 2, 3], 3), vec![vec![1, 2, 3]]);
    }
}
