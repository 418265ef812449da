use nebula_engine::cards::{Card, Rank as R, Suit as S};
use nebula_engine::hand::{compare_hands, evaluate_five, Category, HandRanker, StandardRanker};
use std::cmp::Ordering;

fn c(s: S, r: R) -> Card {
    Card::new(r, s)
}

#[test]
fn detects_royal_flush() {
    let cards = [
        c(S::Hearts, R::Ten),
        c(S::Hearts, R::Jack),
        c(S::Hearts, R::Queen),
        c(S::Hearts, R::King),
        c(S::Hearts, R::Ace),
    ];
    let hs = evaluate_five(&cards);
    assert_eq!(hs.category, Category::StraightFlush);
    assert_eq!(hs.label(), "Royal Flush");

    let king_high = [
        c(S::Spades, R::Nine),
        c(S::Spades, R::Ten),
        c(S::Spades, R::Jack),
        c(S::Spades, R::Queen),
        c(S::Spades, R::King),
    ];
    let royal = StandardRanker.score_five(&cards);
    let straight_flush = StandardRanker.score_five(&king_high);
    assert_eq!(straight_flush.label, "Straight Flush");
    assert!(royal.score < straight_flush.score);
}

#[test]
fn wheel_is_a_five_high_straight() {
    let wheel = [
        c(S::Clubs, R::Ace),
        c(S::Diamonds, R::Two),
        c(S::Hearts, R::Three),
        c(S::Spades, R::Four),
        c(S::Clubs, R::Five),
    ];
    let six_high = [
        c(S::Clubs, R::Six),
        c(S::Diamonds, R::Two),
        c(S::Hearts, R::Three),
        c(S::Spades, R::Four),
        c(S::Clubs, R::Five),
    ];
    let a = evaluate_five(&wheel);
    assert_eq!(a.category, Category::Straight);
    assert_eq!(a.kickers[0], 5);
    assert_eq!(compare_hands(&a, &evaluate_five(&six_high)), Ordering::Less);
}

#[test]
fn lower_score_is_stronger_across_categories() {
    let quads = [
        c(S::Clubs, R::Nine),
        c(S::Diamonds, R::Nine),
        c(S::Hearts, R::Nine),
        c(S::Spades, R::Nine),
        c(S::Clubs, R::Two),
    ];
    let full_house = [
        c(S::Clubs, R::King),
        c(S::Diamonds, R::King),
        c(S::Hearts, R::King),
        c(S::Clubs, R::Queen),
        c(S::Diamonds, R::Queen),
    ];
    let flush = [
        c(S::Spades, R::Two),
        c(S::Spades, R::Seven),
        c(S::Spades, R::Nine),
        c(S::Spades, R::Jack),
        c(S::Spades, R::Ace),
    ];
    let high_card = [
        c(S::Spades, R::Two),
        c(S::Hearts, R::Seven),
        c(S::Spades, R::Nine),
        c(S::Clubs, R::Jack),
        c(S::Spades, R::Ace),
    ];

    let scores: Vec<_> = [quads, full_house, flush, high_card]
        .iter()
        .map(|hand| StandardRanker.score_five(hand))
        .collect();
    assert!(scores.windows(2).all(|w| w[0].score < w[1].score));
    let labels: Vec<_> = scores.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["Four of a Kind", "Full House", "Flush", "High Card"]);
}

#[test]
fn labels_cover_the_middle_categories() {
    let cases: [([Card; 5], &str); 4] = [
        (
            [
                c(S::Clubs, R::Eight),
                c(S::Diamonds, R::Eight),
                c(S::Hearts, R::Eight),
                c(S::Spades, R::Four),
                c(S::Clubs, R::Two),
            ],
            "Three of a Kind",
        ),
        (
            [
                c(S::Clubs, R::Eight),
                c(S::Diamonds, R::Eight),
                c(S::Hearts, R::Four),
                c(S::Spades, R::Four),
                c(S::Clubs, R::Two),
            ],
            "Two Pair",
        ),
        (
            [
                c(S::Clubs, R::Eight),
                c(S::Diamonds, R::Eight),
                c(S::Hearts, R::Five),
                c(S::Spades, R::Four),
                c(S::Clubs, R::Two),
            ],
            "One Pair",
        ),
        (
            [
                c(S::Diamonds, R::Five),
                c(S::Diamonds, R::Six),
                c(S::Diamonds, R::Seven),
                c(S::Diamonds, R::Eight),
                c(S::Diamonds, R::Nine),
            ],
            "Straight Flush",
        ),
    ];
    for (hand, label) in cases {
        assert_eq!(StandardRanker.score_five(&hand).label, label);
    }
}

#[test]
fn two_pair_kicker_decides() {
    let a = [
        c(S::Clubs, R::Eight),
        c(S::Diamonds, R::Eight),
        c(S::Hearts, R::Four),
        c(S::Spades, R::Four),
        c(S::Clubs, R::King),
    ];
    let b = [
        c(S::Hearts, R::Eight),
        c(S::Spades, R::Eight),
        c(S::Clubs, R::Four),
        c(S::Diamonds, R::Four),
        c(S::Clubs, R::Queen),
    ];
    assert!(StandardRanker.score_five(&a).score < StandardRanker.score_five(&b).score);
}

#[test]
fn repeated_cards_in_a_flush_do_not_panic() {
    let cards = [
        c(S::Hearts, R::Ace),
        c(S::Hearts, R::Ace),
        c(S::Hearts, R::King),
        c(S::Hearts, R::Queen),
        c(S::Hearts, R::Two),
    ];
    let hs = evaluate_five(&cards);
    assert_eq!(hs.category, Category::Flush);
    assert_eq!(hs.kickers, [13, 12, 2, 0, 0]);
}
