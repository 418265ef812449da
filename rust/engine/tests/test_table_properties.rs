mod common;

use common::{full_roster, roster_chips, Fixed};
use nebula_engine::deck::Deck;
use nebula_engine::engine::BettingEngine;
use nebula_engine::hand::StandardRanker;
use nebula_engine::policy::BotDecision;
use nebula_engine::rules::HeroAction;
use nebula_engine::table::{Stage, TableState};
use proptest::prelude::*;

fn any_action() -> impl Strategy<Value = HeroAction> {
    prop_oneof![
        Just(HeroAction::Fold),
        Just(HeroAction::Call),
        Just(HeroAction::Raise),
        Just(HeroAction::Check),
        Just(HeroAction::Bet),
    ]
}

fn any_policy() -> impl Strategy<Value = BotDecision> {
    prop_oneof![
        6 => Just(BotDecision::Call),
        3 => Just(BotDecision::Check),
        1 => Just(BotDecision::Fold),
    ]
}

proptest! {
    #[test]
    fn chips_are_conserved_and_stages_only_advance(
        seed in any::<u64>(),
        decision in any_policy(),
        actions in proptest::collection::vec(any_action(), 0..8),
    ) {
        let policy = Fixed(decision);
        let engine = BettingEngine::new(&policy, &StandardRanker);
        let roster = full_roster();
        let total = roster_chips(&roster);
        let mut table = engine
            .start_new_hand(&TableState::empty(), &roster, Deck::new_with_seed(seed))
            .expect("fresh deck");
        prop_assert!(table.cards_are_disjoint());

        for action in actions {
            let before = table.clone();
            match engine.apply_hero_action(&mut table, action) {
                Ok(outcome) => {
                    prop_assert_eq!(outcome.stage, table.stage);
                    prop_assert!(table.stage > before.stage);
                }
                Err(err) => {
                    prop_assert!(!err.is_fatal());
                    prop_assert_eq!(&table, &before);
                }
            }

            prop_assert!(table.cards_are_disjoint());
            prop_assert!(table.board.len() <= 5);
            let chips = table.chips_in_play();
            prop_assert!(chips <= total);
            if table.stage == Stage::Showdown {
                let winners = table.winner.as_ref().map_or(1, |w| w.players.len().max(1));
                prop_assert!(total - chips < winners as u64);
                prop_assert_eq!(table.pot, 0);
            } else {
                prop_assert_eq!(chips, total);
            }
        }
    }
}
