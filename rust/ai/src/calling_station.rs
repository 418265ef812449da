//! The default bot behaviour: never folds, always matches.

use nebula_engine::player::Player;
use nebula_engine::table::TableState;

use crate::{BotDecision, BotPolicy};

pub const NAME: &str = "calling-station";

/// Calls whenever there is something to match and checks otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingStation;

impl BotPolicy for CallingStation {
    fn decide(&self, table: &TableState, bot: &Player) -> BotDecision {
        if table.current_bet > bot.bet {
            BotDecision::Call
        } else {
            BotDecision::Check
        }
    }

    fn name(&self) -> &str {
        NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_engine::cards::{Card, Rank, Suit};
    use nebula_engine::player::SeatProfile;

    fn bot(bet: u32) -> Player {
        let mut player = Player::seat(
            &SeatProfile::new("bot", "Bot", "", 1_000),
            1,
            1_000,
            false,
            [
                Card::new(Rank::Seven, Suit::Clubs),
                Card::new(Rank::Two, Suit::Hearts),
            ],
        );
        player.bet = bet;
        player
    }

    #[test]
    fn calls_when_behind_checks_when_level() {
        let mut table = TableState::empty();
        table.current_bet = 100;
        assert_eq!(CallingStation.decide(&table, &bot(50)), BotDecision::Call);
        assert_eq!(CallingStation.decide(&table, &bot(100)), BotDecision::Check);

        table.current_bet = 0;
        assert_eq!(CallingStation.decide(&table, &bot(0)), BotDecision::Check);
    }
}
