use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::table::{HeroOption, Stage};

pub const SMALL_BLIND: u32 = 25;
pub const BIG_BLIND: u32 = 50;

/// Fixed bet size for a street. Streets without a fixed size fall back to the big blind.
pub fn stage_bet_size(stage: Stage) -> u32 {
    match stage {
        Stage::Flop => 100,
        Stage::Turn => 200,
        Stage::River => 400,
        _ => BIG_BLIND,
    }
}

/// Actions the hero is offered at each stage.
pub fn hero_options(stage: Stage) -> Vec<HeroOption> {
    match stage {
        Stage::Preflop => vec![HeroOption::Fold, HeroOption::Call, HeroOption::Raise],
        Stage::Flop | Stage::Turn | Stage::River => vec![HeroOption::Check, HeroOption::Bet],
        Stage::Idle | Stage::Showdown => vec![HeroOption::NewHand],
    }
}

/// A command submitted by the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroAction {
    Fold,
    Call,
    Raise,
    Check,
    Bet,
}

impl HeroAction {
    pub const ALL: [HeroAction; 5] = [
        HeroAction::Fold,
        HeroAction::Call,
        HeroAction::Raise,
        HeroAction::Check,
        HeroAction::Bet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HeroAction::Fold => "fold",
            HeroAction::Call => "call",
            HeroAction::Raise => "raise",
            HeroAction::Check => "check",
            HeroAction::Bet => "bet",
        }
    }
}

impl fmt::Display for HeroAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeroAction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        HeroAction::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GameError::InvalidAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_actions() {
        assert_eq!("fold".parse::<HeroAction>(), Ok(HeroAction::Fold));
        assert_eq!(" Raise ".parse::<HeroAction>(), Ok(HeroAction::Raise));
        assert_eq!("BET".parse::<HeroAction>(), Ok(HeroAction::Bet));
    }

    #[test]
    fn rejects_unknown_actions() {
        assert_eq!(
            "shove".parse::<HeroAction>(),
            Err(GameError::InvalidAction("shove".into()))
        );
        assert!("new-hand".parse::<HeroAction>().is_err());
        assert!("".parse::<HeroAction>().is_err());
    }

    #[test]
    fn bet_sizes_follow_the_street() {
        assert_eq!(stage_bet_size(Stage::Flop), 100);
        assert_eq!(stage_bet_size(Stage::Turn), 200);
        assert_eq!(stage_bet_size(Stage::River), 400);
        assert_eq!(stage_bet_size(Stage::Preflop), BIG_BLIND);
        assert_eq!(stage_bet_size(Stage::Showdown), BIG_BLIND);
    }
}
