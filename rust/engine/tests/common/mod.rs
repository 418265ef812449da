#![allow(dead_code)]

use nebula_engine::cards::Card;
use nebula_engine::player::{Player, Roster, SeatProfile};
use nebula_engine::policy::{BotDecision, BotPolicy};
use nebula_engine::table::TableState;

pub const HERO_STACK: u32 = 150_000;

/// Bot policy that gives the same answer every time.
pub struct Fixed(pub BotDecision);

impl BotPolicy for Fixed {
    fn decide(&self, _table: &TableState, _bot: &Player) -> BotDecision {
        self.0
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

pub fn hero_profile() -> SeatProfile {
    SeatProfile::new("hero", "Hero", "🂡", HERO_STACK)
}

/// Hero plus the default four bots.
pub fn full_roster() -> Roster {
    Roster::new(hero_profile())
}

pub fn heads_up(stack: u32) -> Roster {
    Roster::with_bots(
        SeatProfile::new("hero", "Hero", "🂡", stack),
        vec![SeatProfile::new("bot", "Bot", "🂮", stack)],
    )
    .expect("valid roster")
}

pub fn cards(codes: &[&str]) -> Vec<Card> {
    codes
        .iter()
        .map(|code| code.parse().expect("card code"))
        .collect()
}

pub fn roster_chips(roster: &Roster) -> u64 {
    roster.seats().map(|(p, _)| u64::from(p.stack)).sum()
}
