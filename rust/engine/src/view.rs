//! Client-facing projection of the table.
//!
//! The view never carries the deck, and opponents' hole cards stay face down
//! until the hand reaches showdown.

use serde::{Deserialize, Serialize};

use crate::cards::CardFace;
use crate::player::Player;
use crate::rules::HeroAction;
use crate::table::{HeroOption, Stage, TableState, Winner};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub title: String,
    pub seat: usize,
    pub stack: u32,
    pub bet: u32,
    pub status: String,
    pub folded: bool,
    pub is_hero: bool,
    pub hand: Vec<CardFace>,
}

impl PlayerView {
    fn project(player: &Player, reveal: bool) -> Self {
        let hand = player
            .hand
            .iter()
            .map(|card| {
                if reveal {
                    card.face()
                } else {
                    CardFace::hidden()
                }
            })
            .collect();
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            avatar: player.avatar.clone(),
            title: player.title.clone(),
            seat: player.seat,
            stack: player.stack,
            bet: player.bet,
            status: player.status.clone(),
            folded: player.folded,
            is_hero: player.is_hero,
            hand,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub table_id: String,
    pub stage: Stage,
    pub pot: u32,
    pub current_bet: u32,
    pub min_raise: u32,
    pub board: Vec<CardFace>,
    pub players: Vec<PlayerView>,
    pub log: Vec<String>,
    pub hero_options: Vec<HeroOption>,
    pub winner: Option<Winner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action: Option<HeroAction>,
}

impl From<&TableState> for TableView {
    fn from(table: &TableState) -> Self {
        let showdown = table.stage == Stage::Showdown;
        Self {
            table_id: table.table_id.clone(),
            stage: table.stage,
            pot: table.pot,
            current_bet: table.current_bet,
            min_raise: table.min_raise,
            board: table.board.iter().map(|card| card.face()).collect(),
            players: table
                .players
                .iter()
                .map(|p| PlayerView::project(p, p.is_hero || showdown))
                .collect(),
            log: table.log.iter().map(str::to_string).collect(),
            hero_options: table.hero_options.clone(),
            winner: table.winner.clone(),
            last_action: table.last_action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::player::SeatProfile;

    fn seated(id: &str, seat: usize, is_hero: bool) -> Player {
        let profile = SeatProfile::new(id, id, "", 1_000);
        Player::seat(
            &profile,
            seat,
            1_000,
            is_hero,
            [
                Card::new(Rank::Ace, Suit::Spades),
                Card::new(Rank::King, Suit::Spades),
            ],
        )
    }

    fn table_at(stage: Stage) -> TableState {
        let mut table = TableState::empty();
        table.stage = stage;
        table.players = vec![seated("hero", 0, true), seated("bot", 1, false)];
        table
    }

    #[test]
    fn masks_opponents_before_showdown() {
        let view = TableView::from(&table_at(Stage::Flop));
        assert!(view.players[0].hand.iter().all(|c| !c.is_hidden()));
        assert!(view.players[1].hand.iter().all(CardFace::is_hidden));
    }

    #[test]
    fn reveals_everything_at_showdown() {
        let view = TableView::from(&table_at(Stage::Showdown));
        assert!(view
            .players
            .iter()
            .flat_map(|p| p.hand.iter())
            .all(|c| !c.is_hidden()));
    }

    #[test]
    fn never_serializes_the_deck() {
        let mut table = table_at(Stage::Preflop);
        table.deck = crate::deck::Deck::new_with_seed(3);
        let json = serde_json::to_value(TableView::from(&table)).expect("serialize");
        assert!(json.get("deck").is_none());
        assert_eq!(json["players"][1]["hand"][0]["code"], "??");
        assert_eq!(json["players"][0]["isHero"], true);
    }
}
