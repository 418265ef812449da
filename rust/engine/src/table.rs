use std::collections::{HashSet, VecDeque};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::player::Player;
use crate::rules::{HeroAction, BIG_BLIND};

pub const TABLE_ID: &str = "nebula-holdem";

/// Most log entries kept on the table.
pub const LOG_CAPACITY: usize = 20;

/// Betting phase of the current hand. Only ever moves forward until a new hand starts.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Idle,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Preflop => "preflop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
            Stage::Showdown => "showdown",
        }
    }

    /// Whether the hero can still act in this stage.
    pub fn is_betting(self) -> bool {
        matches!(self, Stage::Preflop | Stage::Flop | Stage::Turn | Stage::River)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeroOption {
    Fold,
    Call,
    Raise,
    Check,
    Bet,
    NewHand,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum WinMethod {
    /// Everyone else folded.
    Fold,
    /// Best hand at showdown.
    Showdown,
}

/// Outcome of a finished hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub players: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    pub method: WinMethod,
    /// Chips credited to each listed player.
    #[serde(default)]
    pub amount: u32,
}

/// Newest-first table log, capped at [`LOG_CAPACITY`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TableLog {
    entries: VecDeque<String>,
}

impl From<Vec<String>> for TableLog {
    fn from(mut entries: Vec<String>) -> Self {
        entries.truncate(LOG_CAPACITY);
        Self {
            entries: entries.into(),
        }
    }
}

impl From<TableLog> for Vec<String> {
    fn from(log: TableLog) -> Self {
        log.entries.into()
    }
}

impl TableLog {
    pub fn with_entry(entry: impl Into<String>) -> Self {
        let mut entries = VecDeque::with_capacity(LOG_CAPACITY);
        entries.push_back(entry.into());
        Self { entries }
    }

    /// Prepends `message` stamped with the local wall-clock time (`HH:MM`).
    pub fn push(&mut self, message: impl AsRef<str>) {
        let stamp = Local::now().format("%H:%M");
        self.entries
            .push_front(format!("{stamp} · {}", message.as_ref()));
        self.entries.truncate(LOG_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// The single mutable session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    pub table_id: String,
    pub stage: Stage,
    pub pot: u32,
    /// Highest bet committed on the current street.
    pub current_bet: u32,
    pub min_raise: u32,
    pub board: Vec<Card>,
    /// Seating order, hero first.
    pub players: Vec<Player>,
    #[serde(default)]
    pub deck: Deck,
    pub log: TableLog,
    pub hero_options: Vec<HeroOption>,
    #[serde(default)]
    pub winner: Option<Winner>,
    #[serde(default)]
    pub last_action: Option<HeroAction>,
}

impl Default for TableState {
    fn default() -> Self {
        Self::empty()
    }
}

impl TableState {
    /// Fresh idle table, as created the first time the service starts.
    pub fn empty() -> Self {
        Self {
            table_id: TABLE_ID.to_string(),
            stage: Stage::Idle,
            pot: 0,
            current_bet: 0,
            min_raise: BIG_BLIND,
            board: Vec::with_capacity(5),
            players: Vec::new(),
            deck: Deck::empty(),
            log: TableLog::with_entry("Table initialized"),
            hero_options: vec![HeroOption::NewHand],
            winner: None,
            last_action: None,
        }
    }

    pub fn hero_index(&self) -> Option<usize> {
        self.players.iter().position(|p| p.is_hero)
    }

    pub fn hero(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_hero)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active())
    }

    /// No card appears twice across hole cards, board and deck.
    pub fn cards_are_disjoint(&self) -> bool {
        let mut seen = HashSet::new();
        self.players
            .iter()
            .flat_map(|p| p.hand.iter())
            .chain(self.board.iter())
            .chain(self.deck.cards().iter())
            .all(|card| seen.insert(*card))
    }

    /// Chips on the table: pot plus every stack.
    pub fn chips_in_play(&self) -> u64 {
        u64::from(self.pot) + self.players.iter().map(|p| u64::from(p.stack)).sum::<u64>()
    }

    pub(crate) fn reset_bets(&mut self) {
        for player in &mut self.players {
            player.bet = 0;
        }
        self.current_bet = 0;
    }
}
