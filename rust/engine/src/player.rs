use crate::cards::Card;
use crate::errors::GameError;
use serde::{Deserialize, Serialize};

/// Title given to a seated player whose profile has none.
pub const DEFAULT_TITLE: &str = "Pro";

/// Identity and default bankroll used to seat someone at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatProfile {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub title: String,
    /// Stack used when the player has no carried-over stack.
    pub stack: u32,
}

impl SeatProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        avatar: impl Into<String>,
        stack: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: avatar.into(),
            title: DEFAULT_TITLE.to_string(),
            stack,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// The fixed bot line-up seated next to the hero.
pub fn default_bots() -> Vec<SeatProfile> {
    vec![
        SeatProfile::new("bot-maverick", "Maverick", "🂮", 145_000),
        SeatProfile::new("bot-aurora", "Aurora", "🂭", 168_000),
        SeatProfile::new("bot-neon", "NeonFox", "🂱", 132_000),
        SeatProfile::new("bot-shade", "Shade", "🂾", 180_000),
    ]
}

/// Seating order for a hand: the hero at seat 0, bots after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    hero: SeatProfile,
    bots: Vec<SeatProfile>,
}

impl Roster {
    pub fn new(hero: SeatProfile) -> Self {
        Self {
            hero,
            bots: default_bots(),
        }
    }

    pub fn with_bots(hero: SeatProfile, bots: Vec<SeatProfile>) -> Result<Self, GameError> {
        if bots.is_empty() {
            return Err(GameError::InvalidRoster(
                "at least one bot seat is required".into(),
            ));
        }
        if bots.iter().any(|bot| bot.id == hero.id) {
            return Err(GameError::InvalidRoster(format!(
                "bot seat reuses hero id {}",
                hero.id
            )));
        }
        Ok(Self { hero, bots })
    }

    pub fn hero(&self) -> &SeatProfile {
        &self.hero
    }

    pub fn bots(&self) -> &[SeatProfile] {
        &self.bots
    }

    /// Profiles in seating order, paired with whether the seat is the hero's.
    pub fn seats(&self) -> impl Iterator<Item = (&SeatProfile, bool)> {
        std::iter::once((&self.hero, true)).chain(self.bots.iter().map(|bot| (bot, false)))
    }
}

/// A seated player and their state within the current hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub title: String,
    pub seat: usize,
    /// Chips owned.
    pub stack: u32,
    /// Chips committed on the current street.
    pub bet: u32,
    pub status: String,
    pub folded: bool,
    pub is_hero: bool,
    pub hand: [Card; 2],
}

impl Player {
    pub fn seat(
        profile: &SeatProfile,
        seat: usize,
        stack: u32,
        is_hero: bool,
        hand: [Card; 2],
    ) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            avatar: profile.avatar.clone(),
            title: profile.title.clone(),
            seat,
            stack,
            bet: 0,
            status: "Waiting".to_string(),
            folded: false,
            is_hero,
            hand,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.folded
    }
}
