use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use nebula_engine::deck::Deck;
use nebula_engine::engine::{ActionOutcome, BettingEngine};
use nebula_engine::errors::GameError;
use nebula_engine::hand::StandardRanker;
use nebula_engine::player::Roster;
use nebula_engine::policy::BotPolicy;
use nebula_engine::rules::HeroAction;
use nebula_engine::table::{Stage, TableState};
use nebula_engine::view::TableView;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde_json::json;
use thiserror::Error;
use warp::http::StatusCode;

use crate::auth::{self, UserProfile, UserRecord};
use crate::errors::{ErrorSeverity, IntoErrorResponse};
use crate::store::TableStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Session storage poisoned")]
    StoragePoisoned,
}

impl IntoErrorResponse for SessionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SessionError::Game(GameError::DeckExhausted)
            | SessionError::Game(GameError::InvalidRoster(_))
            | SessionError::StoragePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
            SessionError::Game(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SessionError::Game(err) => match err {
                GameError::DeckExhausted => "deck_exhausted",
                GameError::InvalidAction(_) => "invalid_action",
                GameError::TableIdle => "table_idle",
                GameError::InactiveHero => "inactive_hero",
                GameError::HandComplete => "hand_complete",
                GameError::InvalidRoster(_) => "invalid_roster",
            },
            SessionError::StoragePoisoned => "session_storage_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            SessionError::Game(GameError::InvalidAction(action)) => Some(json!({
                "action": action,
                "allowed": HeroAction::ALL.iter().map(|a| a.as_str()).collect::<Vec<_>>(),
            })),
            _ => None,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::Game(err) if err.is_fatal() => ErrorSeverity::Critical,
            _ if self.status_code().is_server_error() => ErrorSeverity::Server,
            _ => ErrorSeverity::Client,
        }
    }
}

struct SessionInner {
    table: TableState,
    rng: ChaCha20Rng,
}

/// Owner of the single table. Every command holds the lock for its whole run,
/// so commands never interleave.
pub struct TableSession {
    store: Arc<dyn TableStore>,
    policy: Box<dyn BotPolicy>,
    ranker: StandardRanker,
    inner: Mutex<SessionInner>,
}

impl fmt::Debug for TableSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableSession")
            .field("policy", &self.policy.name())
            .finish_non_exhaustive()
    }
}

impl TableSession {
    /// Loads the stored snapshot, falling back to a fresh idle table when there is
    /// none or it cannot be read.
    pub fn open(store: Arc<dyn TableStore>, policy: Box<dyn BotPolicy>, seed: Option<u64>) -> Self {
        let table = match store.load_table() {
            Ok(Some(table)) if !table.cards_are_disjoint() => {
                tracing::warn!("table snapshot repeats cards, starting idle table");
                let table = TableState::empty();
                persist(store.as_ref(), &table);
                table
            }
            Ok(Some(table)) => {
                tracing::info!(stage = table.stage.as_str(), pot = table.pot, "restored table snapshot");
                table
            }
            Ok(None) => {
                tracing::info!("no table snapshot found, starting idle table");
                let table = TableState::empty();
                persist(store.as_ref(), &table);
                table
            }
            Err(err) => {
                tracing::warn!(error = %err, "table snapshot unreadable, starting idle table");
                let table = TableState::empty();
                persist(store.as_ref(), &table);
                table
            }
        };

        let rng = match seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_rng(&mut rand::rng()),
        };

        tracing::debug!(policy = policy.name(), seeded = seed.is_some(), "table session opened");
        Self {
            store,
            policy,
            ranker: StandardRanker,
            inner: Mutex::new(SessionInner { table, rng }),
        }
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionInner>, SessionError> {
        self.inner.lock().map_err(|_| SessionError::StoragePoisoned)
    }

    fn engine(&self) -> BettingEngine<'_> {
        BettingEngine::new(self.policy.as_ref(), &self.ranker)
    }

    fn users(&self) -> Vec<UserRecord> {
        self.store.load_users().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "user directory unreadable");
            Vec::new()
        })
    }

    /// Shuffles a fresh deck and deals a new hand to the hero and the bots.
    pub fn start_new_hand(&self) -> Result<TableView, SessionError> {
        let hero = auth::hero_profile(&self.users());
        let roster = Roster::new(hero.seat_profile());

        let mut inner = self.lock()?;
        let deck = Deck::build(&mut inner.rng);
        let table = self.engine().start_new_hand(&inner.table, &roster, deck)?;
        inner.table = table;

        tracing::info!(
            hero = %hero.name,
            players = inner.table.players.len(),
            pot = inner.table.pot,
            "new hand dealt"
        );
        persist(self.store.as_ref(), &inner.table);
        Ok(TableView::from(&inner.table))
    }

    /// Parses and applies a hero command, returning the view it produced.
    /// Rejected commands leave the table as it was.
    pub fn apply_hero_action(&self, raw: &str) -> Result<(ActionOutcome, TableView), SessionError> {
        let action: HeroAction = raw.parse()?;

        let mut inner = self.lock()?;
        let outcome = self.engine().apply_hero_action(&mut inner.table, action)?;

        tracing::debug!(
            action = action.as_str(),
            stage = outcome.stage.as_str(),
            pot = inner.table.pot,
            "hero action applied"
        );
        if let (Stage::Showdown, Some(winner)) = (outcome.stage, &inner.table.winner) {
            tracing::info!(
                winners = %winner.players.join(" & "),
                amount = winner.amount,
                method = ?winner.method,
                "hand settled"
            );
        }
        persist(self.store.as_ref(), &inner.table);
        Ok((outcome, TableView::from(&inner.table)))
    }

    /// The table as clients may see it.
    pub fn sanitized_state(&self) -> Result<TableView, SessionError> {
        let inner = self.lock()?;
        Ok(TableView::from(&inner.table))
    }

    pub fn resolve_login(&self, email: &str, password: &str) -> Option<UserProfile> {
        auth::resolve_login(&self.users(), email, password)
    }
}

fn persist(store: &dyn TableStore, table: &TableState) {
    if let Err(err) = store.save_table(table) {
        tracing::error!(error = %err, "failed to persist table snapshot");
    }
}
