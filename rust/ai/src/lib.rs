//! # nebula-ai: bot policies for the Nebula table
//!
//! Implementations of the engine's [`BotPolicy`] seam, plus a factory that
//! resolves them by the names used in server configuration.
//!
//! ## Core Components
//!
//! - [`calling_station`] - Matches every bet, never folds (the table default)
//! - [`create_policy`] - Factory resolving a policy by name
//!
//! ## Quick Start
//!
//! ```rust
//! use nebula_ai::create_policy;
//!
//! let policy = create_policy("calling-station").expect("known policy");
//! assert_eq!(policy.name(), "calling-station");
//! assert!(create_policy("tight-aggressive").is_none());
//! ```

pub use nebula_engine::policy::{BotDecision, BotPolicy};

pub mod calling_station;

/// Name of the policy used when configuration does not pick one.
pub const DEFAULT_POLICY: &str = calling_station::NAME;

/// Names accepted by [`create_policy`].
pub fn available_policies() -> &'static [&'static str] {
    &[calling_station::NAME]
}

/// Builds the bot policy registered under `name`.
///
/// An empty name selects [`DEFAULT_POLICY`]. Unknown names return `None`.
///
/// # Example
///
/// ```rust
/// use nebula_ai::create_policy;
///
/// let policy = create_policy(" calling-station ").expect("known policy");
/// assert_eq!(policy.name(), "calling-station");
/// ```
pub fn create_policy(name: &str) -> Option<Box<dyn BotPolicy>> {
    match name.trim() {
        "" | calling_station::NAME => Some(Box::new(calling_station::CallingStation)),
        _ => None,
    }
}
