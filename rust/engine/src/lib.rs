//! # nebula-engine: single-table Hold'em core
//!
//! The table model, betting state machine and showdown resolution behind the
//! Nebula feature table. One human hero plays against a fixed line-up of bots;
//! the engine itself is synchronous and holds no I/O.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation and display faces
//! - [`deck`] - Shuffled 52-card deck with burn/draw
//! - [`engine`] - Stage machine and hero/bot action handling
//! - [`hand`] - Five-card ranking behind the [`hand::HandRanker`] seam
//! - [`showdown`] - Best-five selection and tie resolution
//! - [`player`] - Seat profiles, roster and per-hand player state
//! - [`policy`] - The [`policy::BotPolicy`] seam bots answer through
//! - [`pot`] - Chip movement and pot splitting
//! - [`rules`] - Blinds, street bet sizes and the hero's command set
//! - [`table`] - The persisted table snapshot and its log
//! - [`view`] - Masked projection sent to clients
//! - [`errors`] - Error types for game operations
//!
//! ## Deterministic Dealing
//!
//! ```rust
//! use nebula_engine::deck::Deck;
//!
//! let a = Deck::new_with_seed(42);
//! let b = Deck::new_with_seed(42);
//! assert_eq!(a.cards(), b.cards());
//! assert_eq!(a.remaining(), 52);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod player;
pub mod policy;
pub mod pot;
pub mod rules;
pub mod showdown;
pub mod table;
pub mod view;
