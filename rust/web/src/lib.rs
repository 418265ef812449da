//! HTTP surface of the Nebula Hold'em table: configuration, persistence, the
//! shared table session and the warp routes that expose it.

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod session;
pub mod store;

pub use auth::{AuthError, UserProfile, UserRecord, HERO_ID};
pub use config::{ConfigError, ConfigOverrides, ConfigResolved, ServerConfig, ValueSource};
pub use errors::{ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use logging::{init_logging, LogEntry, TestLogSubscriber};
pub use middleware::{log_response, with_request_logging};
pub use server::{routes, AppContext, ServerError, ServerHandle, WebServer};
pub use session::{SessionError, TableSession};
pub use store::{JsonFileStore, MemoryStore, StoreError, TableStore};
