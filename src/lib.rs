//! Unboxing API - role-based records service
//!
//! Staff authenticate with opaque bearer tokens, every route is gated by a
//! single permission code resolved from the caller's role, and record updates
//! use a version check instead of locks.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Records, credentials, tokens, roles and permissions
//! - **services**: Token issuance, the authorization gate and record use cases
//! - **infra**: Database, migrations, repositories and the store context
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Credential, Permissions, Role, Token, User};
pub use errors::{AppError, AppResult};
pub use infra::{DataStore, Persistence};
