//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CoreConfig (validated, immutable)
//!     → shared via Arc with the orchestrator
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Signing secrets never live in the config file (see `ledger::identity`)

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    CoreConfig, FeeConfig, LeafResolutionConfig, LedgerConfig, ObservabilityConfig,
    SubmissionConfig,
};
pub use validation::{validate_config, ValidationError};
