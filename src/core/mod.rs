//! Core domain models
//!
//! Job identity, the build context threaded through the pipeline, the
//! stage list, and the two pure helpers used at the pipeline edges.

pub mod config;
pub mod context;
pub mod identity;
pub mod params;
pub mod result_code;
pub mod stage;
pub mod state;

pub use config::TriggerConfig;
pub use context::BuildContext;
pub use identity::{ConfigError, Credentials, JobIdentity};
pub use params::parse_params;
pub use result_code::exit_code_for;
pub use stage::{Stage, Verbosity};
pub use state::{StageRecord, StageStatus};
