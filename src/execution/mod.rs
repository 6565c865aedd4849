//! Pipeline execution

pub mod delay;
pub mod engine;
pub mod executor;
pub mod ticker;

pub use delay::delay;
pub use engine::{BuildOutcome, EventHandler, StageFailure, TriggerEngine, TriggerEvent};
pub use executor::{StageError, StageExecutor, StageResult};
pub use ticker::ProgressTicker;
