//! # StudyDesk Core
//!
//! Types shared by every StudyDesk crate: configuration, the error
//! taxonomy, the two record models, and the task id sources.

pub mod config;
pub mod error;
pub mod ids;
pub mod models;

pub use config::{GatewayConfig, StorageConfig, StudyDeskConfig};
pub use error::{Result, StudyDeskError};
pub use ids::{IdSource, MonotonicMillis, SequentialIds};
pub use models::{DEFAULT_TASK_COLOR, StudyEntry, Task, is_truthy};
