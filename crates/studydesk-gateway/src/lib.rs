//! # StudyDesk Gateway
//!
//! Axum router in front of the task and study-time services.
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/tasks` | all tasks |
//! | POST | `/tasks` | create `{subject, color?, completed?}` |
//! | PUT | `/tasks/{id}` | set `{completed}` |
//! | DELETE | `/tasks/{id}` | remove |
//! | GET | `/study-time` | all entries |
//! | POST | `/study-time` | append `{subject, timeSpent}` |
//! | GET | `/health` | liveness |

pub mod routes;
pub mod server;

pub use server::{AppState, build_router, start};
