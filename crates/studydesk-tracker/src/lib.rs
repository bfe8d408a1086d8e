//! # StudyDesk Tracker
//!
//! The two collections behind the StudyDesk API and the services that own
//! their semantics.
//!
//! ## Architecture
//! ```text
//! TaskService ──┐                  ┌── FileBlob   (tasks.json, study_time.json)
//!               ├── Collection<T> ─┤
//! StudyService ─┘                  └── MemoryBlob (tests)
//! ```
//!
//! Every operation loads the whole collection, mutates it in memory and
//! writes it back. Writes replace the file atomically. Concurrent cycles on
//! the same collection race (last writer wins) unless the collection was
//! opened with `serialize_writes`.

pub mod store;
pub mod study;
pub mod tasks;

pub use store::{BlobStore, Collection, FileBlob, MemoryBlob};
pub use study::StudyService;
pub use tasks::TaskService;
