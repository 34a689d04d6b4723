//! # nocrastination Core Library
//!
//! Core business logic for the nocrastination productivity tracker:
//! tasks, pomodoro sessions, per-day productivity stats, and a synthetic
//! data generator for development datasets. The CLI binary is a thin layer
//! over this library.
//!
//! ## Architecture
//!
//! - **Entities**: typed records for users, profiles, tasks, sessions, and
//!   daily stats, with upper-case wire enumerations
//! - **Schema registry**: declarative field constraints checked by the
//!   storage layer at write time
//! - **Storage**: SQLite-based persistence and TOML-based configuration;
//!   the [`Store`] trait is the contract the seeder and aggregator receive
//!   explicitly (no ambient storage instance)
//! - **Seeder**: reproducible generator of internally consistent sample
//!   data (seeded PCG RNG)
//! - **Productivity**: per-user, per-day rollups with a configurable
//!   scoring policy
//!
//! ## Key Components
//!
//! - [`Database`]: SQLite storage with cascading deletes
//! - [`Seeder`]: synthetic dataset generation
//! - [`ProductivityAggregator`]: daily stat computation
//! - [`Config`]: scoring policy and seed defaults

pub mod entity;
pub mod error;
pub mod productivity;
pub mod schema;
pub mod seed;
pub mod storage;

pub use entity::{DailyStat, PomodoroSession, SessionType, Task, TaskPriority, TaskStatus, User, UserProfile};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use productivity::{ProductivityAggregator, ScorePolicy};
pub use schema::{schema, EntityKind, EntitySchema, FieldRule};
pub use seed::{SeedConfig, SeedSummary, Seeder};
pub use storage::{Config, Database, ResetSummary, SessionRollup, Store};
