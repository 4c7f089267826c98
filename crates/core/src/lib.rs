//! prompt-optimizer-rs: core of the prompt optimizer tool
//!
//! Rewrites a user prompt for a chosen category and keeps a local history
//! of saved rewrites:
//! - Optimize: category rule table, improvements and suggestions
//! - History: save, list, rate, delete, search and stats
//!
//! ## Architecture
//!
//! - **optimizer**: pure rule table plus an async `optimize` with a
//!   configurable simulated latency
//! - **store**: newest-first record list persisted as one JSON blob through
//!   a swappable [`store::StorageBackend`]
//! - **service**: the boundary the optimize/history views call
//! - **commands**: name-based JSON dispatch for a host UI, backed by a
//!   process-wide service installed with [`commands::setup`]

// Module declarations
pub mod commands;
pub mod config;
pub mod errors;
pub mod history;
pub mod optimizer;
pub mod runtime;
pub mod service;
pub mod store;

pub use config::Config;
pub use errors::{OptimizerError, Result};
pub use history::{HistoryQuery, HistoryStats, SortOrder};
pub use optimizer::{Category, OptimizationRequest, OptimizationResponse, Optimizer, Target};
pub use service::PromptService;
pub use store::{CorruptStatePolicy, FileBackend, MemoryBackend, Record, RecordStore, StorageBackend};
