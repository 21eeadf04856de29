//! Shared application service layer for hydrantflow.
//!
//! Gives CLI (and any HTTP front end) one place for record handling,
//! evaluation, result persistence and history queries. Settings and stores
//! are passed in explicitly; nothing here is process-global.

pub mod error;
pub mod evaluate_service;
pub mod query;
pub mod record_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use evaluate_service::{
    EVALUATOR_VERSION, StoredEvaluation, evaluate_and_store, evaluate_batch, evaluate_request,
    evaluate_request_full,
};
pub use query::{HistoryScope, HistorySummary, list_history, summarize};
pub use record_service::{load_record, load_settings, save_record, validate_record};
