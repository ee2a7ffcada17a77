//! Core engine for the Clara parish assistant.
//!
//! Answers free-text questions by scoring them against a curated knowledge
//! base of trigger keywords and canned responses. Every front end consumes
//! the same three pieces: the loader (`base`), the scoring engine
//! (`matcher`), and the shared snapshot handle (`store`). Front ends differ
//! only in how they obtain the question and render the response.

pub mod base;
pub mod config;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod store;

pub use base::{Entry, KnowledgeBase};
pub use config::ClaraConfig;
pub use error::ClaraError;
pub use matcher::{answer, best_match, BestMatch};
pub use normalize::{normalize, Normalized};
pub use store::KnowledgeStore;
