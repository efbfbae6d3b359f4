//! Embedding-driven clue generation.
//!
//! - `config`: `ClueConfig` (neighbour count, filters, count policy)
//! - `scoring`: relevance/danger score of one candidate
//! - `engine`: `ClueEngine`, candidate retrieval, filtering and selection

pub mod config;
pub mod scoring;
pub mod engine;

pub use config::ClueConfig;
pub use scoring::{clue_score, score_candidate, ScoredCandidate};
pub use engine::ClueEngine;
