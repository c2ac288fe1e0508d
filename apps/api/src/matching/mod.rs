//! Scoring: embedding similarity ranking and skill filtering.

pub mod handlers;
pub mod ranker;
pub mod skills;
