//! Query Strategy Module
//!
//! - Query: single and multi-cursor queries, reverse lookup
//! - Parallel: many offsets of one document across the Rayon pool

pub mod parallel;
pub mod query;

pub use parallel::{segments_parallel, xpaths_parallel};
pub use query::{join_results, locate, segments_at, QueryContext};
