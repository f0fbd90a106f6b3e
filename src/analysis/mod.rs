//! Scoring, result records and session aggregation
//!
//! Shared machinery every channel depends on:
//! - Range scoring against ideal intervals
//! - Result types for text, frames, clips and sessions
//! - Cross-sample statistics (mean, spread, mode)
//! - Session aggregation and the channel boundary record

pub mod aggregate;
pub mod channels;
pub mod range;
pub mod result;
pub mod stats;
