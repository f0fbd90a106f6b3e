//! Per-channel feature extraction
//!
//! - Text: sentiment, confidence markers, clarity, keywords
//! - Visual: face evidence to eye contact, expression and head position
//! - Vocal: speech rate, pitch, volume, pauses and harmonic clarity

pub mod text;
pub mod visual;
pub mod vocal;
