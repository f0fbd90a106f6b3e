//! Sample preprocessing modules
//!
//! This module contains utilities for preparing samples for analysis:
//! - Channel mixing (interleaved to mono)
//! - Resampling to the analysis rate
//! - Short-time framing and RMS
//! - Voiced/silent interval splitting
//! - Intensity histogram equalization for frames

pub mod channel_mixer;
pub mod equalize;
pub mod framing;
pub mod resampling;
pub mod silence;
