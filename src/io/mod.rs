//! Raw sample decoding
//!
//! Turns encoded payloads into analyzable samples:
//! - base64 / data-URL unwrapping
//! - audio decoding using Symphonia (mono waveform + sample rate)
//! - image decoding to an intensity grid

pub mod decoder;
pub mod frame;
pub mod payload;
