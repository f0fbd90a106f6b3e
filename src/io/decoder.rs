//! Audio decoding using Symphonia

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::ScoringError;
use crate::preprocessing::channel_mixer::downmix_interleaved;
use crate::preprocessing::resampling::resample;

/// Decoded mono waveform
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Mono samples, nominally in [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl Waveform {
    /// Duration in seconds (0 for a zero rate)
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Decode an encoded audio clip to a mono waveform
///
/// The container and codec are probed from the bytes. Multi-channel audio is
/// averaged down to mono.
///
/// # Arguments
///
/// * `bytes` - Encoded clip (WAV, FLAC, Ogg/Vorbis, ...)
///
/// # Errors
///
/// Returns `ScoringError::DecodingError` if the clip cannot be probed or decoded
pub fn decode_audio(bytes: &[u8]) -> Result<Waveform, ScoringError> {
    log::debug!("Decoding audio clip: {} bytes", bytes.len());

    let source = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());
    let probed = symphonia::default::get_probe().format(
        &Hint::new(),
        source,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| ScoringError::DecodingError("no decodable audio track".to_string()))?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| ScoringError::DecodingError("unknown sample rate".to_string()))?;
    let mut channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut interleaved: Vec<f32> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                channels = spec.channels.count();
                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                interleaved.extend_from_slice(buffer.samples());
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                log::warn!("Skipping corrupt audio packet: {}", msg);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let samples = downmix_interleaved(&interleaved, channels)?;
    log::debug!(
        "Decoded {} mono samples at {} Hz ({} channels)",
        samples.len(),
        sample_rate,
        channels
    );

    Ok(Waveform {
        samples,
        sample_rate,
    })
}

/// Decode a clip and bring it to `target_sample_rate`
///
/// # Errors
///
/// `DecodingError` for malformed clips, `ProcessingError` if resampling fails
pub fn decode_audio_at(bytes: &[u8], target_sample_rate: u32) -> Result<Waveform, ScoringError> {
    let decoded = decode_audio(bytes)?;
    if decoded.sample_rate == target_sample_rate {
        return Ok(decoded);
    }
    let samples = resample(&decoded.samples, decoded.sample_rate, target_sample_rate)?;
    Ok(Waveform {
        samples,
        sample_rate: target_sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decode_mono_wav() {
        let samples: Vec<i16> = (0..1600).map(|i| ((i % 100) as i16 - 50) * 300).collect();
        let waveform = decode_audio(&wav_bytes(&samples, 16_000, 1)).unwrap();
        assert_eq!(waveform.sample_rate, 16_000);
        assert_eq!(waveform.samples.len(), 1600);
        assert!((waveform.duration_seconds() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_decode_stereo_wav_downmixes() {
        let samples: Vec<i16> = (0..800).flat_map(|_| [16_384i16, 0]).collect();
        let waveform = decode_audio(&wav_bytes(&samples, 8_000, 2)).unwrap();
        assert_eq!(waveform.samples.len(), 800);
        assert!(waveform.samples.iter().all(|&s| (s - 0.25).abs() < 1e-3));
    }

    #[test]
    fn test_decode_resamples_to_target() {
        let samples = vec![0i16; 8_000];
        let waveform = decode_audio_at(&wav_bytes(&samples, 8_000, 1), 16_000).unwrap();
        assert_eq!(waveform.sample_rate, 16_000);
        assert!((waveform.samples.len() as i64 - 16_000).abs() < 800);
    }

    #[test]
    fn test_garbage_is_decoding_error() {
        assert!(matches!(
            decode_audio(b"definitely not audio"),
            Err(ScoringError::DecodingError(_))
        ));
    }
}
