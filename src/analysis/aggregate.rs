//! Session aggregation
//!
//! Reduces the per-sample records of one batch into a session summary. An
//! empty batch has no summary (`None`), never a zero-valued one.
//!
//! Samples without the underlying signal (frames without a face, clips
//! without a measurable pitch) are left out of the affected means and
//! reported through a separate coverage ratio instead.

use super::range::{clamp_ratio, clamp_score};
use super::result::{ClipResult, FacialExpression, FrameResult, HeadPosition, VisualAggregate, VocalAggregate};
use super::stats::{coefficient_of_variation, mean, mode};

/// Aggregate a sequence of frame results
///
/// # Example
///
/// ```
/// use interview_signals::analysis::aggregate::aggregate_frames;
/// use interview_signals::FrameResult;
///
/// assert!(aggregate_frames(&[]).is_none());
///
/// let summary = aggregate_frames(&[FrameResult::no_face()]).unwrap();
/// assert_eq!(summary.total_frames, 1);
/// assert_eq!(summary.avg_eye_contact, None);
/// ```
pub fn aggregate_frames(frames: &[FrameResult]) -> Option<VisualAggregate> {
    if frames.is_empty() {
        return None;
    }

    let with_face: Vec<&FrameResult> = frames.iter().filter(|f| f.face_detected).collect();
    let eye_contact: Vec<f32> = with_face.iter().map(|f| f.eye_contact).collect();
    let expression: Vec<f32> = with_face.iter().map(|f| f.expression_score).collect();
    let labels: Vec<FacialExpression> = with_face.iter().map(|f| f.facial_expression).collect();
    let positions: Vec<HeadPosition> = with_face.iter().map(|f| f.head_position).collect();

    let summary = VisualAggregate {
        face_detected_frames: with_face.len(),
        total_frames: frames.len(),
        face_coverage: clamp_ratio(with_face.len() as f32 / frames.len() as f32),
        avg_eye_contact: mean(&eye_contact).map(clamp_score),
        avg_expression_score: mean(&expression).map(clamp_score),
        common_expression: mode(&labels).unwrap_or(FacialExpression::Neutral),
        common_head_position: mode(&positions).unwrap_or(HeadPosition::Centered),
    };

    log::debug!(
        "Aggregated {} frames: coverage={:.2}, eye_contact={:?}, expression={:?}",
        summary.total_frames,
        summary.face_coverage,
        summary.avg_eye_contact,
        summary.common_expression
    );

    Some(summary)
}

/// Aggregate a sequence of clip results
///
/// # Example
///
/// ```
/// use interview_signals::analysis::aggregate::aggregate_clips;
///
/// assert!(aggregate_clips(&[]).is_none());
/// ```
pub fn aggregate_clips(clips: &[ClipResult]) -> Option<VocalAggregate> {
    if clips.is_empty() {
        return None;
    }

    let pitched: Vec<f32> = clips.iter().filter(|c| c.pitch_detected).map(|c| c.pitch).collect();
    let field = |f: fn(&ClipResult) -> f32| -> Vec<f32> { clips.iter().map(f).collect() };

    let summary = VocalAggregate {
        clip_count: clips.len(),
        avg_speech_rate: mean(&field(|c| c.speech_rate)).unwrap_or_default(),
        avg_pitch: mean(&pitched),
        pitch_coverage: clamp_ratio(pitched.len() as f32 / clips.len() as f32),
        avg_volume: mean(&field(|c| c.volume)).unwrap_or_default(),
        avg_pause_ratio: clamp_ratio(mean(&field(|c| c.pause_ratio)).unwrap_or_default()),
        avg_clarity: clamp_score(mean(&field(|c| c.clarity)).unwrap_or_default()),
        avg_total_score: clamp_score(mean(&field(|c| c.total_score)).unwrap_or_default()),
        consistency: consistency(clips),
    };

    log::debug!(
        "Aggregated {} clips: total={:.1}, consistency={:.1}, pitch_coverage={:.2}",
        summary.clip_count,
        summary.avg_total_score,
        summary.consistency,
        summary.pitch_coverage
    );

    Some(summary)
}

/// Cross-clip consistency (0-100)
///
/// `100 - 200 * avg_cv`, where `avg_cv` is the mean coefficient of variation
/// of speech rate, pitch and volume. A single clip is perfectly consistent.
/// Pitch only takes part when at least two clips carry a measured pitch.
pub fn consistency(clips: &[ClipResult]) -> f32 {
    if clips.len() < 2 {
        return 100.0;
    }

    let rates: Vec<f32> = clips.iter().map(|c| c.speech_rate).collect();
    let volumes: Vec<f32> = clips.iter().map(|c| c.volume).collect();
    let pitches: Vec<f32> = clips.iter().filter(|c| c.pitch_detected).map(|c| c.pitch).collect();

    let mut cvs: Vec<f32> = Vec::with_capacity(3);
    cvs.extend(coefficient_of_variation(&rates));
    if pitches.len() >= 2 {
        cvs.extend(coefficient_of_variation(&pitches));
    }
    cvs.extend(coefficient_of_variation(&volumes));

    let avg_cv = mean(&cvs).unwrap_or(0.0);
    clamp_score(100.0 - avg_cv * 200.0)
}
