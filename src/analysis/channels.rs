//! Channel boundary record
//!
//! The engine stops at well-formed per-channel results. Weighting and
//! combining channels into a presented score belongs to the caller; this
//! module only bundles what each channel produced.

use serde::{Deserialize, Serialize};

use super::result::{TextResult, VisualAggregate, VocalAggregate};

/// Named 0-100 sub-score exposed to the caller's weighting policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubScore {
    /// Channel the score came from
    pub channel: Channel,
    /// Metric name
    pub metric: &'static str,
    /// Score (0-100)
    pub value: f32,
}

/// Input modality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Spoken or typed answer text
    Text,
    /// Facial video frames
    Visual,
    /// Vocal audio clips
    Vocal,
}

/// Results of every channel for one answer; any subset may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelScores {
    /// Text channel result
    pub text: Option<TextResult>,
    /// Visual session summary
    pub visual: Option<VisualAggregate>,
    /// Vocal session summary
    pub vocal: Option<VocalAggregate>,
}

impl ChannelScores {
    /// Whether no channel produced a result
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.visual.is_none() && self.vocal.is_none()
    }

    /// Channels that produced a result
    pub fn present_channels(&self) -> Vec<Channel> {
        let mut channels = Vec::with_capacity(3);
        if self.text.is_some() {
            channels.push(Channel::Text);
        }
        if self.visual.is_some() {
            channels.push(Channel::Visual);
        }
        if self.vocal.is_some() {
            channels.push(Channel::Vocal);
        }
        channels
    }

    /// Flat list of the 0-100 sub-scores available for weighting
    ///
    /// Visual means that are absent (no face in any frame) are omitted rather
    /// than reported as zero.
    pub fn sub_scores(&self) -> Vec<SubScore> {
        let mut scores = Vec::new();
        let mut push = |channel, metric, value| scores.push(SubScore { channel, metric, value });

        if let Some(text) = &self.text {
            push(Channel::Text, "confidence", text.confidence);
            push(Channel::Text, "clarity", text.clarity);
        }
        if let Some(visual) = &self.visual {
            if let Some(eye_contact) = visual.avg_eye_contact {
                push(Channel::Visual, "eye_contact", eye_contact);
            }
            if let Some(expression) = visual.avg_expression_score {
                push(Channel::Visual, "expression", expression);
            }
        }
        if let Some(vocal) = &self.vocal {
            push(Channel::Vocal, "total", vocal.avg_total_score);
            push(Channel::Vocal, "consistency", vocal.consistency);
        }

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::aggregate_frames;
    use crate::analysis::result::FrameResult;

    #[test]
    fn test_empty_scores() {
        let scores = ChannelScores::default();
        assert!(scores.is_empty());
        assert!(scores.present_channels().is_empty());
        assert!(scores.sub_scores().is_empty());
    }

    #[test]
    fn test_text_only() {
        let scores = ChannelScores {
            text: Some(TextResult::empty()),
            ..ChannelScores::default()
        };
        assert_eq!(scores.present_channels(), vec![Channel::Text]);
        let subs = scores.sub_scores();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].metric, "confidence");
        assert_eq!(subs[0].value, 50.0);
    }

    #[test]
    fn test_absent_visual_means_are_omitted() {
        let scores = ChannelScores {
            visual: aggregate_frames(&[FrameResult::no_face()]),
            ..ChannelScores::default()
        };
        assert_eq!(scores.present_channels(), vec![Channel::Visual]);
        assert!(scores.sub_scores().is_empty());
    }
}
