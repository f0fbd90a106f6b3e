//! Score an interview answer from the command line
//!
//! ```text
//! cargo run --example score_answer -- "answer text" [clip.wav ...] [frame.png ...]
//! ```
//!
//! Files ending in `.wav`, `.flac` or `.ogg` are treated as clips, anything
//! else as frames. Frames are analyzed without a face detector. Set
//! `RUST_LOG=debug` for per-stage metrics.

use std::path::Path;

use interview_signals::{AnswerSamples, EngineConfig, NoFaceDetector, SignalEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let text = args.next();

    let mut answer = AnswerSamples {
        text,
        ..AnswerSamples::default()
    };
    for path in args {
        let bytes = std::fs::read(&path)?;
        let is_clip = Path::new(&path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_ascii_lowercase().as_str(), "wav" | "flac" | "ogg"))
            .unwrap_or(false);
        if is_clip {
            answer.clips.push(bytes);
        } else {
            answer.frames.push(bytes);
        }
    }

    let engine = SignalEngine::new(EngineConfig::default(), Box::new(NoFaceDetector))?;
    let scores = engine.score_answer(&answer);

    for sub in scores.sub_scores() {
        println!("{:?}/{}: {:.1}", sub.channel, sub.metric, sub.value);
    }
    println!("{}", serde_json::to_string_pretty(&scores)?);

    Ok(())
}
