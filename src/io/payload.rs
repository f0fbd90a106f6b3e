//! Base64 payload unwrapping
//!
//! Browsers hand frames and clips over as `data:<mime>;base64,<body>` URLs;
//! plain base64 bodies are accepted too.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::ScoringError;

/// Decode a base64 body, stripping an optional `data:` URL header
///
/// # Errors
///
/// Returns `ScoringError::DecodingError` when the body is empty or not valid base64.
///
/// # Example
///
/// ```
/// use interview_signals::io::payload::decode_base64_payload;
///
/// let bytes = decode_base64_payload("data:text/plain;base64,aGk=")?;
/// assert_eq!(bytes, b"hi");
/// # Ok::<(), interview_signals::ScoringError>(())
/// ```
pub fn decode_base64_payload(payload: &str) -> Result<Vec<u8>, ScoringError> {
    let body = match payload.split_once(',') {
        Some((_header, body)) => body,
        None => payload,
    };

    // Line breaks are common in pasted payloads
    let body: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if body.is_empty() {
        return Err(ScoringError::DecodingError("empty payload".to_string()));
    }

    let bytes = STANDARD.decode(body.as_bytes())?;
    log::debug!("Decoded base64 payload: {} bytes", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_body() {
        assert_eq!(decode_base64_payload("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_data_url_with_line_breaks() {
        let bytes = decode_base64_payload("data:audio/wav;base64,aGVs\nbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_malformed_is_decoding_error() {
        assert!(matches!(
            decode_base64_payload("data:image/png;base64,***"),
            Err(ScoringError::DecodingError(_))
        ));
        assert!(matches!(
            decode_base64_payload("data:image/png;base64,"),
            Err(ScoringError::DecodingError(_))
        ));
    }
}
