//! Hand tracks — recorded landmark frames, one JSON object per line.
//!
//! Each non-blank line is a serialized [`HandLandmarks`]. A track stands in
//! for a live hand tracker: replaying it frame by frame produces the same
//! gesture pulses a camera feed would.

use std::path::Path;

use axpulse_domain::gesture::HandLandmarks;

/// Parse a JSON Lines hand track. Blank lines are ignored.
///
/// # Errors
///
/// Returns [`TrackError::Parse`] with the 1-based line number of the first
/// malformed frame.
pub fn from_jsonl(content: &str) -> Result<Vec<HandLandmarks>, TrackError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| TrackError::Parse {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Read and parse a hand track file.
///
/// # Errors
///
/// Returns [`TrackError::Io`] if the file cannot be read, otherwise as
/// [`from_jsonl`].
pub fn load(path: impl AsRef<Path>) -> Result<Vec<HandLandmarks>, TrackError> {
    let content = std::fs::read_to_string(path)?;
    from_jsonl(&content)
}

/// Errors raised while loading a hand track.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("failed to read hand track")]
    Io(#[from] std::io::Error),

    #[error("invalid landmarks on line {line}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
