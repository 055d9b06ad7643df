//! Stem naming for produced output files.
//!
//! Every separation request writes its stems under one output directory,
//! named `<kind>_<request_id>.wav`. The download route only serves names
//! that parse back into this shape, which doubles as path-traversal
//! protection.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The isolated sources a separation request produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StemKind {
    /// Isolated vocal track.
    Vocals,
    /// Everything that is not vocals.
    Background,
    /// Denoised full mix, before separation.
    Clean,
}

impl StemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StemKind::Vocals => "vocals",
            StemKind::Background => "background",
            StemKind::Clean => "clean",
        }
    }

    /// File name for this stem under a given request id.
    pub fn file_name(&self, request_id: Uuid) -> String {
        format!("{}_{}.wav", self.as_str(), request_id)
    }
}

/// A downloadable file name failed validation.
#[derive(Debug, Error)]
#[error("invalid stem file name: {0}")]
pub struct InvalidStemName(pub String);

/// Parse a client-supplied file name back into `(kind, request_id)`.
///
/// Anything that is not exactly `<kind>_<uuid>.wav` is rejected, so names
/// containing separators or `..` can never reach the filesystem.
pub fn parse_stem_file_name(name: &str) -> Result<(StemKind, Uuid), InvalidStemName> {
    let stem = name
        .strip_suffix(".wav")
        .ok_or_else(|| InvalidStemName(name.to_string()))?;

    let (kind_str, id_str) = stem
        .split_once('_')
        .ok_or_else(|| InvalidStemName(name.to_string()))?;

    let kind = match kind_str {
        "vocals" => StemKind::Vocals,
        "background" => StemKind::Background,
        "clean" => StemKind::Clean,
        _ => return Err(InvalidStemName(name.to_string())),
    };

    let id = Uuid::parse_str(id_str).map_err(|_| InvalidStemName(name.to_string()))?;

    Ok((kind, id))
}
