//! FFmpeg process discovery and invocation.

use std::path::PathBuf;

use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Create an FFmpeg command with quiet defaults.
///
/// Callers append their own `-i`/output arguments; stderr is kept so a
/// failing run can surface FFmpeg's own diagnostics.
pub fn create_ffmpeg_command() -> MediaResult<Command> {
    let path = check_ffmpeg()?;
    let mut command = Command::new(path);
    command.arg("-hide_banner").arg("-loglevel").arg("error");
    Ok(command)
}
