//! Storage for produced stem files.
//!
//! Stems live as WAVs in one configured directory, named by stem kind and
//! request id. The store is the only component that maps client-visible
//! file names to paths, and it only accepts names that parse back into
//! the stem naming scheme.

use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;
use vsep_media::{write_wav, AudioBuffer, MediaResult};
use vsep_models::stem::parse_stem_file_name;
use vsep_models::{StemFiles, StemKind};
use vsep_separator::SeparatedStems;

use crate::error::{ApiError, ApiResult};

/// Writes and resolves stem WAV files under one directory.
#[derive(Debug, Clone)]
pub struct OutputStore {
    dir: PathBuf,
}

impl OutputStore {
    /// Create the store, making sure the directory exists.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write all three stems for a request; returns their file names.
    ///
    /// Blocking: call from `spawn_blocking` in async context.
    pub fn write_stems(
        &self,
        request_id: Uuid,
        stems: &SeparatedStems,
        clean: &AudioBuffer,
    ) -> MediaResult<StemFiles> {
        let files = StemFiles::for_request(request_id);

        write_wav(&self.dir.join(&files.vocals), &stems.vocals)?;
        write_wav(&self.dir.join(&files.background), &stems.background)?;
        write_wav(&self.dir.join(&files.clean), clean)?;

        debug!(request_id = %request_id, dir = %self.dir.display(), "Wrote stem files");

        Ok(files)
    }

    /// Resolve a client-supplied file name to a path.
    ///
    /// Rejects anything that is not a well-formed stem name, which keeps
    /// traversal sequences out of the filesystem entirely.
    pub fn resolve(&self, file_name: &str) -> ApiResult<(StemKind, PathBuf)> {
        let (kind, _) = parse_stem_file_name(file_name)
            .map_err(|_| ApiError::bad_request("invalid file name"))?;
        Ok((kind, self.dir.join(file_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn stems(len: usize) -> SeparatedStems {
        SeparatedStems {
            vocals: AudioBuffer::new(vec![0.5; len], 22050).unwrap(),
            background: AudioBuffer::new(vec![0.1; len], 22050).unwrap(),
        }
    }

    #[test]
    fn test_write_stems_creates_files() {
        let dir = tempdir().unwrap();
        let store = OutputStore::new(dir.path()).unwrap();
        let id = Uuid::new_v4();
        let clean = AudioBuffer::new(vec![0.2; 100], 22050).unwrap();

        let files = store.write_stems(id, &stems(100), &clean).unwrap();

        assert!(dir.path().join(&files.vocals).exists());
        assert!(dir.path().join(&files.background).exists());
        assert!(dir.path().join(&files.clean).exists());
    }

    #[test]
    fn test_resolve_valid_name() {
        let dir = tempdir().unwrap();
        let store = OutputStore::new(dir.path()).unwrap();
        let name = StemKind::Vocals.file_name(Uuid::new_v4());

        let (kind, path) = store.resolve(&name).unwrap();
        assert_eq!(kind, StemKind::Vocals);
        assert!(path.starts_with(dir.path()));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = tempdir().unwrap();
        let store = OutputStore::new(dir.path()).unwrap();

        assert!(store.resolve("../../etc/passwd").is_err());
        assert!(store.resolve("clean_audio.wav").is_err());
        assert!(store.resolve("vocals_notauuid.wav").is_err());
    }
}
