//! Temporary storage for uploaded audio
//!
//! The presentation layer receives an audio file as raw bytes. The bytes are
//! staged in a temporary file with a `.wav` suffix regardless of their real
//! encoding, analyzed from that path, and the file is removed before the
//! result is returned, on success and on failure alike.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::analysis::{FeatureExtractor, FeatureReport};
use crate::error::{AnalysisError, ProcessingError};

/// Prefix given to every staged upload
pub const UPLOAD_PREFIX: &str = "voice-upload-";

/// Suffix given to every staged upload
pub const UPLOAD_SUFFIX: &str = ".wav";

/// An uploaded file staged on disk
///
/// The file is deleted by [`TempUpload::cleanup`] or, failing that, when
/// the value is dropped.
pub struct TempUpload {
    file: NamedTempFile,
}

impl TempUpload {
    /// Write `bytes` to a fresh `.wav`-suffixed file in the system temp dir
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProcessingError> {
        Self::from_bytes_in(bytes, &std::env::temp_dir())
    }

    /// Write `bytes` to a fresh `.wav`-suffixed file inside `dir`
    pub fn from_bytes_in(bytes: &[u8], dir: &Path) -> Result<Self, ProcessingError> {
        let mut file = tempfile::Builder::new()
            .prefix(UPLOAD_PREFIX)
            .suffix(UPLOAD_SUFFIX)
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        log::debug!(
            "[Upload] Staged {} bytes at {}",
            bytes.len(),
            file.path().display()
        );
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the staged file now
    ///
    /// A failed delete is logged; the drop guard has already been consumed,
    /// so nothing retries it.
    pub fn cleanup(self) {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => log::debug!("[Upload] Removed {}", path.display()),
            Err(err) => log::warn!("[Upload] Failed to remove {}: {}", path.display(), err),
        }
    }
}

/// Stage `bytes`, run the extractor on the staged file, then remove it
///
/// The temporary file never outlives this call, whatever the outcome.
pub fn analyze_upload(
    extractor: &FeatureExtractor,
    bytes: &[u8],
) -> Result<FeatureReport, AnalysisError> {
    analyze_upload_in(extractor, bytes, &std::env::temp_dir())
}

/// [`analyze_upload`] staging the file inside `dir`
pub fn analyze_upload_in(
    extractor: &FeatureExtractor,
    bytes: &[u8],
    dir: &Path,
) -> Result<FeatureReport, AnalysisError> {
    let upload = TempUpload::from_bytes_in(bytes, dir)?;
    let result = extractor.extract_from_path(upload.path());
    upload.cleanup();

    if let Err(err) = &result {
        err.log("analyze_upload");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_has_wav_suffix_and_contents() {
        let upload = TempUpload::from_bytes(b"ID3 pretend mp3").unwrap();
        let path = upload.path().to_path_buf();

        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("wav"));
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3 pretend mp3");

        upload.cleanup();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_file() {
        let path = {
            let upload = TempUpload::from_bytes(&[1, 2, 3]).unwrap();
            upload.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_analyze_upload_rejects_garbage() {
        let extractor = FeatureExtractor::new();
        let result = analyze_upload(&extractor, b"this is not audio at all");
        assert!(matches!(result, Err(AnalysisError::Decode(_))));
    }

    #[test]
    fn test_failed_analysis_leaves_dir_empty() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = FeatureExtractor::new();

        let result = analyze_upload_in(&extractor, b"RIFF but not really", dir.path());

        assert!(matches!(result, Err(AnalysisError::Decode(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_staging_dir_is_processing_error() {
        let extractor = FeatureExtractor::new();
        let result = analyze_upload_in(&extractor, b"x", Path::new("/nonexistent/staging"));
        assert!(matches!(
            result,
            Err(AnalysisError::Processing(ProcessingError::TempFile { .. }))
        ));
    }

    #[test]
    fn test_analyze_upload_rejects_empty_bytes() {
        let extractor = FeatureExtractor::new();
        let result = analyze_upload(&extractor, &[]);
        assert!(matches!(result, Err(AnalysisError::Decode(_))));
    }
}
