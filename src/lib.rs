// Voice Analyzer Core - acoustic feature extraction from short recordings
// Decodes an uploaded file, tracks pitch and frame features, labels gender

// Module declarations
pub mod analysis;
pub mod audio;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod upload;

// Re-exports for convenience
pub use analysis::classifier::{Gender, GenderClassifier};
pub use analysis::{FeatureExtractor, FeatureReport};
pub use audio::AudioSignal;
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, DecodeError, ErrorCode, ProcessingError};
pub use session::{SessionError, WizardState};
pub use upload::{analyze_upload, analyze_upload_in, TempUpload};
