// Session - linear entry wizard shown before analysis
//
// Welcome (splash) → Consent (privacy disclaimer) → Analyzing (upload and
// results). The wizard only moves forward; there is no way back.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const APP_TITLE: &str = "Voice Analyzer AI";

pub const WELCOME_TEXT: &str = "Welcome! Analyze your voice using smart AI.";

pub const DISCLAIMER_TITLE: &str = "Voice Privacy Disclaimer";

pub const DISCLAIMER_TEXT: &str = "This app uses AI to analyze your voice and predict \
features like gender, pitch, and energy.\nNo data is stored or shared.";

/// Screen currently shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WizardState {
    #[default]
    Welcome,
    Consent,
    Analyzing,
}

impl WizardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardState::Welcome => "Welcome",
            WizardState::Consent => "Consent",
            WizardState::Analyzing => "Analyzing",
        }
    }

    /// Leave the splash screen
    pub fn start(self) -> Result<Self, SessionError> {
        self.advance(WizardState::Welcome, WizardState::Consent)
    }

    /// Accept the privacy disclaimer
    pub fn agree(self) -> Result<Self, SessionError> {
        self.advance(WizardState::Consent, WizardState::Analyzing)
    }

    pub fn can_analyze(&self) -> bool {
        *self == WizardState::Analyzing
    }

    fn advance(self, expected: WizardState, to: WizardState) -> Result<Self, SessionError> {
        if self == expected {
            log::debug!("[Session] {} -> {}", self, to);
            Ok(to)
        } else {
            Err(SessionError::InvalidTransition { from: self, to })
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    InvalidTransition { from: WizardState, to: WizardState },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidTransition { from, to } => {
                write!(f, "Invalid wizard transition from {} to {}", from, to)
            }
        }
    }
}

impl std::error::Error for SessionError {}
