// Classifier - pitch-threshold gender classification
//
// A single hard threshold on mean pitch: strictly above the threshold is
// Female, at or below is Male. No hysteresis and no confidence score.

use std::fmt;

/// Mean pitch (Hz) above which a voice is classified Female
pub const GENDER_THRESHOLD_HZ: f32 = 160.0;

/// Coarse voice gender label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier applies the pitch threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenderClassifier {
    threshold_hz: f32,
}

impl GenderClassifier {
    pub fn new(threshold_hz: f32) -> Self {
        Self { threshold_hz }
    }

    pub fn threshold_hz(&self) -> f32 {
        self.threshold_hz
    }

    /// Female iff `mean_pitch_hz > threshold`
    pub fn classify(&self, mean_pitch_hz: f32) -> Gender {
        if mean_pitch_hz > self.threshold_hz {
            Gender::Female
        } else {
            Gender::Male
        }
    }
}

impl Default for GenderClassifier {
    fn default() -> Self {
        Self::new(GENDER_THRESHOLD_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_tie_maps_to_male() {
        let classifier = GenderClassifier::default();
        assert_eq!(classifier.classify(160.0), Gender::Male);
    }

    #[test]
    fn test_just_above_threshold_is_female() {
        let classifier = GenderClassifier::default();
        let above = f32::from_bits(160.0f32.to_bits() + 1);
        assert_eq!(classifier.classify(above), Gender::Female);
        assert_eq!(classifier.classify(220.0), Gender::Female);
    }

    #[test]
    fn test_below_threshold_is_male() {
        let classifier = GenderClassifier::default();
        assert_eq!(classifier.classify(159.99), Gender::Male);
        assert_eq!(classifier.classify(85.0), Gender::Male);
    }

    #[test]
    fn test_custom_threshold() {
        let classifier = GenderClassifier::new(200.0);
        assert_eq!(classifier.threshold_hz(), 200.0);
        assert_eq!(classifier.classify(180.0), Gender::Male);
        assert_eq!(classifier.classify(201.0), Gender::Female);
    }

    #[test]
    fn test_gender_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"Female\"");
        assert_eq!(Gender::Male.to_string(), "Male");
    }
}
