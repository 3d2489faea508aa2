use anyhow::Result;
use image::DynamicImage;
use log::error;
use serde::{Deserialize, Serialize};

/// Raw scores from the underlying emotion model, over its native
/// seven-label vocabulary. Backends run with detection enforcement
/// disabled: a frame with no clearly detected face still yields a
/// best-effort score set instead of failing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeEmotionScores {
    pub angry: f64,
    pub disgust: f64,
    pub fear: f64,
    pub happy: f64,
    pub sad: f64,
    pub surprise: f64,
    pub neutral: f64,
}

/// Percentage breakdown over the simplified four-label vocabulary.
/// All-zero is the explicit failure sentinel, not an absence.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct EmotionDistribution {
    pub neutral: f64,
    pub happy: f64,
    pub surprise: f64,
    pub confused: f64,
}

impl EmotionDistribution {
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn sum(&self) -> f64 {
        self.neutral + self.happy + self.surprise + self.confused
    }

    pub fn is_failure(&self) -> bool {
        *self == Self::zeroed()
    }
}

/// Single-frame emotion model. Implementations wrap whatever inference
/// stack is available; the classifier only needs native scores back.
pub trait EmotionBackend {
    fn analyze(&self, frame: &DynamicImage) -> Result<NativeEmotionScores>;
}

/// Remaps a backend's native emotion scores down to the simplified
/// vocabulary and normalizes them to percentages.
///
/// Not wired into the session loop; offered as a standalone capability
/// for callers that capture frames during practice.
pub struct EmotionClassifier<B> {
    backend: B,
}

impl<B: EmotionBackend> EmotionClassifier<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Classifies one frame. Any backend failure is absorbed here and
    /// reported as the zeroed distribution; callers never see an error.
    pub fn classify(&self, frame: &DynamicImage) -> EmotionDistribution {
        match self.backend.analyze(frame) {
            Ok(scores) => Self::remap(scores),
            Err(e) => {
                error!("Error in face analysis: {}", e);
                EmotionDistribution::zeroed()
            }
        }
    }

    fn remap(scores: NativeEmotionScores) -> EmotionDistribution {
        let raw = EmotionDistribution {
            neutral: scores.neutral,
            happy: scores.happy,
            surprise: scores.surprise,
            // Approximating confusion
            confused: (scores.sad + scores.fear) / 2.0,
        };

        let total = raw.sum();
        if total <= 0.0 {
            return EmotionDistribution::zeroed();
        }

        EmotionDistribution {
            neutral: raw.neutral / total * 100.0,
            happy: raw.happy / total * 100.0,
            surprise: raw.surprise / total * 100.0,
            confused: raw.confused / total * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedBackend(NativeEmotionScores);

    impl EmotionBackend for FixedBackend {
        fn analyze(&self, _frame: &DynamicImage) -> Result<NativeEmotionScores> {
            Ok(self.0)
        }
    }

    struct FailingBackend;

    impl EmotionBackend for FailingBackend {
        fn analyze(&self, _frame: &DynamicImage) -> Result<NativeEmotionScores> {
            Err(anyhow::anyhow!("decode error"))
        }
    }

    fn blank_frame() -> DynamicImage {
        DynamicImage::new_rgb8(4, 4)
    }

    #[test]
    fn test_distribution_sums_to_100() {
        let classifier = EmotionClassifier::new(FixedBackend(NativeEmotionScores {
            angry: 3.0,
            disgust: 1.0,
            fear: 10.0,
            happy: 40.0,
            sad: 20.0,
            surprise: 6.0,
            neutral: 20.0,
        }));
        let dist = classifier.classify(&blank_frame());
        assert!((dist.sum() - 100.0).abs() < 1e-6);
        assert!(!dist.is_failure());
    }

    #[test]
    fn test_confused_is_mean_of_sad_and_fear() {
        // neutral 30 + happy 30 + surprise 10 + (20 + 40)/2 = 100, so no
        // renormalization distortion and the remap is directly visible.
        let classifier = EmotionClassifier::new(FixedBackend(NativeEmotionScores {
            fear: 40.0,
            happy: 30.0,
            sad: 20.0,
            surprise: 10.0,
            neutral: 30.0,
            ..Default::default()
        }));
        let dist = classifier.classify(&blank_frame());
        assert!((dist.confused - 30.0).abs() < 1e-6);
        assert!((dist.neutral - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_scores_not_summing_to_100_are_renormalized() {
        let classifier = EmotionClassifier::new(FixedBackend(NativeEmotionScores {
            happy: 2.0,
            neutral: 1.0,
            surprise: 1.0,
            ..Default::default()
        }));
        let dist = classifier.classify(&blank_frame());
        assert!((dist.sum() - 100.0).abs() < 1e-6);
        assert!((dist.happy - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_backend_failure_yields_zeroed_sentinel() {
        let classifier = EmotionClassifier::new(FailingBackend);
        let dist = classifier.classify(&blank_frame());
        assert!(dist.is_failure());
        assert_eq!(dist, EmotionDistribution::zeroed());
    }

    #[test]
    fn test_all_zero_native_scores_yield_sentinel() {
        let classifier = EmotionClassifier::new(FixedBackend(NativeEmotionScores::default()));
        let dist = classifier.classify(&blank_frame());
        assert!(dist.is_failure());
    }
}
