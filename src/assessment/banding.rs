use super::audiogram::mean_threshold;
use super::error::AssessmentError;
use super::types::{Assessment, ThresholdSample};

/// The banding policy table. All cut points live here; nothing else in the
/// crate hard-codes a band boundary.
///
/// A mean threshold at or above `normal_min` is normal hearing, at or above
/// `mild_min` mild loss, at or above `moderate_min` moderate loss, anything
/// below is severe loss. A questionnaire score below `low_score_cutoff`
/// shifts the audiometric band one step worse. These values are a screening
/// heuristic, not a clinical mapping; the invariant they must keep is
/// monotonicity — worse inputs never produce a better band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPolicy {
    pub normal_min: f32,
    pub mild_min: f32,
    pub moderate_min: f32,
    pub low_score_cutoff: u32,
}

impl Default for BandPolicy {
    fn default() -> Self {
        Self {
            normal_min: 0.75,
            mild_min: 0.6,
            moderate_min: 0.4,
            low_score_cutoff: 40,
        }
    }
}

/// Band a mean threshold without the questionnaire adjustment. Also used by
/// the report for per-ear labels.
pub fn band_for_mean(mean: f32, policy: &BandPolicy) -> Assessment {
    if mean >= policy.normal_min {
        Assessment::Normal
    } else if mean >= policy.mild_min {
        Assessment::MildLoss
    } else if mean >= policy.moderate_min {
        Assessment::ModerateLoss
    } else {
        Assessment::SevereLoss
    }
}

/// Combine the questionnaire score with both ear sweeps into the overall
/// severity band: band the combined mean threshold across both ears, then
/// shift one band worse if the self-report score is low.
pub fn calculate_overall_assessment(
    theoretical_score: u32,
    right_results: &[ThresholdSample],
    left_results: &[ThresholdSample],
    policy: &BandPolicy,
) -> Result<Assessment, AssessmentError> {
    let right_mean = mean_threshold(right_results)?;
    let left_mean = mean_threshold(left_results)?;
    let combined_mean = (right_mean + left_mean) / 2.0;

    let band = band_for_mean(combined_mean, policy);

    if theoretical_score < policy.low_score_cutoff {
        Ok(band.one_band_worse())
    } else {
        Ok(band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::types::TEST_FREQUENCIES;

    fn sweep(threshold: f32) -> Vec<ThresholdSample> {
        TEST_FREQUENCIES
            .iter()
            .map(|&f| ThresholdSample::new(f, threshold))
            .collect()
    }

    #[test]
    fn max_thresholds_and_perfect_score_are_normal() {
        let ear = sweep(1.0);
        let band =
            calculate_overall_assessment(100, &ear, &ear, &BandPolicy::default()).unwrap();
        assert_eq!(band, Assessment::Normal);
    }

    #[test]
    fn min_thresholds_are_severe() {
        let ear = sweep(0.05);
        let band =
            calculate_overall_assessment(100, &ear, &ear, &BandPolicy::default()).unwrap();
        assert_eq!(band, Assessment::SevereLoss);
    }

    #[test]
    fn band_boundaries() {
        let policy = BandPolicy::default();
        assert_eq!(band_for_mean(0.75, &policy), Assessment::Normal);
        assert_eq!(band_for_mean(0.74, &policy), Assessment::MildLoss);
        assert_eq!(band_for_mean(0.6, &policy), Assessment::MildLoss);
        assert_eq!(band_for_mean(0.59, &policy), Assessment::ModerateLoss);
        assert_eq!(band_for_mean(0.4, &policy), Assessment::ModerateLoss);
        assert_eq!(band_for_mean(0.39, &policy), Assessment::SevereLoss);
    }

    #[test]
    fn low_questionnaire_score_shifts_one_band_worse() {
        let policy = BandPolicy::default();
        let ear = sweep(0.8);
        let good_score =
            calculate_overall_assessment(80, &ear, &ear, &policy).unwrap();
        let low_score =
            calculate_overall_assessment(20, &ear, &ear, &policy).unwrap();
        assert_eq!(good_score, Assessment::Normal);
        assert_eq!(low_score, Assessment::MildLoss);
    }

    #[test]
    fn low_score_saturates_at_severe() {
        let policy = BandPolicy::default();
        let ear = sweep(0.1);
        let band = calculate_overall_assessment(0, &ear, &ear, &policy).unwrap();
        assert_eq!(band, Assessment::SevereLoss);
    }

    #[test]
    fn empty_ear_is_an_error() {
        let ear = sweep(0.5);
        let policy = BandPolicy::default();
        assert!(calculate_overall_assessment(50, &[], &ear, &policy).is_err());
        assert!(calculate_overall_assessment(50, &ear, &[], &policy).is_err());
    }

    #[test]
    fn pointwise_better_thresholds_never_worsen_the_band() {
        // Monotonicity over the audiometric input: raise every threshold
        // step by step and assert the band never moves toward severe.
        let policy = BandPolicy::default();
        let mut previous = Assessment::SevereLoss;
        for t in [0.05, 0.2, 0.41, 0.55, 0.61, 0.7, 0.76, 0.9, 1.0] {
            let ear = sweep(t);
            let band =
                calculate_overall_assessment(100, &ear, &ear, &policy).unwrap();
            assert!(band <= previous, "band worsened at threshold {t}");
            previous = band;
        }
    }

    #[test]
    fn higher_score_never_worsens_the_band() {
        let policy = BandPolicy::default();
        let ear = sweep(0.65);
        let low = calculate_overall_assessment(10, &ear, &ear, &policy).unwrap();
        let high = calculate_overall_assessment(90, &ear, &ear, &policy).unwrap();
        assert!(high <= low);
    }
}
