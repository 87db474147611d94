use super::error::AssessmentError;
use super::types::ThresholdSample;

/// Convert one ear's sweep into a 0-100 hearing percentage: each threshold
/// maps to `round(threshold * 100)` and the ear score is the rounded mean.
///
/// An empty sweep is an error — averaging nothing must not produce NaN or a
/// silent zero.
pub fn calculate_hearing_percentages(
    ear_results: &[ThresholdSample],
) -> Result<u32, AssessmentError> {
    if ear_results.is_empty() {
        return Err(AssessmentError::EmptyEarResults);
    }

    let sum: f32 = ear_results
        .iter()
        .map(|s| (s.threshold * 100.0).round())
        .sum();

    Ok((sum / ear_results.len() as f32).round() as u32)
}

/// Overall percentage: rounded mean of the two per-ear percentages.
pub fn calculate_overall_percentage(
    left: &[ThresholdSample],
    right: &[ThresholdSample],
) -> Result<u32, AssessmentError> {
    let left_pct = calculate_hearing_percentages(left)?;
    let right_pct = calculate_hearing_percentages(right)?;
    Ok(((left_pct + right_pct) as f32 / 2.0).round() as u32)
}

/// Mean raw threshold across a set of samples. Used by the banding policy
/// and the per-ear report labels.
pub fn mean_threshold(samples: &[ThresholdSample]) -> Result<f32, AssessmentError> {
    if samples.is_empty() {
        return Err(AssessmentError::EmptyEarResults);
    }
    let sum: f32 = samples.iter().map(|s| s.threshold).sum();
    Ok(sum / samples.len() as f32)
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
    fn max_thresholds_give_100() {
        assert_eq!(calculate_hearing_percentages(&sweep(1.0)).unwrap(), 100);
    }

    #[test]
    fn min_thresholds_give_5() {
        assert_eq!(calculate_hearing_percentages(&sweep(0.05)).unwrap(), 5);
    }

    #[test]
    fn empty_sweep_is_an_error() {
        assert_eq!(
            calculate_hearing_percentages(&[]),
            Err(AssessmentError::EmptyEarResults)
        );
    }

    #[test]
    fn percentage_stays_in_range() {
        // Full-length sweeps with in-bounds thresholds land in [5, 100].
        for t in [0.05, 0.1, 0.33, 0.5, 0.72, 0.99, 1.0] {
            let pct = calculate_hearing_percentages(&sweep(t)).unwrap();
            assert!((5..=100).contains(&pct), "t={t} gave {pct}");
        }
    }

    #[test]
    fn raising_one_threshold_never_lowers_the_percentage() {
        let base = calculate_hearing_percentages(&sweep(0.5)).unwrap();
        for i in 0..TEST_FREQUENCIES.len() {
            let mut samples = sweep(0.5);
            samples[i].threshold = 0.8;
            let raised = calculate_hearing_percentages(&samples).unwrap();
            assert!(raised >= base);
        }
    }

    #[test]
    fn overall_percentage_is_symmetric() {
        let a = sweep(0.3);
        let b = sweep(0.9);
        assert_eq!(
            calculate_overall_percentage(&a, &b).unwrap(),
            calculate_overall_percentage(&b, &a).unwrap()
        );
    }

    #[test]
    fn overall_percentage_averages_the_ears() {
        let left = sweep(1.0); // 100
        let right = sweep(0.5); // 50
        assert_eq!(calculate_overall_percentage(&left, &right).unwrap(), 75);
    }

    #[test]
    fn overall_percentage_empty_ear_is_an_error() {
        let left = sweep(0.5);
        assert!(calculate_overall_percentage(&left, &[]).is_err());
        assert!(calculate_overall_percentage(&[], &left).is_err());
    }

    #[test]
    fn mean_threshold_simple() {
        let samples = vec![
            ThresholdSample::new(250, 0.2),
            ThresholdSample::new(500, 0.6),
        ];
        let mean = mean_threshold(&samples).unwrap();
        assert!((mean - 0.4).abs() < 1e-6);
    }

    #[test]
    fn mean_threshold_empty_is_an_error() {
        assert!(mean_threshold(&[]).is_err());
    }
}
