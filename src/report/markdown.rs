use anyhow::Result;
use chrono::NaiveDate;

use crate::assessment::banding::band_for_mean;
use crate::assessment::{
    calculate_hearing_percentages, calculate_overall_percentage, Assessment, BandPolicy,
    EquipmentSetup, HearingTestResult,
};

/// Per-frequency status cut points for the report table. Display labels
/// only; the severity banding policy lives in `assessment::banding`.
const STATUS_GOOD_MIN: f32 = 0.7;
const STATUS_FAIR_MIN: f32 = 0.5;

/// Render a markdown report for one completed screening.
///
/// Returns the markdown content as a string. The caller decides where to
/// save it.
pub fn render(
    result: &HearingTestResult,
    equipment: &EquipmentSetup,
    date: &NaiveDate,
    policy: &BandPolicy,
) -> Result<String> {
    let left_pct = calculate_hearing_percentages(&result.left_ear_results)?;
    let right_pct = calculate_hearing_percentages(&result.right_ear_results)?;
    let overall_pct =
        calculate_overall_percentage(&result.left_ear_results, &result.right_ear_results)?;

    let mut md = String::new();

    md.push_str("# Hearing Screening Report\n\n");
    md.push_str(&format!("Test date: {date}  \n"));
    md.push_str(&format!(
        "Generated: {}  \n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    ));
    md.push_str(&format!(
        "Equipment: {} ({})\n\n",
        equipment.kind.label(),
        equipment.connection.label()
    ));

    md.push_str("---\n\n");

    // Score overview
    md.push_str("## Scores\n\n");
    md.push_str("| Overall | Left ear | Right ear | Self-report |\n");
    md.push_str("|---------|----------|-----------|-------------|\n");
    md.push_str(&format!(
        "| {overall_pct}% | {left_pct}% | {right_pct}% | {}/100 |\n\n",
        result.theoretical_score
    ));

    md.push_str(&format!(
        "**Assessment: {}**\n\n",
        result.overall_assessment.label()
    ));

    per_ear_section(&mut md, "Left Ear", &result.left_ear_results, policy);
    per_ear_section(&mut md, "Right Ear", &result.right_ear_results, policy);

    // Frequency table across both ears
    md.push_str("## Frequency Analysis\n\n");
    md.push_str("| Frequency | Left | Right | Status |\n");
    md.push_str("|-----------|------|-------|--------|\n");
    for (left, right) in result
        .left_ear_results
        .iter()
        .zip(result.right_ear_results.iter())
    {
        let avg = (left.threshold + right.threshold) / 2.0;
        md.push_str(&format!(
            "| {} Hz | {:.0}% | {:.0}% | {} |\n",
            left.frequency,
            left.threshold * 100.0,
            right.threshold * 100.0,
            frequency_status(avg),
        ));
    }
    md.push('\n');

    md.push_str("## Recommendations\n\n");
    for (i, rec) in result.recommendations.iter().enumerate() {
        md.push_str(&format!("{}. {rec}\n", i + 1));
    }
    md.push('\n');

    md.push_str("## 10 Hearing Health Tips\n\n");
    for (i, tip) in result.hearing_tips.iter().enumerate() {
        md.push_str(&format!("{}. {tip}\n", i + 1));
    }
    md.push('\n');

    md.push_str("---\n\n");
    md.push_str(
        "> **Medical disclaimer:** this screening uses uncalibrated consumer \
         audio equipment and does not replace a comprehensive audiological \
         evaluation. For an accurate diagnosis, consult a licensed \
         audiologist.\n",
    );

    Ok(md)
}

fn per_ear_section(
    md: &mut String,
    title: &str,
    samples: &[crate::assessment::ThresholdSample],
    policy: &BandPolicy,
) {
    let mean = samples.iter().map(|s| s.threshold).sum::<f32>() / samples.len().max(1) as f32;
    let band = band_for_mean(mean, policy);

    md.push_str(&format!("## {title}\n\n"));
    md.push_str(&format!("Indicative level: **{}**\n\n", ear_level(band)));
}

fn ear_level(band: Assessment) -> &'static str {
    match band {
        Assessment::Normal => "good",
        Assessment::MildLoss => "fair",
        Assessment::ModerateLoss => "reduced",
        Assessment::SevereLoss => "significantly reduced",
    }
}

fn frequency_status(avg_threshold: f32) -> &'static str {
    if avg_threshold >= STATUS_GOOD_MIN {
        "Good"
    } else if avg_threshold >= STATUS_FAIR_MIN {
        "Fair"
    } else {
        "Poor"
    }
}
