use super::types::Assessment;

/// Recommendation text per severity band. Static and deterministic — the
/// same band always produces the same list, in the same order.
fn recommendations_for(assessment: Assessment) -> &'static [&'static str] {
    match assessment {
        Assessment::Normal => &[
            "Your screening results look good. Keep protecting your hearing in loud environments.",
            "Repeat a screening once a year, or sooner if you notice any change.",
            "Use hearing protection around power tools, concerts and other loud noise.",
            "Keep headphone listening at or below 60% volume.",
        ],
        Assessment::MildLoss => &[
            "Your results suggest mild hearing loss. Consider a professional audiological evaluation.",
            "Pay attention to situations where you struggle to follow speech, and note them for the audiologist.",
            "Reduce background noise during conversations where you can.",
            "Avoid prolonged exposure to loud sound, and use hearing protection when you can't.",
            "Repeat this screening in three to six months to watch for change.",
        ],
        Assessment::ModerateLoss => &[
            "Your results suggest moderate hearing loss. A professional audiological evaluation is recommended.",
            "Discuss hearing-aid options with an audiologist; modern devices help most moderate losses.",
            "Tell family and colleagues so they can face you and speak clearly.",
            "Protect your remaining hearing strictly; avoid loud environments without protection.",
            "Have your ears examined to rule out treatable causes such as wax or infection.",
        ],
        Assessment::SevereLoss => &[
            "Your results suggest significant hearing loss. Please seek a professional evaluation promptly.",
            "An audiologist can assess whether hearing aids or other interventions are appropriate.",
            "Rule out temporary causes: ear infection, wax blockage or recent noise exposure.",
            "Avoid any further loud-noise exposure until you have been evaluated.",
            "If the loss appeared suddenly, treat it as urgent and see a doctor within days.",
        ],
    }
}

/// Ten fixed hearing-health tips, appended to every report.
const HEARING_TIPS: [&str; 10] = [
    "Follow the 60/60 rule: headphone volume below 60% for no more than 60 minutes at a time.",
    "Carry foam earplugs; they cut harmful noise by 15-30 dB and fit in a pocket.",
    "Give your ears recovery time after loud events — around 18 hours of relative quiet.",
    "Keep a safe distance from speakers at concerts and events.",
    "Never insert cotton swabs or other objects into your ear canal.",
    "Dry your ears gently after swimming or showering to prevent infection.",
    "Manage blood pressure and diabetes; both affect the blood supply to the inner ear.",
    "Stay active — regular exercise supports circulation to the hearing organs.",
    "Learn the early signs: ringing ears and muffled speech after noise mean the dose was too high.",
    "Screen your hearing once a year, the same way you check your eyesight.",
];

/// Recommendations for a severity band, as owned strings ready for the
/// result object.
pub fn generate_recommendations(assessment: Assessment) -> Vec<String> {
    recommendations_for(assessment)
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// The fixed tip list.
pub fn generate_hearing_tips() -> Vec<String> {
    HEARING_TIPS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_band_has_recommendations() {
        for band in [
            Assessment::Normal,
            Assessment::MildLoss,
            Assessment::ModerateLoss,
            Assessment::SevereLoss,
        ] {
            assert!(!generate_recommendations(band).is_empty());
        }
    }

    #[test]
    fn recommendations_are_deterministic() {
        assert_eq!(
            generate_recommendations(Assessment::MildLoss),
            generate_recommendations(Assessment::MildLoss)
        );
    }

    #[test]
    fn exactly_ten_tips() {
        assert_eq!(generate_hearing_tips().len(), 10);
    }

    #[test]
    fn tips_are_deterministic() {
        assert_eq!(generate_hearing_tips(), generate_hearing_tips());
    }
}
