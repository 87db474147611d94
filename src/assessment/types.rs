use serde::{Deserialize, Serialize};

/// The fixed frequency sweep, in Hz. Both ears test the same set, in order.
pub const TEST_FREQUENCIES: [u32; 6] = [250, 500, 1000, 2000, 4000, 8000];

/// Lowest amplitude the sweep screen will record as a threshold.
pub const MIN_THRESHOLD: f32 = 0.05;

/// Highest amplitude the sweep screen will record as a threshold.
pub const MAX_THRESHOLD: f32 = 1.0;

/// One data point of an ear sweep: the amplitude at which the listener
/// reported the tone just barely audible. `threshold` is a normalized
/// output level in [0.05, 1.0], not a calibrated dB HL value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSample {
    pub frequency: u32,
    pub threshold: f32,
}

impl ThresholdSample {
    pub fn new(frequency: u32, threshold: f32) -> Self {
        Self {
            frequency,
            threshold,
        }
    }
}

/// Severity band for the overall result.
///
/// The derived `Ord` is the severity ranking: `Normal` is the best band,
/// `SevereLoss` the worst. Banding and recommendation tables key off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Assessment {
    Normal,
    MildLoss,
    ModerateLoss,
    SevereLoss,
}

impl Assessment {
    /// Display label, matching the report wording.
    pub fn label(self) -> &'static str {
        match self {
            Assessment::Normal => "normal hearing",
            Assessment::MildLoss => "mild hearing loss",
            Assessment::ModerateLoss => "moderate hearing loss",
            Assessment::SevereLoss => "severe hearing loss",
        }
    }

    /// The next band down. Saturates at `SevereLoss`.
    pub fn one_band_worse(self) -> Assessment {
        match self {
            Assessment::Normal => Assessment::MildLoss,
            Assessment::MildLoss => Assessment::ModerateLoss,
            Assessment::ModerateLoss | Assessment::SevereLoss => Assessment::SevereLoss,
        }
    }
}

/// Final screening result, built once after both ear sweeps complete.
/// Held in memory for the duration of the session and handed read-only to
/// the summary printer, the markdown report and the JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct HearingTestResult {
    pub theoretical_score: u32,
    pub left_ear_results: Vec<ThresholdSample>,
    pub right_ear_results: Vec<ThresholdSample>,
    pub overall_assessment: Assessment,
    pub recommendations: Vec<String>,
    pub hearing_tips: Vec<String>,
}

/// What the listener is testing with. The scoring engine never inspects
/// this; it is collected up front and echoed into the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentKind {
    Headphones,
    Earbuds,
    Speakers,
}

impl EquipmentKind {
    pub fn label(self) -> &'static str {
        match self {
            EquipmentKind::Headphones => "Over-ear headphones",
            EquipmentKind::Earbuds => "Earbuds",
            EquipmentKind::Speakers => "Speakers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Connection {
    Wired,
    Bluetooth,
}

impl Connection {
    pub fn label(self) -> &'static str {
        match self {
            Connection::Wired => "wired",
            Connection::Bluetooth => "Bluetooth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EquipmentSetup {
    pub kind: EquipmentKind,
    pub connection: Connection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Assessment::Normal < Assessment::MildLoss);
        assert!(Assessment::MildLoss < Assessment::ModerateLoss);
        assert!(Assessment::ModerateLoss < Assessment::SevereLoss);
    }

    #[test]
    fn one_band_worse_saturates() {
        assert_eq!(Assessment::Normal.one_band_worse(), Assessment::MildLoss);
        assert_eq!(
            Assessment::SevereLoss.one_band_worse(),
            Assessment::SevereLoss
        );
    }

    #[test]
    fn frequencies_are_ascending() {
        for pair in TEST_FREQUENCIES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn assessment_serializes_kebab_case() {
        let json = serde_json::to_string(&Assessment::MildLoss).unwrap();
        assert_eq!(json, "\"mild-loss\"");
    }
}
