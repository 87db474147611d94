//! The scoring pipeline: pure functions turning questionnaire answers and
//! per-frequency threshold samples into a severity band, percentages and
//! report content. No hidden state, no I/O.

pub mod audiogram;
pub mod banding;
pub mod content;
pub mod error;
pub mod questionnaire;
pub mod types;

pub use audiogram::{calculate_hearing_percentages, calculate_overall_percentage};
pub use banding::{calculate_overall_assessment, BandPolicy};
pub use content::{generate_hearing_tips, generate_recommendations};
pub use error::AssessmentError;
pub use questionnaire::calculate_theoretical_score;
pub use types::{
    Assessment, EquipmentSetup, HearingTestResult, ThresholdSample, TEST_FREQUENCIES,
};
