use thiserror::Error;

/// Errors from the pure scoring functions.
///
/// These should never reach an end user in practice — the wizard produces
/// inputs under its own invariants — but a wrong score is worse than a
/// visible failure, so malformed input is always surfaced, never patched up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    #[error("expected {expected} questionnaire answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    #[error("answer {answer} is out of range for question {question}")]
    AnswerOutOfRange { question: usize, answer: usize },

    #[error("ear results are empty; cannot compute a hearing percentage")]
    EmptyEarResults,
}
