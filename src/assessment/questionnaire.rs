use super::error::AssessmentError;

/// Number of questions in the self-report questionnaire.
pub const QUESTION_COUNT: usize = 10;

/// Options per question. Every question offers the same number of choices.
pub const OPTION_COUNT: usize = 4;

/// One self-report question with its four answer options, ordered from
/// best to worst hearing.
pub struct Question {
    pub text: &'static str,
    pub options: [&'static str; OPTION_COUNT],
}

/// The fixed questionnaire presented before the audiometric sweep.
pub const QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        text: "How often do you ask people to repeat themselves in conversation?",
        options: ["Rarely or never", "Occasionally", "Often", "Almost always"],
    },
    Question {
        text: "How well can you follow conversation in a noisy restaurant?",
        options: [
            "Without difficulty",
            "With some effort",
            "Only partially",
            "Barely or not at all",
        ],
    },
    Question {
        text: "Do others complain that your TV or music volume is too loud?",
        options: ["Never", "Once in a while", "Regularly", "All the time"],
    },
    Question {
        text: "How well do you hear on the telephone?",
        options: [
            "Clearly",
            "Mostly clearly",
            "I often miss words",
            "I avoid phone calls",
        ],
    },
    Question {
        text: "Do you experience ringing or buzzing in your ears (tinnitus)?",
        options: ["Never", "Occasionally", "Frequently", "Constantly"],
    },
    Question {
        text: "Can you hear quiet sounds like a ticking clock or dripping tap?",
        options: ["Easily", "If I listen for them", "Rarely", "Not at all"],
    },
    Question {
        text: "How often do you misunderstand what people say and respond incorrectly?",
        options: ["Rarely or never", "Occasionally", "Often", "Very often"],
    },
    Question {
        text: "How much are you exposed to loud noise (work, concerts, power tools)?",
        options: [
            "Rarely",
            "A few times a month",
            "Weekly",
            "Daily",
        ],
    },
    Question {
        text: "Do you have trouble telling which direction a sound comes from?",
        options: ["No trouble", "Sometimes", "Often", "Almost always"],
    },
    Question {
        text: "Do family members or friends say you might have a hearing problem?",
        options: ["No", "It has come up once or twice", "Several times", "Frequently"],
    },
];

/// Points awarded per answer index, identical for every question.
/// Ten questions at a 10-point maximum give a 0-100 scale.
const OPTION_SCORES: [u32; OPTION_COUNT] = [10, 7, 3, 0];

/// Score the questionnaire: one answer index per question, summed over the
/// static scoring table into a 0-100 scalar (higher is better).
///
/// A wrong-length answer sequence or an out-of-range answer index is a hard
/// error. Missing answers are never padded; a silently corrupted score is
/// worse than a visible failure.
pub fn calculate_theoretical_score(answers: &[usize]) -> Result<u32, AssessmentError> {
    if answers.len() != QUESTION_COUNT {
        return Err(AssessmentError::AnswerCountMismatch {
            expected: QUESTION_COUNT,
            actual: answers.len(),
        });
    }

    let mut score = 0;
    for (question, &answer) in answers.iter().enumerate() {
        if answer >= OPTION_COUNT {
            return Err(AssessmentError::AnswerOutOfRange { question, answer });
        }
        score += OPTION_SCORES[answer];
    }

    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_answers_score_100() {
        let answers = [0; QUESTION_COUNT];
        assert_eq!(calculate_theoretical_score(&answers).unwrap(), 100);
    }

    #[test]
    fn worst_answers_score_0() {
        let answers = [OPTION_COUNT - 1; QUESTION_COUNT];
        assert_eq!(calculate_theoretical_score(&answers).unwrap(), 0);
    }

    #[test]
    fn mixed_answers() {
        // Five best, five worst: 5 * 10 = 50
        let mut answers = [0; QUESTION_COUNT];
        for a in answers.iter_mut().skip(5) {
            *a = OPTION_COUNT - 1;
        }
        assert_eq!(calculate_theoretical_score(&answers).unwrap(), 50);
    }

    #[test]
    fn too_few_answers_fails() {
        let answers = [0; QUESTION_COUNT - 1];
        assert_eq!(
            calculate_theoretical_score(&answers),
            Err(AssessmentError::AnswerCountMismatch {
                expected: QUESTION_COUNT,
                actual: QUESTION_COUNT - 1,
            })
        );
    }

    #[test]
    fn too_many_answers_fails() {
        let answers = [0; QUESTION_COUNT + 2];
        assert!(calculate_theoretical_score(&answers).is_err());
    }

    #[test]
    fn out_of_range_answer_fails() {
        let mut answers = [0; QUESTION_COUNT];
        answers[3] = OPTION_COUNT;
        assert_eq!(
            calculate_theoretical_score(&answers),
            Err(AssessmentError::AnswerOutOfRange {
                question: 3,
                answer: OPTION_COUNT,
            })
        );
    }

    #[test]
    fn worse_answers_never_raise_score() {
        // Monotonic: flipping any single answer to a worse option can only
        // lower (or keep) the score.
        let base = calculate_theoretical_score(&[1; QUESTION_COUNT]).unwrap();
        for q in 0..QUESTION_COUNT {
            let mut answers = [1; QUESTION_COUNT];
            answers[q] = 2;
            let worse = calculate_theoretical_score(&answers).unwrap();
            assert!(worse <= base);
        }
    }

    #[test]
    fn every_question_has_text_and_options() {
        for q in &QUESTIONS {
            assert!(!q.text.is_empty());
            for opt in &q.options {
                assert!(!opt.is_empty());
            }
        }
    }
}
