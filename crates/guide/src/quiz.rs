//! Generated quizzes and grading.
//!
//! A [`Quiz`] arrives as untrusted model output. It is validated on parse,
//! and answers are graded into a [`QuizOutcome`], which is the only form in
//! which quiz results reach the progress ledger.

use serde::{Deserialize, Serialize};
use crate::{GuideError, Result};

/// Minimum number of questions in a quiz.
pub const MIN_QUESTIONS: usize = 3;

/// Maximum number of questions in a quiz.
pub const MAX_QUESTIONS: usize = 5;

/// Answer choices per question.
pub const CHOICES_PER_QUESTION: usize = 4;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub choices: Vec<String>,
    pub correct_answer: String,
}

/// A short multiple-choice quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(rename = "quiz")]
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Check question count, choice count, and that each correct answer is
    /// one of its choices.
    pub fn validate(&self) -> Result<()> {
        let n = self.questions.len();
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&n) {
            return Err(GuideError::InvalidQuiz(format!(
                "expected {}-{} questions, got {}",
                MIN_QUESTIONS, MAX_QUESTIONS, n
            )));
        }

        for (i, q) in self.questions.iter().enumerate() {
            if q.question.trim().is_empty() {
                return Err(GuideError::InvalidQuiz(format!("question {} is blank", i + 1)));
            }
            if q.choices.len() != CHOICES_PER_QUESTION {
                return Err(GuideError::InvalidQuiz(format!(
                    "question {} has {} choices, expected {}",
                    i + 1,
                    q.choices.len(),
                    CHOICES_PER_QUESTION
                )));
            }
            if !q.choices.contains(&q.correct_answer) {
                return Err(GuideError::InvalidQuiz(format!(
                    "question {}: correct answer is not among the choices",
                    i + 1
                )));
            }
        }

        Ok(())
    }

    /// Grade one answer per question, in order.
    pub fn grade(&self, answers: &[String]) -> Result<QuizOutcome> {
        self.validate()?;
        if answers.len() != self.questions.len() {
            return Err(GuideError::InvalidQuiz(format!(
                "expected {} answers, got {}",
                self.questions.len(),
                answers.len()
            )));
        }

        let mut correct = 0u32;
        for (i, (q, a)) in self.questions.iter().zip(answers).enumerate() {
            if !q.choices.contains(a) {
                return Err(GuideError::InvalidQuiz(format!(
                    "answer {} is not one of the offered choices",
                    i + 1
                )));
            }
            if *a == q.correct_answer {
                correct += 1;
            }
        }

        Ok(QuizOutcome {
            correct,
            total: self.questions.len() as u32,
        })
    }
}

/// Graded result of one quiz.
///
/// Only [`Quiz::grade`] constructs this, so its counts are always
/// consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
    correct: u32,
    total: u32,
}

impl QuizOutcome {
    /// Correctly answered questions.
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Questions in the quiz.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// At least half the questions answered correctly.
    pub fn passed(&self) -> bool {
        self.total > 0 && self.correct * 2 >= self.total
    }

    /// Quizzes to credit in the ledger: 1 if passed, else 0.
    pub fn quizzes_passed(&self) -> i64 {
        i64::from(self.passed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(n: usize) -> QuizQuestion {
        QuizQuestion {
            question: format!("Question {}?", n),
            choices: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: "B".into(),
        }
    }

    fn quiz(n: usize) -> Quiz {
        Quiz {
            questions: (1..=n).map(question).collect(),
        }
    }

    fn answers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_wire_shape() {
        let raw = r#"{"quiz":[
            {"question":"1?","choices":["a","b","c","d"],"correct_answer":"b"},
            {"question":"2?","choices":["a","b","c","d"],"correct_answer":"c"},
            {"question":"3?","choices":["a","b","c","d"],"correct_answer":"d"}
        ]}"#;
        let quiz: Quiz = serde_json::from_str(raw).unwrap();
        assert_eq!(quiz.questions.len(), 3);
        assert!(quiz.validate().is_ok());
    }

    #[test]
    fn test_question_count_bounds() {
        assert!(quiz(2).validate().is_err());
        assert!(quiz(3).validate().is_ok());
        assert!(quiz(5).validate().is_ok());
        assert!(quiz(6).validate().is_err());
    }

    #[test]
    fn test_bad_choices_rejected() {
        let mut q = quiz(3);
        q.questions[1].choices.pop();
        assert!(matches!(q.validate(), Err(GuideError::InvalidQuiz(_))));

        let mut q = quiz(3);
        q.questions[2].correct_answer = "Z".into();
        assert!(matches!(q.validate(), Err(GuideError::InvalidQuiz(_))));
    }

    #[test]
    fn test_grade() {
        let outcome = quiz(4).grade(&answers(&["B", "A", "B", "D"])).unwrap();
        assert_eq!(outcome.correct(), 2);
        assert_eq!(outcome.total(), 4);
        assert!(outcome.passed());
        assert_eq!(outcome.quizzes_passed(), 1);

        let outcome = quiz(3).grade(&answers(&["B", "A", "C"])).unwrap();
        assert!(!outcome.passed());
        assert_eq!(outcome.quizzes_passed(), 0);
    }

    #[test]
    fn test_grade_rejects_mismatched_answers() {
        assert!(quiz(3).grade(&answers(&["B", "B"])).is_err());
        assert!(quiz(3).grade(&answers(&["B", "B", "E"])).is_err());
    }
}
