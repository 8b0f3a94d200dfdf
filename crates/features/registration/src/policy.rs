use crate::error::RegistrationError;
use boxdraft_domain::constants::ANONYMOUS;
use boxdraft_domain::{Answers, Question, QuestionType};

/// Answers typed into the registration form, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    answers: Answers,
}

impl Submission {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_answer(mut self, question_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(question_id, text);
        self
    }

    pub fn set(&mut self, question_id: impl Into<String>, text: impl Into<String>) {
        self.answers.insert(question_id.into(), text.into());
    }

    #[must_use]
    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    #[must_use]
    pub const fn answers(&self) -> &Answers {
        &self.answers
    }

    #[must_use]
    pub fn into_answers(self) -> Answers {
        self.answers
    }

    /// Rejects the submission if any required question is blank or whitespace-only.
    ///
    /// # Errors
    /// [`RegistrationError::MissingAnswers`] naming every missing label, in question order.
    pub fn validate(&self, questions: &[Question]) -> Result<(), RegistrationError> {
        let labels: Vec<String> = questions
            .iter()
            .filter(|q| q.required)
            .filter(|q| self.answer(&q.id).is_none_or(|a| a.trim().is_empty()))
            .map(|q| q.label.clone())
            .collect();

        if labels.is_empty() {
            Ok(())
        } else {
            Err(RegistrationError::MissingAnswers { labels, context: None })
        }
    }
}

impl FromIterator<(String, String)> for Submission {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { answers: iter.into_iter().collect() }
    }
}

/// Picks the player's display name from their answers.
///
/// The answer to the first short-text question wins; without one, the answer to the first
/// question. No questions, or an empty answer, yields `"Anonymous"`.
#[must_use]
pub fn derive_name(questions: &[Question], answers: &Answers) -> String {
    questions
        .iter()
        .find(|q| q.kind == QuestionType::Text)
        .or_else(|| questions.first())
        .and_then(|q| answers.get(&q.id))
        .filter(|name| !name.is_empty())
        .map_or_else(|| ANONYMOUS.to_owned(), Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, label: &str, kind: QuestionType, required: bool) -> Question {
        Question { id: id.into(), label: label.into(), kind, required, ..Question::default() }
    }

    #[test]
    fn test_missing_answers_are_listed_together() {
        let questions = vec![
            question("q1", "Full Name", QuestionType::Text, true),
            question("q2", "Email", QuestionType::Email, true),
            question("q3", "Nickname", QuestionType::Text, false),
        ];
        let submission = Submission::new().with_answer("q1", "   ");

        let err = submission.validate(&questions).unwrap_err();
        assert_eq!(err.to_string(), "Please answer: Full Name, Email");

        let submission = Submission::new().with_answer("q1", "Ada").with_answer("q2", "a@b.c");
        assert!(submission.validate(&questions).is_ok());
    }

    #[test]
    fn test_name_prefers_first_text_question() {
        let questions = vec![
            question("e", "Email", QuestionType::Email, true),
            question("n", "Name", QuestionType::Text, true),
        ];
        let answers: Answers =
            [("e".into(), "ada@example.com".into()), ("n".into(), "Ada".into())].into();
        assert_eq!(derive_name(&questions, &answers), "Ada");
    }

    #[test]
    fn test_name_falls_back_to_first_question_then_anonymous() {
        let questions = vec![question("e", "Email", QuestionType::Email, true)];
        let answers: Answers = [("e".into(), "ada@example.com".into())].into();
        assert_eq!(derive_name(&questions, &answers), "ada@example.com");

        assert_eq!(derive_name(&[], &answers), ANONYMOUS);

        let empty: Answers = [("e".into(), String::new())].into();
        assert_eq!(derive_name(&questions, &empty), ANONYMOUS);
    }
}
