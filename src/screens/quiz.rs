//! Quiz screen state: walks the three questions, collects answer ids and
//! shows the personalized profile after the last one.

use crate::quiz::{QUESTIONS, Question, ResultProfile, personalized_result};

pub struct QuizState {
    /// Index of the question being asked.
    pub current: usize,
    /// Cursor within the current question's options.
    pub selected_option: usize,
    answers: Vec<&'static str>,
    pub show_results: bool,
}

impl QuizState {
    pub fn new() -> Self {
        Self {
            current: 0,
            selected_option: 0,
            answers: Vec::new(),
            show_results: false,
        }
    }

    pub fn question(&self) -> &'static Question {
        &QUESTIONS[self.current]
    }

    pub fn next_option(&mut self) {
        let n = self.question().options.len();
        self.selected_option = (self.selected_option + 1) % n;
    }

    pub fn prev_option(&mut self) {
        let n = self.question().options.len();
        self.selected_option = (self.selected_option + n - 1) % n;
    }

    /// Record the highlighted option; advances to the next question or,
    /// after the last one, to the results.
    pub fn answer(&mut self) {
        if self.show_results {
            return;
        }

        let id = self.question().options[self.selected_option].id;
        self.answers.push(id);

        if self.current + 1 < QUESTIONS.len() {
            self.current += 1;
            self.selected_option = 0;
        } else {
            self.show_results = true;
        }
    }

    /// Reset everything, as the "Retake Quiz" button does.
    pub fn retake(&mut self) {
        *self = Self::new();
    }

    pub fn answers(&self) -> &[&'static str] {
        &self.answers
    }

    pub fn result(&self) -> ResultProfile {
        personalized_result(&self.answers)
    }

    /// Progress through the questions, 1-based, as a percentage.
    pub fn progress_percent(&self) -> u16 {
        (((self.current + 1) * 100) / QUESTIONS.len()) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answering_every_question_reaches_the_results() {
        let mut s = QuizState::new();
        assert_eq!(s.progress_percent(), 33);

        s.answer();
        assert_eq!(s.current, 1);
        assert!(!s.show_results);

        s.answer();
        assert_eq!(s.progress_percent(), 100);

        s.answer();
        assert!(s.show_results);
        assert_eq!(s.answers().len(), 3);

        // Further answers are ignored once results are shown.
        s.answer();
        assert_eq!(s.answers().len(), 3);
    }

    #[test]
    fn selected_options_feed_the_result_profile() {
        let mut s = QuizState::new();
        // First option of question 1 is "meditation".
        s.answer();
        s.answer();
        s.answer();
        assert_eq!(s.result().title, "The Meditative Soul");
    }

    #[test]
    fn retake_clears_all_state() {
        let mut s = QuizState::new();
        s.next_option();
        s.answer();
        s.answer();
        s.answer();
        assert!(s.show_results);

        s.retake();
        assert_eq!(s.current, 0);
        assert_eq!(s.selected_option, 0);
        assert!(s.answers().is_empty());
        assert!(!s.show_results);
    }

    #[test]
    fn option_cursor_wraps_within_a_question() {
        let mut s = QuizState::new();
        s.prev_option();
        assert_eq!(s.selected_option, 3);
        s.next_option();
        assert_eq!(s.selected_option, 0);
    }
}
