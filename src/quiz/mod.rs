pub mod bank;
pub mod engine;

use std::collections::HashMap;

use crate::language::Language;

pub use bank::QuestionBank;

/// Number of answer buttons on the quiz canvas.
pub const ANSWER_SLOTS: usize = 4;

/// A multiple-choice question localized into any subset of languages.
/// English is always present and stands in for any missing translation,
/// field by field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    text: HashMap<Language, String>,
    options: HashMap<Language, Vec<String>>,
    correct_index: usize,
}

impl Question {
    pub fn new<I>(text: impl Into<String>, options: I, correct_index: usize) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        debug_assert!(
            correct_index < options.len(),
            "correct answer {} is not among {} options",
            correct_index,
            options.len()
        );
        Self {
            text: HashMap::from([(Language::FALLBACK, text.into())]),
            options: HashMap::from([(Language::FALLBACK, options)]),
            correct_index,
        }
    }

    pub fn translated<I>(self, language: Language, text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.with_text(language, text).with_options(language, options)
    }

    pub fn with_text(mut self, language: Language, text: impl Into<String>) -> Self {
        self.text.insert(language, text.into());
        self
    }

    /// Adds translated options. A list whose length differs from the English
    /// one is dropped, so `correct_index` always points at the same answer in
    /// every language.
    pub fn with_options<I>(mut self, language: Language, options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let expected = self.options_in(Language::FALLBACK).len();
        if language != Language::FALLBACK && options.len() != expected {
            log::warn!(
                "Dropping {} options for \"{}\": got {}, expected {}",
                language,
                self.text_in(Language::FALLBACK),
                options.len(),
                expected
            );
            return self;
        }
        self.options.insert(language, options);
        self
    }

    pub fn text_in(&self, language: Language) -> &str {
        self.text
            .get(&language)
            .or_else(|| self.text.get(&Language::FALLBACK))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn options_in(&self, language: Language) -> &[String] {
        self.options
            .get(&language)
            .or_else(|| self.options.get(&Language::FALLBACK))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_translation(&self, language: Language) -> bool {
        self.text.contains_key(&language) && self.options.contains_key(&language)
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partially_translated() -> Question {
        Question::new("Where is it?", ["Here", "There", "Nowhere", "Everywhere"], 1)
            .with_text(Language::French, "Où est-ce ?")
            .with_options(Language::Arabic, ["هنا", "هناك", "لا مكان", "كل مكان"])
    }

    #[test]
    fn text_falls_back_per_field() {
        let q = partially_translated();
        assert_eq!(q.text_in(Language::French), "Où est-ce ?");
        assert_eq!(q.options_in(Language::French)[0], "Here");
        assert_eq!(q.text_in(Language::Arabic), "Where is it?");
        assert_eq!(q.options_in(Language::Arabic)[1], "هناك");
    }

    #[test]
    fn has_translation_needs_both_fields() {
        let q = partially_translated();
        assert!(q.has_translation(Language::English));
        assert!(!q.has_translation(Language::French));
        assert!(!q.has_translation(Language::Arabic));
    }

    #[test]
    fn mismatched_option_count_keeps_english() {
        let q = Question::new("Which country?", ["Jordan", "Syria", "Iraq"], 0)
            .with_options(Language::French, ["Jordanie", "Syrie"])
            .with_options(Language::Arabic, ["الأردن", "سوريا", "العراق", "مصر"]);
        assert_eq!(q.options_in(Language::French), q.options_in(Language::English));
        assert_eq!(q.options_in(Language::Arabic).len(), 3);
        assert_eq!(q.options_in(Language::Arabic)[0], "Jordan");
        assert!(!q.has_translation(Language::French));
    }

    #[test]
    fn correctness_is_index_equality() {
        let q = partially_translated();
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
        assert!(!q.is_correct(7));
    }
}
