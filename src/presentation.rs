//! Projection of quiz state onto the canvas widgets.
//!
//! Nothing here decides anything: [`render`] maps a snapshot to the labels,
//! colours and visibility flags the widgets should show. The responsive
//! helpers keep a widget's text or colour in step with the language and theme
//! stores.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::language::{Language, LocalizationStore};
use crate::observer::Subscription;
use crate::quiz::engine::{QuizPhase, QuizSnapshot};
use crate::quiz::ANSWER_SLOTS;
use crate::theme::ThemeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Alignment {
    Left,
    Right,
}

impl Alignment {
    pub fn for_language(language: Language) -> Self {
        if language.is_rtl() {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }
}

/// What the quiz canvas should display. `None` labels mean the widget is
/// hidden.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderInstruction {
    pub question_label: Option<String>,
    pub option_labels: [Option<String>; ANSWER_SLOTS],
    pub feedback_label: String,
    pub feedback_is_positive: bool,
    pub feedback_color: Color,
    pub next_label: String,
    pub next_label_visible: bool,
    pub controls_enabled: bool,
    pub language_label: String,
    pub alignment: Alignment,
}

impl RenderInstruction {
    fn blank(language: Language) -> Self {
        Self {
            question_label: None,
            option_labels: Default::default(),
            feedback_label: String::new(),
            feedback_is_positive: false,
            feedback_color: Color::BLACK,
            next_label: language.feedback().next.to_string(),
            next_label_visible: false,
            controls_enabled: false,
            language_label: language_label(language).to_string(),
            alignment: Alignment::for_language(language),
        }
    }

    pub fn visible_options(&self) -> usize {
        self.option_labels.iter().filter(|label| label.is_some()).count()
    }
}

/// Text on the language button.
pub fn language_label(language: Language) -> &'static str {
    match language {
        Language::English => "EN",
        Language::French => "FR",
        Language::Arabic => "ع",
    }
}

pub fn render(snapshot: &QuizSnapshot<'_>) -> RenderInstruction {
    let language = snapshot.language;
    let feedback = language.feedback();
    let mut instruction = RenderInstruction::blank(language);

    match &snapshot.phase {
        QuizPhase::Idle => {}
        QuizPhase::Unavailable { target } => {
            instruction.question_label = Some(feedback.unavailable(target));
        }
        QuizPhase::InProgress { .. } | QuizPhase::Answered { .. } => {
            if let Some(question) = snapshot.question {
                instruction.question_label = Some(question.text_in(language).to_string());
                for (slot, option) in instruction
                    .option_labels
                    .iter_mut()
                    .zip(question.options_in(language))
                {
                    *slot = Some(option.clone());
                }
            }

            if let QuizPhase::Answered { correct, .. } = &snapshot.phase {
                let correct = *correct;
                instruction.feedback_label = if correct {
                    feedback.correct
                } else {
                    feedback.wrong
                }
                .to_string();
                instruction.feedback_is_positive = correct;
                instruction.feedback_color = if correct { Color::GREEN } else { Color::RED };
                instruction.next_label_visible = true;
            } else {
                instruction.controls_enabled = true;
            }
        }
        QuizPhase::Finished => {
            instruction.question_label = Some(feedback.finished.to_string());
        }
    }

    instruction
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemedColor {
    pub light: Color,
    pub dark: Color,
}

impl Default for ThemedColor {
    fn default() -> Self {
        Self {
            light: Color::WHITE,
            dark: Color::BLACK,
        }
    }
}

impl ThemedColor {
    pub fn pick(&self, dark: bool) -> Color {
        if dark {
            self.dark
        } else {
            self.light
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemedTarget {
    Image,
    Text,
    DirectionalLight,
}

/// A widget colour that follows the theme store.
#[derive(Debug, Clone)]
pub struct ResponsiveColor {
    target: ThemedTarget,
    colors: ThemedColor,
    applied: Rc<Cell<Color>>,
}

impl ResponsiveColor {
    pub fn new(target: ThemedTarget, colors: ThemedColor) -> Self {
        Self {
            target,
            colors,
            applied: Rc::new(Cell::new(colors.light)),
        }
    }

    /// Applies the current theme right away, then on every change.
    pub fn bind(&self, theme: &ThemeStore) -> Subscription {
        self.applied.set(self.colors.pick(theme.is_dark()));

        let target = self.target;
        let colors = self.colors;
        let applied = self.applied.clone();
        theme.subscribe(move |dark| {
            log::trace!("Recolouring {:?} for dark={}", target, dark);
            applied.set(colors.pick(dark));
        })
    }

    pub fn color(&self) -> Color {
        self.applied.get()
    }
}

/// A static label translated into each language, following the
/// localization store.
#[derive(Debug, Clone)]
pub struct ResponsiveText {
    texts: Rc<HashMap<Language, String>>,
    applied: Rc<RefCell<String>>,
}

impl ResponsiveText {
    pub fn new(english: impl Into<String>) -> Self {
        let english = english.into();
        Self {
            applied: Rc::new(RefCell::new(english.clone())),
            texts: Rc::new(HashMap::from([(Language::FALLBACK, english)])),
        }
    }

    pub fn with(mut self, language: Language, text: impl Into<String>) -> Self {
        Rc::make_mut(&mut self.texts).insert(language, text.into());
        self
    }

    pub fn text_in(&self, language: Language) -> &str {
        self.texts
            .get(&language)
            .or_else(|| self.texts.get(&Language::FALLBACK))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn bind(&self, localization: &LocalizationStore) -> Subscription {
        *self.applied.borrow_mut() = self.text_in(localization.current()).to_string();

        let widget = self.clone();
        localization.subscribe(move |language| {
            let text = widget.text_in(language).to_string();
            *widget.applied.borrow_mut() = text;
        })
    }

    pub fn text(&self) -> String {
        self.applied.borrow().clone()
    }
}
