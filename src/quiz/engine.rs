//! The quiz state machine.
//!
//! One session per visible target:
//! `Idle -> InProgress(0) -> Answered(0) -> InProgress(1) -> ... -> Finished`.
//! A target without questions lands in `Unavailable` instead, which only shows
//! a message. Losing the target sends everything back to `Idle`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::language::{Language, LocalizationStore};
use crate::observer::Subscription;
use crate::presentation::{self, RenderInstruction};
use crate::quiz::{Question, QuestionBank};

pub type SharedEngine = Rc<RefCell<QuizEngine>>;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum QuizPhase {
    Idle,
    Unavailable { target: String },
    InProgress { index: usize },
    Answered { index: usize, choice: usize, correct: bool },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnswerOutcome {
    pub choice: usize,
    pub correct: bool,
}

/// Sound played once an answer is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Cue {
    Correct,
    Wrong,
}

pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
}

impl<F: FnMut(Cue)> CuePlayer for F {
    fn play(&mut self, cue: Cue) {
        self(cue)
    }
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    target_id: String,
    questions: Vec<Question>,
    current_index: usize,
    answer: Option<AnswerOutcome>,
}

impl QuizSession {
    fn new(target_id: &str, questions: Vec<Question>) -> Self {
        Self {
            target_id: target_id.to_string(),
            questions,
            current_index: 0,
            answer: None,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn answered(&self) -> bool {
        self.answer.is_some()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    fn phase(&self) -> QuizPhase {
        if self.questions.is_empty() {
            return QuizPhase::Unavailable {
                target: self.target_id.clone(),
            };
        }
        if self.current_index >= self.questions.len() {
            return QuizPhase::Finished;
        }
        match self.answer {
            Some(AnswerOutcome { choice, correct }) => QuizPhase::Answered {
                index: self.current_index,
                choice,
                correct,
            },
            None => QuizPhase::InProgress {
                index: self.current_index,
            },
        }
    }
}

/// Everything the presentation layer needs to draw the canvas.
#[derive(Debug, Clone, serde::Serialize)]
pub struct QuizSnapshot<'a> {
    pub phase: QuizPhase,
    pub language: Language,
    pub question: Option<&'a Question>,
    pub question_count: usize,
}

pub struct QuizEngine {
    bank: Arc<QuestionBank>,
    language: Language,
    /// Store change that arrived while the engine was borrowed.
    pending_language: Rc<Cell<Option<Language>>>,
    session: Option<QuizSession>,
    audio: Option<Box<dyn CuePlayer>>,
    display: Option<Box<dyn FnMut(&RenderInstruction)>>,
}

impl fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEngine")
            .field("language", &self.language)
            .field("pending_language", &self.pending_language.get())
            .field("session", &self.session)
            .field("audio", &self.audio.is_some())
            .field("display", &self.display.is_some())
            .finish()
    }
}

impl QuizEngine {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            language: Language::default(),
            pending_language: Rc::new(Cell::new(None)),
            session: None,
            audio: None,
            display: None,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_audio(mut self, player: impl CuePlayer + 'static) -> Self {
        self.audio = Some(Box::new(player));
        self
    }

    /// `display` receives a fresh instruction after every transition.
    pub fn with_display(mut self, display: impl FnMut(&RenderInstruction) + 'static) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    pub fn into_shared(self) -> SharedEngine {
        Rc::new(RefCell::new(self))
    }

    pub fn language(&self) -> Language {
        self.pending_language.get().unwrap_or(self.language)
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> QuizPhase {
        self.session
            .as_ref()
            .map(QuizSession::phase)
            .unwrap_or(QuizPhase::Idle)
    }

    pub fn snapshot(&self) -> QuizSnapshot<'_> {
        QuizSnapshot {
            phase: self.phase(),
            language: self.language(),
            question: self.session.as_ref().and_then(QuizSession::current_question),
            question_count: self.session.as_ref().map_or(0, |s| s.questions.len()),
        }
    }

    pub fn render(&self) -> RenderInstruction {
        presentation::render(&self.snapshot())
    }

    /// Starts (or restarts) the quiz for `target`. A target without questions
    /// ends up `Unavailable`, never `InProgress`.
    pub fn start_session(&mut self, target: &str) -> QuizPhase {
        self.apply_pending_language();
        log::info!("Starting quiz for: {}", target);
        let questions = self.bank.questions_for(target).to_vec();
        if questions.is_empty() {
            log::warn!("No questions loaded for {}", target);
        }

        self.session = Some(QuizSession::new(target, questions));
        self.emit();
        self.phase()
    }

    /// Returns `None` when the answer is rejected: no question on screen, the
    /// question was already answered, or `choice` is not a visible option.
    pub fn submit_answer(&mut self, choice: usize) -> Option<AnswerOutcome> {
        self.apply_pending_language();
        let language = self.language;
        let session = self.session.as_mut()?;
        if session.answer.is_some() {
            log::debug!("Ignoring repeated answer {} for {}", choice, session.target_id);
            return None;
        }
        let question = session.questions.get(session.current_index)?;
        if choice >= question.options_in(language).len() {
            log::debug!("Ignoring out-of-range answer {} for {}", choice, session.target_id);
            return None;
        }

        let outcome = AnswerOutcome {
            choice,
            correct: question.is_correct(choice),
        };
        session.answer = Some(outcome);
        log::debug!(
            "{} question {}: answer {} is {}",
            session.target_id,
            session.current_index + 1,
            choice,
            if outcome.correct { "correct" } else { "wrong" }
        );

        if let Some(audio) = self.audio.as_mut() {
            audio.play(if outcome.correct { Cue::Correct } else { Cue::Wrong });
        }
        self.emit();
        Some(outcome)
    }

    /// Moves past an answered question. Returns `false` if nothing was
    /// answered yet.
    pub fn advance(&mut self) -> bool {
        self.apply_pending_language();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.answer.take().is_none() {
            return false;
        }

        session.current_index += 1;
        if session.current_index >= session.questions.len() {
            log::info!("Quiz for {} finished", session.target_id);
        }
        self.emit();
        true
    }

    /// Re-renders in `language`. The question index and answered flag are
    /// left alone.
    pub fn switch_language(&mut self, language: Language) {
        self.pending_language.set(None);
        self.language = language;
        self.emit();
    }

    pub fn cycle_language(&mut self) -> Language {
        let next = self.language().next();
        self.switch_language(next);
        next
    }

    /// Drops the session, as when the target leaves the camera view.
    pub fn reset(&mut self) {
        self.apply_pending_language();
        if let Some(session) = self.session.take() {
            log::debug!("Quiz for {} reset", session.target_id);
            self.emit();
        }
    }

    /// Adopts a language the store published while the engine was busy.
    /// Callers emit afterwards, so the next render is already localized.
    fn apply_pending_language(&mut self) {
        if let Some(language) = self.pending_language.take() {
            log::debug!("Applying deferred language {}", language);
            self.language = language;
        }
    }

    fn emit(&mut self) {
        if self.display.is_none() {
            return;
        }
        let instruction = self.render();
        if let Some(display) = self.display.as_mut() {
            display(&instruction);
        }
    }
}

/// Keeps a shared engine's language in step with `localization`. The engine
/// adopts the store's language straight away. A change that arrives while the
/// engine is mid-transition is held back and applied by its next transition;
/// `language()` reports it in the meantime.
pub fn link_language(engine: &SharedEngine, localization: &LocalizationStore) -> Subscription {
    let pending = {
        let mut engine = engine.borrow_mut();
        engine.switch_language(localization.current());
        engine.pending_language.clone()
    };

    let weak: Weak<RefCell<QuizEngine>> = Rc::downgrade(engine);
    localization.subscribe(move |language| {
        let Some(engine) = weak.upgrade() else {
            return;
        };
        match engine.try_borrow_mut() {
            Ok(mut engine) => engine.switch_language(language),
            Err(_) => {
                log::debug!("Quiz engine busy, deferring switch to {}", language);
                pending.set(Some(language));
            }
        };
    })
}
