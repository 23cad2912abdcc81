pub mod config;
pub mod error;
pub mod language;
pub mod observer;
pub mod presentation;
pub mod quiz;
pub mod scene;
pub mod theme;
pub mod tracking;

pub use config::TourConfig;
pub use error::TourError;
pub use language::{Language, LocalizationStore};
pub use observer::{Observable, Subscription};
pub use presentation::RenderInstruction;
pub use quiz::engine::{QuizEngine, QuizPhase, SharedEngine};
pub use quiz::{Question, QuestionBank};
pub use theme::ThemeStore;
pub use tracking::{TrackingBridge, TrackingStatus};
