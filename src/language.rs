use std::fmt;
use std::str::FromStr;

use crate::error::TourError;
use crate::observer::{Observable, Subscription};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    /// Cycling order of the language button.
    pub const ALL: [Language; 3] = [Language::English, Language::French, Language::Arabic];

    /// Used whenever a translation is missing.
    pub const FALLBACK: Language = Language::English;

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::Arabic => "ar",
        }
    }

    pub fn next(self) -> Self {
        let position = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(position + 1) % Self::ALL.len()]
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Arabic)
    }

    pub fn feedback(self) -> &'static Feedback {
        match self {
            Language::English => &ENGLISH_FEEDBACK,
            Language::French => &FRENCH_FEEDBACK,
            Language::Arabic => &ARABIC_FEEDBACK,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "fr" | "french" => Ok(Language::French),
            "ar" | "arabic" => Ok(Language::Arabic),
            _ => Err(TourError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Fixed per-language quiz strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: &'static str,
    pub wrong: &'static str,
    pub finished: &'static str,
    pub next: &'static str,
    unavailable: &'static str,
}

impl Feedback {
    pub fn unavailable(&self, target: &str) -> String {
        self.unavailable.replace("{target}", target)
    }
}

const ENGLISH_FEEDBACK: Feedback = Feedback {
    correct: "✅ Correct!",
    wrong: "❌ Wrong!",
    finished: "🎉 Quiz Finished!",
    next: "Next",
    unavailable: "No quiz available for {target}.",
};

const FRENCH_FEEDBACK: Feedback = Feedback {
    correct: "✅ Correct !",
    wrong: "❌ Incorrect !",
    finished: "🎉 Quiz Terminé !",
    next: "Suivant",
    unavailable: "Aucun quiz disponible pour {target}.",
};

const ARABIC_FEEDBACK: Feedback = Feedback {
    correct: "✅ صحيح!",
    wrong: "❌ خطأ!",
    finished: "🎉 انتهى الاختبار!",
    next: "التالي",
    unavailable: "لا يوجد اختبار متاح لـ {target}.",
};

/// Current UI language, shared by every widget that displays text.
#[derive(Debug, Clone, Default)]
pub struct LocalizationStore {
    current: Observable<Language>,
}

impl LocalizationStore {
    pub fn new(language: Language) -> Self {
        Self {
            current: Observable::new(language),
        }
    }

    pub fn current(&self) -> Language {
        self.current.get()
    }

    pub fn set(&self, language: Language) -> bool {
        let changed = self.current.set(language);
        if changed {
            log::debug!("UI language changed to {}", language);
        }
        changed
    }

    pub fn cycle(&self) -> Language {
        let next = self.current().next();
        self.set(next);
        next
    }

    pub fn subscribe(&self, listener: impl Fn(Language) + 'static) -> Subscription {
        self.current.subscribe(move |language: &Language| listener(*language))
    }
}
