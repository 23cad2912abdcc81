use crate::error::TourError;
use crate::language::Language;
use crate::scene::Vec3;
use crate::tracking::DEFAULT_CANVAS_OFFSET;

pub const LANGUAGE_VAR: &str = "TOUR_LANGUAGE";
pub const DARK_MODE_VAR: &str = "TOUR_DARK_MODE";
pub const CANVAS_OFFSET_VAR: &str = "TOUR_CANVAS_OFFSET";

#[derive(Debug, Clone, PartialEq)]
pub struct TourConfig {
    pub language: Language,
    pub dark_mode: bool,
    pub canvas_offset: Vec3,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            dark_mode: false,
            canvas_offset: DEFAULT_CANVAS_OFFSET,
        }
    }
}

impl TourConfig {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up a
    /// `.env` file.
    pub fn from_env() -> Result<Self, TourError> {
        Self::from_vars(std::env::vars())
    }

    /// Unknown keys are ignored, missing ones keep their defaults.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, TourError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                LANGUAGE_VAR => config.language = value.parse()?,
                DARK_MODE_VAR => config.dark_mode = parse_flag(key, value)?,
                CANVAS_OFFSET_VAR => config.canvas_offset = parse_offset(key, value)?,
                _ => {}
            }
        }
        Ok(config)
    }
}

fn invalid(key: &str, value: &str) -> TourError {
    TourError::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, TourError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_offset(key: &str, value: &str) -> Result<Vec3, TourError> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid(key, value))?;

    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(invalid(key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_vars() {
        let config = TourConfig::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config, TourConfig::default());
        assert_eq!(config.canvas_offset, Vec3::new(0.0, 0.05, 0.1));
    }

    #[test]
    fn reads_all_settings() {
        let config = TourConfig::from_vars([
            ("TOUR_LANGUAGE", "ar"),
            ("TOUR_DARK_MODE", "Yes"),
            ("TOUR_CANVAS_OFFSET", "0, 0.2, -0.1"),
            ("HOME", "/root"),
        ])
        .unwrap();
        assert_eq!(config.language, Language::Arabic);
        assert!(config.dark_mode);
        assert_eq!(config.canvas_offset, Vec3::new(0.0, 0.2, -0.1));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            TourConfig::from_vars([("TOUR_LANGUAGE", "klingon")]),
            Err(TourError::UnknownLanguage("klingon".to_string()))
        );
        assert!(matches!(
            TourConfig::from_vars([("TOUR_DARK_MODE", "maybe")]),
            Err(TourError::InvalidSetting { .. })
        ));
        assert!(matches!(
            TourConfig::from_vars([("TOUR_CANVAS_OFFSET", "1,2")]),
            Err(TourError::InvalidSetting { .. })
        ));
        assert!(matches!(
            TourConfig::from_vars([("TOUR_CANVAS_OFFSET", "a,b,c")]),
            Err(TourError::InvalidSetting { .. })
        ));
    }
}
