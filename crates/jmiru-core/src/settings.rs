//! Global settings loaded from TOML, following the same OnceLock pattern as the romaji table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub alignment: AlignmentSettings,
    pub weights: WeightSettings,
    pub classifier: ClassifierSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlignmentSettings {
    pub max_unmatched: usize,
    pub average_kana_per_kanji: usize,
    pub min_kana_per_kanji: usize,
    pub max_kana_per_kanji: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightSettings {
    pub required: i64,
    pub strong: i64,
    pub medium: i64,
    pub weak: i64,
    pub small_kana_boundary: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    pub romaji_min_run: usize,
    pub romaji_max_runs: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

/// Largest accepted tier weight. Path costs sum many weighted violations, so
/// this leaves room for lines of millions of characters.
const MAX_WEIGHT: i64 = 1_000_000_000_000;

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_negative {
        ($section:ident . $field:ident) => {
            if s.$section.$field < 0 {
                return Err(invalid(
                    concat!(stringify!($section), ".", stringify!($field)),
                    "must be non-negative",
                ));
            }
        };
    }
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(invalid(
                    concat!(stringify!($section), ".", stringify!($field)),
                    "must be positive",
                ));
            }
        };
    }

    check_positive_usize!(alignment.min_kana_per_kanji);
    check_positive_usize!(alignment.max_kana_per_kanji);
    check_positive_usize!(classifier.romaji_min_run);
    check_positive_usize!(classifier.romaji_max_runs);

    let a = &s.alignment;
    if a.max_kana_per_kanji < a.min_kana_per_kanji {
        return Err(invalid(
            "alignment.max_kana_per_kanji",
            "must be at least min_kana_per_kanji",
        ));
    }
    if !(a.min_kana_per_kanji..=a.max_kana_per_kanji).contains(&a.average_kana_per_kanji) {
        return Err(invalid(
            "alignment.average_kana_per_kanji",
            "must lie between min_kana_per_kanji and max_kana_per_kanji",
        ));
    }

    check_non_negative!(weights.weak);
    check_non_negative!(weights.small_kana_boundary);

    let w = &s.weights;
    if w.required > MAX_WEIGHT {
        return Err(invalid("weights.required", "must not exceed 1_000_000_000_000"));
    }
    if !(w.required > w.strong && w.strong > w.medium && w.medium > w.weak) {
        return Err(invalid(
            "weights",
            "tiers must be strictly ordered required > strong > medium > weak",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
[alignment]
max_unmatched = 1
average_kana_per_kanji = 2
min_kana_per_kanji = 1
max_kana_per_kanji = 3

[weights]
required = 1000000
strong = 10000
medium = 100
weak = 1
small_kana_boundary = 5

[classifier]
romaji_min_run = 2
romaji_max_runs = 3
"#;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.alignment.max_unmatched, 2);
        assert_eq!(s.alignment.average_kana_per_kanji, 2);
        assert_eq!(s.alignment.min_kana_per_kanji, 1);
        assert_eq!(s.alignment.max_kana_per_kanji, 4);
        assert_eq!(s.weights.required, 1_000_000_000);
        assert_eq!(s.weights.strong, 1_000_000);
        assert_eq!(s.weights.medium, 1_000);
        assert_eq!(s.weights.weak, 1);
        assert_eq!(s.weights.small_kana_boundary, 1);
        assert_eq!(s.classifier.romaji_min_run, 3);
        assert_eq!(s.classifier.romaji_max_runs, 2);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let s = parse_settings_toml(VALID).unwrap();
        assert_eq!(s.alignment.max_unmatched, 1);
        assert_eq!(s.alignment.max_kana_per_kanji, 3);
        assert_eq!(s.weights.small_kana_boundary, 5);
        assert_eq!(s.classifier.romaji_max_runs, 3);
    }

    #[test]
    fn error_weight_too_large() {
        let toml = VALID.replace("required = 1000000", "required = 9000000000000000000");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("weights.required"));
        let at_cap = VALID.replace("required = 1000000", "required = 1000000000000");
        assert!(parse_settings_toml(&at_cap).is_ok());
    }

    #[test]
    fn error_average_out_of_range() {
        let toml = VALID.replace("average_kana_per_kanji = 2", "average_kana_per_kanji = 5");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("alignment.average_kana_per_kanji"));
    }

    #[test]
    fn error_max_below_min() {
        let toml = VALID.replace("min_kana_per_kanji = 1", "min_kana_per_kanji = 4");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("alignment.max_kana_per_kanji"));
    }

    #[test]
    fn error_zero_min_run() {
        let toml = VALID.replace("romaji_min_run = 2", "romaji_min_run = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("classifier.romaji_min_run"));
    }

    #[test]
    fn error_negative_boundary_weight() {
        let toml = VALID.replace("small_kana_boundary = 5", "small_kana_boundary = -1");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("weights.small_kana_boundary"));
    }

    #[test]
    fn error_unordered_tiers() {
        let toml = VALID.replace("medium = 100", "medium = 100000");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("strictly ordered"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[alignment]
max_unmatched = 2
average_kana_per_kanji = 2
min_kana_per_kanji = 1
max_kana_per_kanji = 4
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
