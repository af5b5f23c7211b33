use toml::Value;

const SETTINGS: &str = "src/default_settings.toml";
const ROMAJI: &str = "src/romaji/default_romaji.toml";

/// Integer keys `settings::Settings` deserializes, per section.
const SETTINGS_KEYS: &[(&str, &[&str])] = &[
    (
        "alignment",
        &[
            "max_unmatched",
            "average_kana_per_kanji",
            "min_kana_per_kanji",
            "max_kana_per_kanji",
        ],
    ),
    (
        "weights",
        &["required", "strong", "medium", "weak", "small_kana_boundary"],
    ),
    ("classifier", &["romaji_min_run", "romaji_max_runs"]),
];

fn main() {
    println!("cargo:rerun-if-changed={SETTINGS}");
    println!("cargo:rerun-if-changed={ROMAJI}");

    let settings = parse(SETTINGS, include_str!("src/default_settings.toml"));
    for (section, keys) in SETTINGS_KEYS {
        for key in *keys {
            let value = settings.get(section).and_then(|t| t.get(key));
            if !matches!(value, Some(Value::Integer(n)) if *n >= 0) {
                panic!("{SETTINGS}: {section}.{key} must be a non-negative integer");
            }
        }
    }

    let romaji = parse(ROMAJI, include_str!("src/romaji/default_romaji.toml"));
    let Some(Value::Table(mappings)) = romaji.get("mappings") else {
        panic!("{ROMAJI}: missing [mappings] table");
    };
    if mappings.is_empty() {
        panic!("{ROMAJI}: [mappings] is empty");
    }
    for (key, value) in mappings {
        if !key.is_ascii() || !matches!(value, Value::String(s) if !s.is_empty()) {
            panic!("{ROMAJI}: bad mapping {key:?}");
        }
    }
}

fn parse(path: &str, content: &str) -> Value {
    content
        .parse::<Value>()
        .unwrap_or_else(|e| panic!("{path} contains invalid TOML: {e}"))
}
