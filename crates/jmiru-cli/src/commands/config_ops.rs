use std::fs;
use std::process;

use jmiru_engine::romaji::{parse_romaji_toml, RomajiTable};
use jmiru_engine::settings::{self, parse_settings_toml};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Install custom settings and romaji tables before any pipeline call.
pub fn install_custom(settings_file: Option<&str>, romaji_file: Option<&str>) {
    if let Some(file) = settings_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(settings::init_custom(content), "Error in {file}: {}");
    }
    if let Some(file) = romaji_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(RomajiTable::init_custom(content), "Error in {file}: {}");
    }
}

pub fn romaji_export() {
    print!("{}", jmiru_engine::romaji::default_toml());
}

pub fn romaji_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(parse_romaji_toml(&content), "Error: {}");
    println!("OK: {} mappings", map.len());
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: alignment.max_unmatched={}, alignment.kana_per_kanji={}..={}, weights.small_kana_boundary={}",
        s.alignment.max_unmatched,
        s.alignment.min_kana_per_kanji,
        s.alignment.max_kana_per_kanji,
        s.weights.small_kana_boundary
    );
}
