use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Deserialize)]
struct RomajiFile {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("non-ASCII key: {0}")]
    NonAsciiKey(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("keys differ only in case: {0}")]
    DuplicateKey(String),
    #[error("romaji table already initialized")]
    AlreadyInitialized,
}

/// Parse a `[mappings]` table into lowercase romaji → kana.
///
/// Input is lowercased before lookup, so two keys that fold to the same
/// spelling would shadow each other and are rejected.
pub fn parse_romaji_toml(toml_str: &str) -> Result<BTreeMap<String, String>, RomajiConfigError> {
    let file: RomajiFile =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;
    if file.mappings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }

    let mut table = BTreeMap::new();
    for (romaji, kana) in file.mappings {
        let key = fold_key(&romaji)?;
        if kana.is_empty() {
            return Err(RomajiConfigError::EmptyValue(romaji));
        }
        if table.insert(key, kana).is_some() {
            return Err(RomajiConfigError::DuplicateKey(romaji));
        }
    }
    Ok(table)
}

fn fold_key(romaji: &str) -> Result<String, RomajiConfigError> {
    if romaji.is_empty() || !romaji.is_ascii() {
        return Err(RomajiConfigError::NonAsciiKey(romaji.to_string()));
    }
    Ok(romaji.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_folded() {
        let map = parse_romaji_toml("[mappings]\nKYA = \"きゃ\"\n\"n'\" = \"ん\"\n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["kya"], "きゃ");
        assert_eq!(map["n'"], "ん");
    }

    #[test]
    fn test_default_table() {
        let map = parse_romaji_toml(super::super::table::DEFAULT_TOML).unwrap();
        assert_eq!(map["tsu"], "つ");
        assert_eq!(map["du"], "づ");
        assert!(!map.contains_key("n"));
        assert!(map.keys().all(|k| k.len() <= 4));
    }

    #[test]
    fn test_case_collision() {
        let err = parse_romaji_toml("[mappings]\nka = \"か\"\nKa = \"カ\"\n").unwrap_err();
        assert!(matches!(err, RomajiConfigError::DuplicateKey(k) if k == "ka" || k == "Ka"));
    }

    #[test]
    fn test_rejected_tables() {
        assert!(matches!(
            parse_romaji_toml("[mappings]\n"),
            Err(RomajiConfigError::Empty)
        ));
        assert!(matches!(
            parse_romaji_toml("[mappings]\n\"か\" = \"ka\"\n"),
            Err(RomajiConfigError::NonAsciiKey(_))
        ));
        assert!(matches!(
            parse_romaji_toml("[mappings]\nka = \"\"\n"),
            Err(RomajiConfigError::EmptyValue(k)) if k == "ka"
        ));
        assert!(matches!(
            parse_romaji_toml("mappings = 3"),
            Err(RomajiConfigError::Parse(_))
        ));
    }
}
