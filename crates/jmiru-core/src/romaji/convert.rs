use super::table::RomajiTable;

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// Convert a romaji string to hiragana using the global table.
///
/// Input is lowercased first. Characters that cannot be converted (unknown
/// Latin sequences, digits, kana already present) are copied through, so the
/// caller can tell from the result whether the whole input was romaji.
pub fn romaji_to_hiragana(input: &str) -> String {
    convert_with(RomajiTable::global(), input)
}

pub(crate) fn convert_with(table: &RomajiTable, input: &str) -> String {
    let chars: Vec<char> = input.to_lowercase().chars().collect();
    let mut out = String::with_capacity(input.len() * 3);
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if !ch.is_ascii() {
            out.push(ch);
            i += 1;
            continue;
        }

        if let Some(len) = longest_match(table, &chars[i..], &mut out) {
            i += len;
            continue;
        }

        let next = chars.get(i + 1).copied();
        match next {
            // Sokuon (っ): doubled consonant, or the "tch" spelling of っち
            Some(n) if ch.is_ascii_lowercase() && !is_vowel(ch) && ch != 'n' && n == ch => {
                out.push('っ');
            }
            Some('c') if ch == 't' => out.push('っ'),
            // Hatsuon (ん): n not starting a syllable
            _ if ch == 'n' && next.map_or(true, |n| !is_vowel(n) && n != 'y') => out.push('ん'),
            _ => out.push(ch),
        }
        i += 1;
    }

    out
}

/// Try the longest table key starting at `chars[0]`; push its kana and return its length.
fn longest_match(table: &RomajiTable, chars: &[char], out: &mut String) -> Option<usize> {
    let max = table.max_key_len().min(chars.len());
    for len in (1..=max).rev() {
        let key: String = chars[..len].iter().collect();
        if let Some(kana) = table.get(&key) {
            out.push_str(kana);
            return Some(len);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_words() {
        assert_eq!(romaji_to_hiragana("koko"), "ここ");
        assert_eq!(romaji_to_hiragana("de"), "で");
        assert_eq!(romaji_to_hiragana("kakite"), "かきて");
        assert_eq!(romaji_to_hiragana("kudasai"), "ください");
    }

    #[test]
    fn test_youon() {
        assert_eq!(romaji_to_hiragana("kyouha"), "きょうは");
        assert_eq!(romaji_to_hiragana("shashin"), "しゃしん");
        assert_eq!(romaji_to_hiragana("yousha"), "ようしゃ");
    }

    #[test]
    fn test_sokuon() {
        assert_eq!(romaji_to_hiragana("kakkoii"), "かっこいい");
        assert_eq!(romaji_to_hiragana("matcha"), "まっちゃ");
        assert_eq!(romaji_to_hiragana("miushinatta"), "みうしなった");
    }

    #[test]
    fn test_hatsuon() {
        assert_eq!(romaji_to_hiragana("konnichiwa"), "こんにちわ");
        assert_eq!(romaji_to_hiragana("hon"), "ほん");
        assert_eq!(romaji_to_hiragana("kanji"), "かんじ");
        assert_eq!(romaji_to_hiragana("kin'en"), "きんえん");
        assert_eq!(romaji_to_hiragana("onna"), "おんな");
    }

    #[test]
    fn test_uppercase_is_lowered() {
        assert_eq!(romaji_to_hiragana("Koko"), "ここ");
    }

    #[test]
    fn test_unconvertible_passthrough() {
        assert_eq!(romaji_to_hiragana("write"), "wりて");
        assert_eq!(romaji_to_hiragana("please"), "pぇあせ");
        assert_eq!(romaji_to_hiragana("2"), "2");
    }

    #[test]
    fn test_kana_passthrough() {
        assert_eq!(romaji_to_hiragana("あka"), "あか");
    }

    #[test]
    fn test_custom_table() {
        let mut map = std::collections::BTreeMap::new();
        map.insert("a".to_string(), "あ".to_string());
        map.insert("ka".to_string(), "か".to_string());
        let table = RomajiTable::from_map(map);
        assert_eq!(convert_with(&table, "kaka"), "かか");
        assert_eq!(convert_with(&table, "kki"), "っki");
    }
}
