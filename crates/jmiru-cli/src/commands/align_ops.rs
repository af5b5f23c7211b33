use std::process;

use jmiru_engine::align::{align_line, CharClass, LineAlignment};
use jmiru_engine::classify::romaji_line_to_hiragana;
use jmiru_engine::output::render_records;
use jmiru_engine::script::DefaultScriptClassifier;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn align_cmd(kanji: &str, reading: &str, json: bool) {
    let sc = DefaultScriptClassifier;
    let reading = if reading.chars().any(|c| c.is_ascii_alphabetic()) {
        romaji_line_to_hiragana(&sc, reading)
    } else {
        reading.to_string()
    };
    let line = align_line(&sc, kanji, &reading);
    if json {
        let out = die!(serde_json::to_string_pretty(&line), "Error encoding JSON: {}");
        println!("{out}");
    } else {
        print!("{}", format_table(&line));
    }
}

fn pad(s: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    let w = UnicodeWidthStr::width(s);
    if w < width {
        format!("{}{}", s, " ".repeat(width - w))
    } else {
        s.to_string()
    }
}

fn class_label(class: CharClass) -> &'static str {
    match class {
        CharClass::Kanji => "kanji",
        CharClass::Kana => "kana",
        CharClass::Other => "other",
    }
}

/// Per-character table of an alignment.
pub fn format_table(line: &LineAlignment) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== \"{}\" / \"{}\" (pass={:?}, cost={}) ===\n",
        line.source, line.reading, line.pass, line.cost
    ));
    out.push_str(&format!("  {}\n", render_records(&line.records, true)));
    for (i, r) in line.records.iter().enumerate() {
        let flags = match (r.annotate, r.annotate_debug) {
            (true, _) => "annotate",
            (false, true) => "debug",
            (false, false) => "",
        };
        out.push_str(&format!(
            "  {:>3} {} {:<5} [{:>2},{:>2}) {} +{} {}\n",
            i,
            pad(&r.character.to_string(), 2),
            class_label(r.class),
            r.span.start,
            r.span.end,
            pad(&r.matched, 8),
            pad(&r.trailing_unmatched, 6),
            flags,
        ));
    }
    out
}
