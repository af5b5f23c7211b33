use std::process;

use jmiru_engine::classify::{classify_block, ClassifiedLine};
use jmiru_engine::script::DefaultScriptClassifier;

use super::input::read_file_or_stdin;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn classify_cmd(file: Option<&str>) {
    let content = die!(read_file_or_stdin(file), "{}");
    let lines = classify_block(&DefaultScriptClassifier, content.trim_end_matches('\n'));
    print!("{}", format_lines(&lines));
}

pub fn format_lines(lines: &[ClassifiedLine]) -> String {
    lines
        .iter()
        .map(|l| format!("{:<12} {}\n", l.line_type.as_str(), l.line))
        .collect()
}
