use std::process;

use jmiru_engine::output::{render_bracketed, OutputGroup};
use jmiru_engine::script::DefaultScriptClassifier;

use super::input::read_blocks;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn annotate_cmd(files: &[String], divider: &str, json: bool, debug: bool) {
    let blocks = die!(read_blocks(files, divider), "{}");
    let groups = jmiru_engine::annotate_blocks(&DefaultScriptClassifier, &blocks);
    if json {
        let out = die!(serde_json::to_string_pretty(&groups), "Error encoding JSON: {}");
        println!("{out}");
    } else {
        println!("{}", format_groups(&groups, debug));
    }
}

/// Bracket rendering with a summary of lines that needed the relaxed pass.
pub fn format_groups(groups: &[OutputGroup], debug: bool) -> String {
    let mut out = render_bracketed(groups, debug);
    if debug {
        let relaxed = relaxed_lines(groups);
        if !relaxed.is_empty() {
            out.push_str(&format!("\n\n# relaxed ({}):", relaxed.len()));
            for source in relaxed {
                out.push_str(&format!("\n#   {source}"));
            }
        }
    }
    out
}

fn relaxed_lines(groups: &[OutputGroup]) -> Vec<String> {
    use jmiru_engine::align::SolvePass;
    use jmiru_engine::output::OutputComponent;

    groups
        .iter()
        .flat_map(|g| &g.components)
        .filter_map(|c| match c {
            OutputComponent::Annotated(lines) => Some(lines),
            _ => None,
        })
        .flatten()
        .filter(|l| l.pass == SolvePass::Relaxed)
        .map(|l| l.source.clone())
        .collect()
}
