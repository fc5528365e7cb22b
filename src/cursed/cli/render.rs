//! # Rendering
//!
//! Turns [`CmdResult`]s into terminal text. Everything here returns strings so
//! it can be tested without a terminal; `commands.rs` does the printing.

use colored::Colorize;
use cursed::api::{CmdMessage, CmdResult, MessageLevel};
use cursed::bench::Comparison;
use cursed::config::CursedConfig;
use cursed::model::{Demo, DemoGroup};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

const RULE_WIDTH: usize = 72;
const LABEL_WIDTH: usize = 28;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// The catalog, one section per group in day order within each.
pub(super) fn render_catalog(demos: &[Demo]) -> String {
    let mut output = String::new();
    for group in DemoGroup::all() {
        let members: Vec<_> = demos.iter().filter(|d| d.group() == *group).collect();
        if members.is_empty() {
            continue;
        }
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!("{}\n", group.heading().bold()));
        for demo in members {
            let disk = if demo.touches_disk() { " (disk)" } else { "" };
            output.push_str(&format!(
                "  {:>2}  {}{} {}{}\n",
                demo.day(),
                demo.name().cyan(),
                " ".repeat(18usize.saturating_sub(demo.name().width())),
                demo.title(),
                disk.dimmed()
            ));
        }
    }
    output
}

/// Header, output lines and timing table of one result. Messages are printed
/// separately so they keep their level colors.
pub(super) fn render_result(result: &CmdResult) -> String {
    let mut output = String::new();

    if let Some(demo) = result.demo {
        let header = format!("Day {:02} · {}", demo.day(), demo.name());
        output.push_str(&format!("{} {}\n", header.bold(), demo.title().dimmed()));
        output.push_str(&format!("{}\n", "─".repeat(RULE_WIDTH).dimmed()));
    }

    for line in &result.output {
        output.push_str(line);
        output.push('\n');
    }

    if !result.comparisons.is_empty() {
        output.push('\n');
        output.push_str(&render_comparisons(&result.comparisons));
    }

    output
}

pub(super) fn render_comparisons(comparisons: &[Comparison]) -> String {
    let mut output = format!(
        "  {}{:>12} {:>12} {:>10}\n",
        pad_to_width("Timing", LABEL_WIDTH).bold(),
        "cursed".bold(),
        "correct".bold(),
        "slowdown".bold()
    );
    for cmp in comparisons {
        let slowdown = cmp
            .slowdown()
            .map(|x| format!("{:.1}x", x))
            .unwrap_or_else(|| "n/a".to_string());
        let slowdown = if cmp.slowdown().is_some_and(|x| x >= 1.0) {
            slowdown.red()
        } else {
            slowdown.green()
        };
        output.push_str(&format!(
            "  {}{:>9.3} ms {:>9.3} ms {:>10}\n",
            pad_to_width(&cmp.label, LABEL_WIDTH),
            cmp.cursed_ms,
            cmp.correct_ms,
            slowdown
        ));
    }
    output
}

pub(super) fn render_config(config: &CursedConfig) -> String {
    config
        .entries()
        .into_iter()
        .map(|(key, value)| format!("{} = {}\n", key, value))
        .collect()
}

pub(super) fn render_json<T: Serialize + ?Sized>(value: &T) -> cursed::error::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Pads by display width so emoji labels line up.
fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}
