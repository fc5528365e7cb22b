//! A JSON "parser" made of string replacement, one regex, and splitting on
//! commas.
//!
//! Keywords are rewritten everywhere in the input, strings inside it
//! included. Brackets are counted without regard to quotes. Escapes are not a
//! thing. It works on the happy path and nowhere else.

use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::{CursedError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Number, Value};

static QUOTED_OR_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""[^"]*"|\s+"#).unwrap());
static FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+\.\d+$").unwrap());
static INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").unwrap());

/// Nesting depth at which parsing stops, the same limit serde_json uses.
pub const MAX_DEPTH: usize = 128;

const SIMPLE: &str = r#"{"name": "Alice", "age": 30, "active": true}"#;
const ARRAY: &str = r#"[1, 2, 3, "four", null]"#;
const NESTED: &str = r#"{"person": {"name": "Bob", "scores": [85, 90, 95]}}"#;
const ESCAPED: &str = r#"{"key": "He said \"hello\""}"#;
const TRUE_IN_STRING: &str = r#"{"status": "true story"}"#;

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<JsonValue>),
    /// Insertion order; a repeated key replaces the earlier value.
    Object(Vec<(String, JsonValue)>),
}

impl JsonValue {
    pub fn to_serde(&self) -> Value {
        match self {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Int(i) => Value::from(*i),
            JsonValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            JsonValue::Str(s) => Value::String(s.clone()),
            JsonValue::Array(items) => Value::Array(items.iter().map(JsonValue::to_serde).collect()),
            JsonValue::Object(pairs) => {
                let map: Map<String, Value> = pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_serde()))
                    .collect();
                Value::Object(map)
            }
        }
    }
}

pub fn parse_json(text: &str) -> Result<JsonValue> {
    let text = text
        .trim()
        .replace("true", "True")
        .replace("false", "False")
        .replace("null", "None");
    let text = QUOTED_OR_SPACE.replace_all(&text, |caps: &Captures| {
        let run = &caps[0];
        if run.starts_with('"') {
            run.to_string()
        } else {
            String::new()
        }
    });
    parse_value(&text, 0)
}

fn parse_value(value: &str, depth: usize) -> Result<JsonValue> {
    if value.starts_with('{') || value.starts_with('[') {
        if depth >= MAX_DEPTH {
            return Err(CursedError::RecursionLimit(MAX_DEPTH));
        }
        if value.starts_with('{') {
            return parse_object(value, depth + 1);
        }
        return parse_array(value, depth + 1);
    }
    if value.starts_with('"') {
        return Ok(JsonValue::Str(strip_ends(value).to_string()));
    }
    if FLOAT.is_match(value) {
        return value
            .parse()
            .map(JsonValue::Float)
            .map_err(|_| CursedError::UnsupportedJson(value.to_string()));
    }
    if INT.is_match(value) {
        return value
            .parse()
            .map(JsonValue::Int)
            .map_err(|_| CursedError::UnsupportedJson(value.to_string()));
    }
    match value {
        "True" => Ok(JsonValue::Bool(true)),
        "False" => Ok(JsonValue::Bool(false)),
        "None" => Ok(JsonValue::Null),
        other => Err(CursedError::UnsupportedJson(other.to_string())),
    }
}

fn parse_object(text: &str, depth: usize) -> Result<JsonValue> {
    let inner = strip_ends(text);
    let mut pairs: Vec<(String, JsonValue)> = Vec::new();
    if inner.is_empty() {
        return Ok(JsonValue::Object(pairs));
    }

    for pair in split_top_level(inner, ',', None) {
        let mut halves = split_top_level(&pair, ':', Some(1)).into_iter();
        let (Some(key), Some(value)) = (halves.next(), halves.next()) else {
            return Err(CursedError::UnsupportedJson(pair));
        };
        let key = strip_ends(key.trim()).to_string();
        let value = parse_value(&value, depth)?;
        match pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => pairs.push((key, value)),
        }
    }
    Ok(JsonValue::Object(pairs))
}

fn parse_array(text: &str, depth: usize) -> Result<JsonValue> {
    let inner = strip_ends(text);
    if inner.is_empty() {
        return Ok(JsonValue::Array(Vec::new()));
    }
    split_top_level(inner, ',', None)
        .iter()
        .map(|v| parse_value(v, depth))
        .collect::<Result<Vec<_>>>()
        .map(JsonValue::Array)
}

/// Drops the first and last character, whatever they are.
fn strip_ends(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Splits on `delimiter` where the `{[`/`]}` depth is zero. Quotes are not
/// tracked, so brackets inside strings shift the depth.
pub fn split_top_level(text: &str, delimiter: char, max_splits: Option<usize>) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut splits = 0;

    for c in text.chars() {
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => depth -= 1,
            _ => {}
        }
        let may_split = max_splits.map_or(true, |max| splits < max);
        if c == delimiter && depth == 0 && may_split {
            parts.push(std::mem::take(&mut current));
            splits += 1;
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}

fn describe(text: &str) -> String {
    match parse_json(text) {
        Ok(value) => value.to_serde().to_string(),
        Err(e) => format!("failed: {}", e),
    }
}

/// Parses `text` with both parsers. Neither failure is an error here.
pub fn compare(text: &str) -> CmdResult {
    let mut result = CmdResult::default();
    let ours = parse_json(text).map(|v| v.to_serde());
    let real = serde_json::from_str::<Value>(text);

    result.line(format!("Our parser:  {}", describe(text)));
    match &real {
        Ok(value) => result.line(format!("serde_json:  {}", value)),
        Err(e) => result.line(format!("serde_json:  failed: {}", e)),
    }

    match (ours, real) {
        (Ok(a), Ok(b)) if a == b => result.add_message(CmdMessage::success("They agree.")),
        (Err(_), Err(_)) => result.add_message(CmdMessage::info("Neither accepts it.")),
        _ => result.add_message(CmdMessage::warning("They disagree.")),
    }
    result
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for (label, text) in [("Simple object", SIMPLE), ("Array", ARRAY), ("Nested", NESTED)] {
        let ours = parse_json(text)?.to_serde();
        let real: Value = serde_json::from_str(text)?;
        result.line(format!("{}: {}", label, ours));
        if ours == real {
            result.line("  serde_json agrees");
        } else {
            result.line(format!("  serde_json says {}", real));
        }
    }

    result.line("Cases that break this parser:");
    for (label, text) in [("Escaped quotes", ESCAPED), ("'true' in a string", TRUE_IN_STRING)] {
        let real: Value = serde_json::from_str(text)?;
        result.line(format!("  {}: {}", label, text));
        result.line(format!("    Our parser:  {}", describe(text)));
        result.line(format!("    serde_json:  {}", real));
    }

    let iterations = (ctx.config.bench_iterations / 10).max(1);
    let cursed = bench::repeat(iterations, || parse_json(NESTED));
    let correct = bench::repeat(iterations, || serde_json::from_str::<Value>(NESTED));
    result.add_comparison(Comparison::new("parse nested object", cursed, correct));

    result.add_message(CmdMessage::warning(
        "JSON nests; regular expressions cannot count. Use serde_json.",
    ));
    result.add_message(CmdMessage::info(
        "Keywords are rewritten inside strings too, which is how \"true story\" becomes \"True story\".",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;
    use serde_json::json;

    #[test]
    fn compare_flags_disagreement() {
        let agree = compare(r#"{"a": 1}"#);
        assert_eq!(agree.messages[0].content, "They agree.");

        let disagree = compare(r#"{"status": "true story"}"#);
        assert_eq!(disagree.messages[0].content, "They disagree.");
    }

    #[test]
    fn happy_path_matches_serde_json() {
        for text in [SIMPLE, ARRAY, NESTED, "[]", "{}", r#"{"half": -2.5}"#] {
            let ours = parse_json(text).unwrap().to_serde();
            let real: Value = serde_json::from_str(text).unwrap();
            assert_eq!(ours, real, "{}", text);
        }
    }

    #[test]
    fn parses_scalars() {
        assert_eq!(parse_json("42").unwrap(), JsonValue::Int(42));
        assert_eq!(parse_json("-1.5").unwrap(), JsonValue::Float(-1.5));
        assert_eq!(parse_json("true").unwrap(), JsonValue::Bool(true));
        assert_eq!(parse_json("null").unwrap(), JsonValue::Null);
        assert_eq!(parse_json("\"hi\"").unwrap(), JsonValue::Str("hi".into()));
    }

    #[test]
    fn keeps_whitespace_inside_strings() {
        let value = parse_json(r#"{ "a b" : "c  d" }"#).unwrap();
        assert_eq!(value.to_serde(), json!({"a b": "c  d"}));
    }

    #[test]
    fn keywords_leak_into_strings() {
        let value = parse_json(TRUE_IN_STRING).unwrap();
        assert_eq!(value.to_serde(), json!({"status": "True story"}));
    }

    #[test]
    fn escaped_quotes_keep_their_backslashes() {
        let ours = parse_json(ESCAPED).unwrap().to_serde();
        let real: Value = serde_json::from_str(ESCAPED).unwrap();
        assert_ne!(ours, real);
    }

    #[test]
    fn unsupported_values_fail() {
        assert!(matches!(parse_json("1e10"), Err(CursedError::UnsupportedJson(_))));
        assert!(matches!(parse_json("[1,]"), Err(CursedError::UnsupportedJson(_))));
        assert!(matches!(parse_json(r#"{"a"}"#), Err(CursedError::UnsupportedJson(_))));
        assert!(parse_json("").is_err());
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let deep = format!("{}{}", "[".repeat(10_000), "]".repeat(10_000));
        assert!(matches!(
            parse_json(&deep),
            Err(CursedError::RecursionLimit(MAX_DEPTH))
        ));

        let ok = format!("{}1{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse_json(&ok).is_ok());
        let over = format!("{{\"a\": {}1{}}}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(matches!(parse_json(&over), Err(CursedError::RecursionLimit(_))));
    }

    #[test]
    fn later_keys_win() {
        let value = parse_json(r#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(value, JsonValue::Object(vec![("a".into(), JsonValue::Int(2))]));
    }

    #[test]
    fn split_respects_depth_and_limit() {
        assert_eq!(split_top_level("1,[2,3],4", ',', None), vec!["1", "[2,3]", "4"]);
        assert_eq!(split_top_level("\"a\":\"b:c\"", ':', Some(1)), vec!["\"a\"", "\"b:c\""]);
    }

    #[test]
    fn run_shows_disagreement() {
        let env = TestEnv::new();
        let result = run(&env.ctx()).unwrap();
        assert!(result.output.iter().any(|l| l.contains("True story")));
        assert_eq!(result.output[1], "  serde_json agrees");
    }
}
