//! Names made of emoji.
//!
//! The compiler refuses `let 🍎 = 10;`, so the names live as string keys in an
//! [`EmojiScope`] instead. The point survives the translation: nobody can
//! type, search for, or tell apart these names.

use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;
use std::collections::HashMap;
use std::fmt;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq)]
pub enum EmojiValue {
    Int(i64),
    Text(String),
    Bool(bool),
}

impl fmt::Display for EmojiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmojiValue::Int(n) => write!(f, "{}", n),
            EmojiValue::Text(s) => write!(f, "{}", s),
            EmojiValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

type EmojiOp = fn(i64, i64) -> Option<i64>;

/// Variable bindings and operators keyed by emoji.
#[derive(Debug)]
pub struct EmojiScope {
    bindings: HashMap<String, EmojiValue>,
    operators: HashMap<String, EmojiOp>,
}

impl EmojiScope {
    /// A scope with the four arithmetic operators bound to `➕ ➖ ✖️ ➗`.
    pub fn new() -> Self {
        let mut operators: HashMap<String, EmojiOp> = HashMap::new();
        operators.insert("➕".into(), i64::checked_add);
        operators.insert("➖".into(), i64::checked_sub);
        operators.insert("✖\u{FE0F}".into(), i64::checked_mul);
        operators.insert("➗".into(), i64::checked_div);
        Self {
            bindings: HashMap::new(),
            operators,
        }
    }

    pub fn bind(&mut self, name: &str, value: EmojiValue) {
        self.bindings.insert(name.to_string(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<&EmojiValue> {
        self.bindings.get(name)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.lookup(name)? {
            EmojiValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Looks up operator `op` by its exact code points and applies it.
    pub fn apply(&self, op: &str, a: i64, b: i64) -> Option<i64> {
        let op = self.operators.get(op)?;
        op(a, b)
    }

    /// Binds `target` to the sum of two integer bindings.
    pub fn bind_sum(&mut self, target: &str, a: &str, b: &str) -> Option<i64> {
        let sum = self.apply("➕", self.int(a)?, self.int(b)?)?;
        self.bind(target, EmojiValue::Int(sum));
        Some(sum)
    }
}

impl Default for EmojiScope {
    fn default() -> Self {
        Self::new()
    }
}

/// The 🐍 "class": one attribute named 📛 and one method named 👋.
#[derive(Debug, Clone)]
pub struct EmojiObject {
    class: &'static str,
    attributes: HashMap<String, String>,
}

impl EmojiObject {
    pub fn snake(name_tag: &str) -> Self {
        let mut attributes = HashMap::new();
        attributes.insert("📛".to_string(), name_tag.to_string());
        Self {
            class: "🐍",
            attributes,
        }
    }

    pub fn class(&self) -> &str {
        self.class
    }

    pub fn call(&self, method: &str) -> Option<String> {
        match method {
            "👋" => self
                .attributes
                .get("📛")
                .map(|name| format!("Hello, I'm {}", name)),
            _ => None,
        }
    }
}

/// Letter or `_` first, then letters, digits, `_`.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// `U+XXXX` for every code point in `name`.
pub fn codepoints(name: &str) -> Vec<String> {
    name.chars().map(|c| format!("U+{:04X}", c as u32)).collect()
}

pub fn apple_count_plus_banana_count(apple_count: i64, banana_count: i64) -> i64 {
    apple_count + banana_count
}

pub fn run(_ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut scope = EmojiScope::new();

    scope.bind("🍎", EmojiValue::Int(10));
    scope.bind("🍌", EmojiValue::Int(5));
    if let Some(sum) = scope.bind_sum("➕", "🍎", "🍌") {
        result.line(format!("➕ = 🍎 + 🍌 = {}", sum));
    }

    scope.bind("🔢", EmojiValue::Int(0));
    for _ in 0..3 {
        let next = scope.int("🔢").unwrap_or(0) + 1;
        scope.bind("🔢", EmojiValue::Int(next));
    }
    if let Some(counter) = scope.lookup("🔢") {
        result.line(format!("Counter: {}", counter));
    }
    scope.bind("✅", EmojiValue::Bool(true));
    scope.bind("👋", EmojiValue::Text("Hello, world!".into()));
    if let Some(greeting) = scope.lookup("👋") {
        result.line(format!("👋 = {}", greeting));
    }

    let snake = EmojiObject::snake("Rust");
    if let Some(greeting) = snake.call("👋") {
        result.line(format!("{}(\"Rust\").👋() = {}", snake.class(), greeting));
    }

    for (op, a, b) in [("➕", 5, 3), ("✖\u{FE0F}", 5, 3), ("✖", 5, 3), ("➗", 5, 0)] {
        let outcome = scope
            .apply(op, a, b)
            .map_or_else(|| "no such operator (or no answer)".to_string(), |n| n.to_string());
        result.line(format!("{} {} {} = {}", a, op, b, outcome));
    }

    result.line("Look-alikes:");
    for name in ["🙂", "😊", "✖\u{FE0F}", "✖"] {
        result.line(format!(
            "  {:<4} width {}  {}",
            name,
            name.width(),
            codepoints(name).join(" ")
        ));
    }

    result.line("Valid identifiers?");
    for name in ["🍎", "α", "apple_count", "2fast"] {
        result.line(format!("  {:<12} {}", name, is_valid_identifier(name)));
    }

    result.line(format!(
        "The correct way: apple_count + banana_count = {}",
        apple_count_plus_banana_count(10, 5)
    ));

    result.add_message(CmdMessage::warning(
        "✖️ and ✖ render alike but differ by an invisible variation selector.",
    ));
    result.add_message(CmdMessage::info("Use descriptive names. Save emoji for commit messages."));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    #[test]
    fn emoji_sum_matches_descriptive_sum() {
        let mut scope = EmojiScope::new();
        scope.bind("🍎", EmojiValue::Int(10));
        scope.bind("🍌", EmojiValue::Int(5));
        assert_eq!(scope.bind_sum("➕", "🍎", "🍌"), Some(15));
        assert_eq!(scope.int("➕"), Some(apple_count_plus_banana_count(10, 5)));
    }

    #[test]
    fn bare_multiplication_sign_does_not_resolve() {
        let scope = EmojiScope::new();
        assert_eq!(scope.apply("✖\u{FE0F}", 5, 3), Some(15));
        assert_eq!(scope.apply("✖", 5, 3), None);
        assert_eq!(codepoints("✖\u{FE0F}"), vec!["U+2716", "U+FE0F"]);
    }

    #[test]
    fn look_alikes_differ() {
        assert_eq!(codepoints("🙂"), vec!["U+1F642"]);
        assert_eq!(codepoints("😊"), vec!["U+1F60A"]);
        assert_eq!("🍎".width(), 2);
    }

    #[test]
    fn identifier_rules() {
        assert!(!is_valid_identifier("🍎"));
        assert!(is_valid_identifier("α"));
        assert!(is_valid_identifier("apple_count"));
        assert!(is_valid_identifier("_"));
        assert!(!is_valid_identifier("2fast"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn snake_waves() {
        let snake = EmojiObject::snake("Monty");
        assert_eq!(snake.call("👋").as_deref(), Some("Hello, I'm Monty"));
        assert_eq!(snake.call("🙂"), None);
    }

    #[test]
    fn division_by_zero_has_no_answer() {
        assert_eq!(EmojiScope::new().apply("➗", 5, 0), None);
    }

    #[test]
    fn run_counts_to_three() {
        let env = TestEnv::new();
        let result = run(&env.ctx()).unwrap();
        assert!(result.output.contains(&"Counter: 3".to_string()));
        assert!(result.output.contains(&"➕ = 🍎 + 🍌 = 15".to_string()));
    }
}
