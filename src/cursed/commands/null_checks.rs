use crate::bench::{self, Comparison};
use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;
use crate::unwind;

const UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, Default)]
pub struct User {
    pub name: Option<String>,
}

impl User {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }

    pub fn anonymous() -> Self {
        Self { name: None }
    }
}

/// Unwraps first and asks questions in the panic handler.
pub fn get_uppercase_name(user: Option<&User>) -> String {
    let Ok(user) = unwind::quietly(|| user.unwrap()) else {
        return UNKNOWN.to_string();
    };
    let Ok(name) = unwind::quietly(|| user.name.as_deref().unwrap()) else {
        return UNKNOWN.to_string();
    };
    name.to_uppercase()
}

pub fn get_uppercase_name_correct(user: Option<&User>) -> String {
    match user {
        Some(User { name: Some(name) }) => name.to_uppercase(),
        _ => UNKNOWN.to_string(),
    }
}

pub fn get_uppercase_name_chained(user: Option<&User>) -> String {
    user.and_then(|u| u.name.as_deref())
        .map(str::to_uppercase)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn run(ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let named = User::named("bhargavaram");
    let anonymous = User::anonymous();
    let cases: [(&str, Option<&User>); 3] = [
        ("User with name", Some(&named)),
        ("User with no name", Some(&anonymous)),
        ("No user", None),
    ];

    let approaches: [(&str, fn(Option<&User>) -> String); 3] = [
        ("Catching unwrap panics:", get_uppercase_name),
        ("Explicit match:", get_uppercase_name_correct),
        ("Option combinators:", get_uppercase_name_chained),
    ];
    for (heading, approach) in approaches {
        result.line(heading);
        for (label, user) in cases {
            result.line(format!("  {}: {}", label, approach(user)));
        }
    }

    let pool = [User::named("test"), User::anonymous()];
    let users: Vec<Option<&User>> = (0..ctx.config.bench_iterations)
        .map(|i| pool.get(i % 3))
        .collect();
    let (_, cursed) = bench::timed(|| users.iter().map(|u| get_uppercase_name(*u)).count());
    let (_, correct) =
        bench::timed(|| users.iter().map(|u| get_uppercase_name_correct(*u)).count());
    result.add_comparison(Comparison::new(
        format!("{} lookups", users.len()),
        cursed,
        correct,
    ));

    result.add_message(CmdMessage::warning(
        "A missing value is not a crash. Catching a panic to test for None costs an unwind every time.",
    ));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    #[test]
    fn all_three_agree() {
        let named = User::named("bhargavaram");
        let anonymous = User::anonymous();
        for (user, expected) in [
            (Some(&named), "BHARGAVARAM"),
            (Some(&anonymous), "UNKNOWN"),
            (None, "UNKNOWN"),
        ] {
            assert_eq!(get_uppercase_name(user), expected);
            assert_eq!(get_uppercase_name_correct(user), expected);
            assert_eq!(get_uppercase_name_chained(user), expected);
        }
    }

    #[test]
    fn run_times_every_shape_of_user() {
        let env = TestEnv::new();
        let result = run(&env.ctx()).unwrap();
        assert!(result.output.contains(&"  No user: UNKNOWN".to_string()));
        assert_eq!(result.comparisons[0].label, "200 lookups");
    }
}
