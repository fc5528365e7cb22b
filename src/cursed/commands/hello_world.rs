use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;

/// Builds the greeting one letter at a time, checking along the way that
/// literals still equal themselves. Returns `None` if any check fails, which
/// none can.
#[allow(clippy::bool_comparison)]
pub fn hello_world_the_long_way() -> Option<String> {
    let thought_a = "Is this necessary?";
    let thought_b = "Probably not.";
    let thought_c = "Proceed anyway.";
    let reflection = format!("{} {} {}", thought_a, thought_b, thought_c);
    tracing::debug!(%reflection, "preparing to greet");

    let letter_h = 'H';
    let letter_e = 'e';
    let letter_l = 'l';
    let letter_o = 'o';
    let comma = ',';
    let space = ' ';
    let letter_w = 'W';
    let letter_r = 'r';
    let letter_d = 'd';
    let exclamation = '!';

    if letter_h != 'H' || letter_e != 'e' || letter_l != 'l' || letter_o != 'o' {
        return None;
    }

    let hello: String = [letter_h, letter_e, letter_l, letter_l, letter_o].iter().collect();
    let world: String = [letter_w, letter_o, letter_r, letter_l, letter_d].iter().collect();
    if hello.chars().count() != 5 || world.chars().count() != 5 {
        return None;
    }

    let mut part_1 = String::new();
    part_1.push_str(&hello);
    let mut part_2 = part_1.clone();
    part_2.push(comma);
    let mut part_3 = part_2.clone();
    part_3.push(space);
    let mut part_4 = part_3.clone();
    part_4.push_str(&world);
    let mut part_5 = part_4.clone();
    part_5.push(exclamation);

    let length = part_5.len();
    let has_length = length > 0;
    let really_has_length = has_length == true;
    if !really_has_length {
        return None;
    }

    let ready = true;
    if !ready {
        return None;
    }

    Some(part_5)
}

pub fn hello_world() -> &'static str {
    "Hello, World!"
}

pub fn run(_ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    result.line("The long way:");
    match hello_world_the_long_way() {
        Some(greeting) => result.line(format!("  {}", greeting)),
        None => result.line("  (a literal stopped equalling itself)"),
    }
    result.line("The correct way:");
    result.line(format!("  {}", hello_world()));

    result.line("Lines of code:");
    result.line("  The long way: ~60 lines");
    result.line("  The correct way: 1 line");

    if hello_world_the_long_way().as_deref() == Some(hello_world()) {
        result.add_message(CmdMessage::success("Same 13 characters either way."));
    }
    result.add_message(CmdMessage::warning(
        "Checking that 'H' == 'H' guards against nothing. Write the literal.",
    ));
    Ok(result)
}
