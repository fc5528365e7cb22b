use crate::commands::{CmdMessage, CmdResult};
use crate::model::{Demo, DemoGroup};

/// Every demo in day order, for the grouped listing.
pub fn run() -> CmdResult {
    let mut result = CmdResult::default().with_listed_demos(Demo::ALL.to_vec());
    result.add_message(CmdMessage::info(format!(
        "{} demos in {} groups. Run one with `cursed run <name|day>`.",
        Demo::ALL.len(),
        DemoGroup::all().len()
    )));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_demo_once() {
        let result = run();
        assert_eq!(result.listed_demos.len(), 23);
        assert_eq!(result.listed_demos[0], Demo::FizzBuzz);
        assert_eq!(result.listed_demos[22], Demo::LinkedDisks);
        assert!(result.output.is_empty());
    }
}
