use crate::error::CursedError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One entry of the gallery.
///
/// Demos are addressed by their kebab-case name (`regex-json`), by their day
/// number (`7`), or by `dayNN` (`day07`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Demo {
    #[serde(rename = "fizzbuzz")]
    FizzBuzz,
    Calculator,
    ChaosSort,
    LinkedHashmap,
    ArithmeticBool,
    CursiveLoop,
    RegexJson,
    ParanoidSearch,
    Fibonacci,
    HelloWorld,
    FileSingleton,
    PickleDb,
    RestApi,
    ExceptionalFlow,
    EmojiNames,
    NullChecks,
    BitReverse,
    ThreadPool,
    StaticAdder,
    DequeStack,
    FightingQueue,
    CsvTree,
    LinkedDisks,
}

/// Catalog sections for `cursed list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DemoGroup {
    ArithmeticLogic,
    Algorithms,
    DataStructures,
    Persistence,
    LanguageMisuse,
}

impl DemoGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            DemoGroup::ArithmeticLogic => "Arithmetic & Logic:",
            DemoGroup::Algorithms => "Algorithms:",
            DemoGroup::DataStructures => "Data Structures:",
            DemoGroup::Persistence => "Persistence & Services:",
            DemoGroup::LanguageMisuse => "Language Misuse:",
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [DemoGroup] {
        &[
            DemoGroup::ArithmeticLogic,
            DemoGroup::Algorithms,
            DemoGroup::DataStructures,
            DemoGroup::Persistence,
            DemoGroup::LanguageMisuse,
        ]
    }
}

impl Demo {
    pub const ALL: [Demo; 23] = [
        Demo::FizzBuzz,
        Demo::Calculator,
        Demo::ChaosSort,
        Demo::LinkedHashmap,
        Demo::ArithmeticBool,
        Demo::CursiveLoop,
        Demo::RegexJson,
        Demo::ParanoidSearch,
        Demo::Fibonacci,
        Demo::HelloWorld,
        Demo::FileSingleton,
        Demo::PickleDb,
        Demo::RestApi,
        Demo::ExceptionalFlow,
        Demo::EmojiNames,
        Demo::NullChecks,
        Demo::BitReverse,
        Demo::ThreadPool,
        Demo::StaticAdder,
        Demo::DequeStack,
        Demo::FightingQueue,
        Demo::CsvTree,
        Demo::LinkedDisks,
    ];

    pub fn day(self) -> u8 {
        Demo::ALL
            .iter()
            .position(|d| *d == self)
            .map(|i| i as u8 + 1)
            .unwrap_or(0)
    }

    pub fn name(self) -> &'static str {
        match self {
            Demo::FizzBuzz => "fizzbuzz",
            Demo::Calculator => "calculator",
            Demo::ChaosSort => "chaos-sort",
            Demo::LinkedHashmap => "linked-hashmap",
            Demo::ArithmeticBool => "arithmetic-bool",
            Demo::CursiveLoop => "cursive-loop",
            Demo::RegexJson => "regex-json",
            Demo::ParanoidSearch => "paranoid-search",
            Demo::Fibonacci => "fibonacci",
            Demo::HelloWorld => "hello-world",
            Demo::FileSingleton => "file-singleton",
            Demo::PickleDb => "pickle-db",
            Demo::RestApi => "rest-api",
            Demo::ExceptionalFlow => "exceptional-flow",
            Demo::EmojiNames => "emoji-names",
            Demo::NullChecks => "null-checks",
            Demo::BitReverse => "bit-reverse",
            Demo::ThreadPool => "thread-pool",
            Demo::StaticAdder => "static-adder",
            Demo::DequeStack => "deque-stack",
            Demo::FightingQueue => "fighting-queue",
            Demo::CsvTree => "csv-tree",
            Demo::LinkedDisks => "linked-disks",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Demo::FizzBuzz => "FizzBuzz with nothing but nested conditionals",
            Demo::Calculator => "A calculator that only knows strings",
            Demo::ChaosSort => "Chaos sort, now with a progress bar that lies",
            Demo::LinkedHashmap => "A hash map that is a linked list in a fake mustache",
            Demo::ArithmeticBool => "Boolean logic with arithmetic",
            Demo::CursiveLoop => "A for loop made of recursion",
            Demo::RegexJson => "Parsing JSON with regex and string splitting",
            Demo::ParanoidSearch => "Binary search with trust issues",
            Demo::Fibonacci => "Fibonacci, the exponential way",
            Demo::HelloWorld => "Hello World after extensive deliberation",
            Demo::FileSingleton => "A singleton that is really a text file",
            Demo::PickleDb => "A database that re-serializes everything on every write",
            Demo::RestApi => "One POST endpoint to rule them all",
            Demo::ExceptionalFlow => "Panics as control flow",
            Demo::EmojiNames => "Emoji variable names",
            Demo::NullChecks => "Null checks by catching panics",
            Demo::BitReverse => "String reversal via bit shifting",
            Demo::ThreadPool => "Ten threads to return a constant",
            Demo::StaticAdder => "Enterprise addition with zero instances",
            Demo::DequeStack => "Stack from a queue by using the wrong end",
            Demo::FightingQueue => "Queue from two stacks that refuse to cooperate",
            Demo::CsvTree => "A binary tree stored as a CSV string",
            Demo::LinkedDisks => "A linked list with one file per node",
        }
    }

    pub fn group(self) -> DemoGroup {
        match self {
            Demo::FizzBuzz | Demo::Calculator | Demo::ArithmeticBool | Demo::StaticAdder => {
                DemoGroup::ArithmeticLogic
            }
            Demo::ChaosSort
            | Demo::CursiveLoop
            | Demo::RegexJson
            | Demo::ParanoidSearch
            | Demo::Fibonacci
            | Demo::BitReverse => DemoGroup::Algorithms,
            Demo::LinkedHashmap
            | Demo::DequeStack
            | Demo::FightingQueue
            | Demo::CsvTree => DemoGroup::DataStructures,
            Demo::FileSingleton
            | Demo::PickleDb
            | Demo::RestApi
            | Demo::LinkedDisks
            | Demo::ThreadPool => DemoGroup::Persistence,
            Demo::HelloWorld
            | Demo::ExceptionalFlow
            | Demo::EmojiNames
            | Demo::NullChecks => DemoGroup::LanguageMisuse,
        }
    }

    /// True for demos that create files in the scratch directory.
    pub fn touches_disk(self) -> bool {
        matches!(
            self,
            Demo::FileSingleton | Demo::PickleDb | Demo::LinkedDisks
        )
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = CursedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        let digits = needle.strip_prefix("day").unwrap_or(&needle);
        if let Ok(day) = digits.parse::<usize>() {
            return day
                .checked_sub(1)
                .and_then(|i| Demo::ALL.get(i).copied())
                .ok_or_else(|| CursedError::UnknownDemo(s.to_string()));
        }

        let normalized = needle.replace('_', "-");
        Demo::ALL
            .iter()
            .copied()
            .find(|d| d.name() == normalized)
            .ok_or_else(|| CursedError::UnknownDemo(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_are_one_based_and_ordered() {
        assert_eq!(Demo::FizzBuzz.day(), 1);
        assert_eq!(Demo::RegexJson.day(), 7);
        assert_eq!(Demo::LinkedDisks.day(), 23);
    }

    #[test]
    fn parses_names_numbers_and_day_prefix() {
        assert_eq!("regex-json".parse::<Demo>().unwrap(), Demo::RegexJson);
        assert_eq!("regex_json".parse::<Demo>().unwrap(), Demo::RegexJson);
        assert_eq!("7".parse::<Demo>().unwrap(), Demo::RegexJson);
        assert_eq!("day07".parse::<Demo>().unwrap(), Demo::RegexJson);
        assert_eq!("Day23".parse::<Demo>().unwrap(), Demo::LinkedDisks);
    }

    #[test]
    fn rejects_unknown_demos() {
        assert!("0".parse::<Demo>().is_err());
        assert!("24".parse::<Demo>().is_err());
        assert!("quicksort".parse::<Demo>().is_err());
    }

    #[test]
    fn every_demo_belongs_to_a_listed_group() {
        for demo in Demo::ALL {
            assert!(DemoGroup::all().contains(&demo.group()));
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for demo in Demo::ALL {
            assert_eq!(demo.name().parse::<Demo>().unwrap(), demo);
        }
    }
}
