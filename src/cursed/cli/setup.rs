use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cursed",
    bin_name = "cursed",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "A gallery of cursed code, each next to the code it should have been", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory for config and scratch files
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub work_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Gallery,
    Try,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Gallery => "Gallery:",
            CommandGroup::Try => "Try It Yourself:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    /// Returns the group for a given command name
    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "run" | "all" => Some(CommandGroup::Gallery),
            "calc" | "json" | "age" | "api" => Some(CommandGroup::Try),
            "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Gallery, CommandGroup::Try, CommandGroup::Misc]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("cursed {version}\n"));
    output.push_str("A gallery of cursed code, each next to the code it should have been\n");
    output.push('\n');
    output.push_str("Usage: cursed [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --work-dir <DIR>  Directory for config and scratch files\n");
    output.push_str("  -v, --verbose         Verbose output\n");
    output.push_str("      --json            Print results as JSON\n");
    output.push_str("  -h, --help            Print help\n");
    output.push_str("  -V, --version         Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a specific subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    let subcommand_name = match command {
        Some(Commands::Gallery(c)) => match c {
            GalleryCommands::List => "list",
            GalleryCommands::Run { .. } => "run",
            GalleryCommands::All => "all",
        },
        Some(Commands::Try(c)) => match c {
            TryCommands::Calc { .. } => "calc",
            TryCommands::Json { .. } => "json",
            TryCommands::Age { .. } => "age",
            TryCommands::Api { .. } => "api",
        },
        Some(Commands::Misc(c)) => match c {
            MiscCommands::Config { .. } => "config",
            MiscCommands::Help { .. } => "help",
        },
        None => {
            print_grouped_help();
            return;
        }
    };

    print_help_for_command(subcommand_name);
}

/// Prints help for a command by name
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Gallery(GalleryCommands),

    #[command(flatten)]
    Try(TryCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum GalleryCommands {
    /// List the demos, grouped
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Run one or more demos
    #[command(alias = "r", display_order = 2)]
    Run {
        /// Demo names, day numbers or dayNN (e.g. regex-json 7 day07)
        #[arg(required = true, num_args = 1..)]
        demos: Vec<String>,
    },

    /// Run every demo in day order
    #[command(display_order = 3)]
    All,
}

#[derive(Subcommand, Debug)]
pub enum TryCommands {
    /// Calculate with strings and with f64
    #[command(display_order = 10)]
    Calc {
        x: String,
        /// One of + - * /
        #[arg(allow_hyphen_values = true)]
        op: String,
        #[arg(allow_hyphen_values = true)]
        y: String,
    },

    /// Parse JSON with regex and with serde_json
    #[command(display_order = 11)]
    Json { text: String },

    /// Validate an age three ways
    #[command(display_order = 12)]
    Age {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// Send JSON bodies to the one-endpoint API
    #[command(display_order = 13)]
    Api {
        #[arg(required = true, num_args = 1..)]
        bodies: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Show or set configuration
    #[command(display_order = 30)]
    Config {
        /// Config key (e.g. precision)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },

    /// Print help for a command
    #[command(display_order = 31)]
    Help {
        /// Command to show help for
        command: Option<String>,
    },
}
