//! # CLI Argument Definitions
//!
//! The `boxdraft` command line: a player-facing half (`show`, `register`, `join`, `teammates`)
//! and the password-guarded `admin` half.

use boxdraft::domain::QuestionType;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "boxdraft")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Event registration with capacity-limited boxes")]
pub struct Cli {
    /// Configuration file. Without it an optional `boxdraft.toml` in the working directory is used
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: AppCommands,
}

#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Print the event, the registration form and the boxes
    Show {},
    /// Fill in the registration form
    Register {
        /// One answer as '<question id>=<text>', repeat per question
        #[arg(short, long = "answer", value_parser = parse_answer)]
        answers: Vec<(String, String)>,
        /// Join this box right after registering
        #[arg(short, long, value_name = "BOX")]
        join: Option<String>,
    },
    /// Join a box, or switch to another one, as a registered player
    Join {
        player: String,
        #[arg(value_name = "BOX")]
        box_id: String,
    },
    /// List the members of a player's box
    Teammates { player: String },
    /// Administrator dashboard
    Admin {
        #[arg(short, long)]
        password: String,
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// Print the team board and the players table
    Dashboard {},
    /// Put a player into a box, ignoring its capacity
    Move {
        player: String,
        #[arg(value_name = "BOX")]
        box_id: String,
    },
    /// Send a player back to the unassigned pool
    Unassign { player: String },
    DeletePlayer { player: String },
    AddQuestion {
        label: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short = 't', long = "type", value_enum, default_value_t = KindArg::Text)]
        kind: KindArg,
        /// Make the question optional (questions are required by default)
        #[arg(long)]
        optional: bool,
    },
    /// Change a question; omitted fields keep their value
    EditQuestion {
        id: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "type", value_enum)]
        kind: Option<KindArg>,
        #[arg(long)]
        required: Option<bool>,
    },
    DeleteQuestion { id: String },
    /// Rename or resize a box
    EditBox {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
    },
    /// Change the event settings; omitted fields keep their value
    Settings {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Image URL, or an empty string to remove the banner
        #[arg(long)]
        banner_url: Option<String>,
        /// Vertical focus of the banner in percent, clamped to 0..=100
        #[arg(long, allow_negative_numbers = true)]
        banner_position: Option<i64>,
        #[arg(long)]
        show_teammates: Option<bool>,
    },
    /// Embed an image file as the event banner
    Banner {
        file: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        position: Option<i64>,
    },
    /// Delete every player. Questions, boxes and settings are kept
    Reset {
        /// Confirm the reset; without it only the number of affected players is printed
        #[arg(long)]
        yes: bool,
    },
}

/// Question kinds as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Text,
    Textarea,
    Email,
    Number,
}

impl From<KindArg> for QuestionType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Text => Self::Text,
            KindArg::Textarea => Self::Textarea,
            KindArg::Email => Self::Email,
            KindArg::Number => Self::Number,
        }
    }
}

fn parse_answer(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(id, text)| (id.trim().to_owned(), text.to_owned()))
        .filter(|(id, _)| !id.is_empty())
        .ok_or_else(|| format!("expected '<question id>=<text>', got '{raw}'"))
}
