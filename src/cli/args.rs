// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Notes folder (default: `notes` in the working directory)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Config file (default: <config dir>/notebox/config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Narrows the note list that positions refer to
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Only notes of this subject
    #[arg(short, long, value_name = "SUBJECT")]
    pub subject: Option<String>,

    /// Only notes whose subject or content contains this text (case-insensitive)
    #[arg(short = 'q', long, value_name = "TEXT")]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List subjects
    Subjects,

    /// List notes, newest first
    List {
        #[command(flatten)]
        filter: Filter,
    },

    /// Show the note at a list position
    Show {
        /// 1-based position in the filtered list
        #[arg(value_name = "POS", value_parser = clap::value_parser!(u32).range(1..))]
        position: u32,

        #[command(flatten)]
        filter: Filter,

        /// Output note as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    New {
        /// Subject (folder) of the note
        #[arg(long, value_name = "SUBJECT")]
        subject: String,

        /// Note text; read from stdin when omitted
        #[arg(long, value_name = "TEXT")]
        content: Option<String>,
    },

    /// Change subject and/or content of the note at a list position
    Edit {
        /// 1-based position in the filtered list
        #[arg(value_name = "POS", value_parser = clap::value_parser!(u32).range(1..))]
        position: u32,

        #[command(flatten)]
        filter: Filter,

        /// Move the note to this subject
        #[arg(long, value_name = "SUBJECT")]
        new_subject: Option<String>,

        /// Replace the note text
        #[arg(long, value_name = "TEXT")]
        content: Option<String>,
    },

    /// Delete the note at a list position
    Delete {
        /// 1-based position in the filtered list
        #[arg(value_name = "POS", value_parser = clap::value_parser!(u32).range(1..))]
        position: u32,

        #[command(flatten)]
        filter: Filter,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Write the content of the note at a list position to a file
    Export {
        /// 1-based position in the filtered list
        #[arg(value_name = "POS", value_parser = clap::value_parser!(u32).range(1..))]
        position: u32,

        /// Destination file
        #[arg(value_name = "PATH")]
        destination: PathBuf,

        #[command(flatten)]
        filter: Filter,
    },

    /// Interactive session
    Shell,
}
