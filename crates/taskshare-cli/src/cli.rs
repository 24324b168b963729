use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use taskshare_types::ListKind;

#[derive(Parser)]
#[command(
    name = "taskshare",
    about = "Taskshare — inspect and maintain per-user task lists",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data file, overriding the configured one
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add an item to one of a user's lists
    Add(AddArgs),
    /// Show the items in a user's list
    List(ListArgs),
    /// Remove an item from a user's list
    Remove(RemoveArgs),
    /// Show which list holds an item
    Locate(LocateArgs),
    /// Move an item to another of the user's lists
    Move(MoveArgs),
    /// Report items present in more than one list
    Audit(UserArgs),
    /// Remove items from all but their highest-priority list
    Repair(UserArgs),
}

#[derive(Args)]
pub struct AddArgs {
    pub user: String,
    pub item: String,
    /// Message for a new item; defaults to the item id
    #[arg(short, long)]
    pub message: Option<String>,
    #[arg(short, long, default_value = "mine", value_parser = parse_kind)]
    pub list: ListKind,
    #[arg(long, default_value = "")]
    pub foreign_item: String,
    #[arg(long, default_value = "")]
    pub foreign_user: String,
}

#[derive(Args)]
pub struct ListArgs {
    pub user: String,
    #[arg(short, long, default_value = "mine", value_parser = parse_kind)]
    pub list: ListKind,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub user: String,
    pub item: String,
    /// List to remove from; defaults to wherever the item is found
    #[arg(short, long, value_parser = parse_kind)]
    pub list: Option<ListKind>,
}

#[derive(Args)]
pub struct LocateArgs {
    pub user: String,
    pub item: String,
}

#[derive(Args)]
pub struct MoveArgs {
    pub user: String,
    pub item: String,
    #[arg(short, long, value_parser = parse_kind)]
    pub to: ListKind,
    /// Foreign item id for the new entry; defaults to the current one
    #[arg(long)]
    pub foreign_item: Option<String>,
    /// Foreign user for the new entry; defaults to the current one
    #[arg(long)]
    pub foreign_user: Option<String>,
}

#[derive(Args)]
pub struct UserArgs {
    pub user: String,
}

fn parse_kind(s: &str) -> Result<ListKind, String> {
    s.parse().map_err(|e: taskshare_types::TypeError| e.to_string())
}
