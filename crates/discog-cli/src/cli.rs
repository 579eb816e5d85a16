use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use discog_types::AlbumId;

#[derive(Parser)]
#[command(
    name = "discog",
    about = "Discog — album catalog kept in plain JSON files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Settings file (TOML). Defaults to ./discog.toml when present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the catalog's JSON files.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List, show, add, edit, or delete albums
    Album {
        #[command(subcommand)]
        action: AlbumAction,
    },
    /// Register users or check credentials
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Subcommand)]
pub enum AlbumAction {
    /// List all albums
    List,
    /// Show one album
    Show { id: AlbumId },
    /// Add an album
    Add(AddArgs),
    /// Edit an album's fields
    Edit(EditArgs),
    /// Delete an album
    Delete { id: AlbumId },
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub title: String,
    #[arg(short, long, default_value = "")]
    pub description: String,
    #[arg(short, long, default_value = "")]
    pub release_date: String,
}

#[derive(Args)]
pub struct EditArgs {
    pub id: AlbumId,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long)]
    pub release_date: Option<String>,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a regular user
    Register { username: String, password: String },
    /// Check a username and password
    Login { username: String, password: String },
}

#[derive(Args)]
pub struct ServeArgs {
    /// Override the configured bind address
    #[arg(long)]
    pub bind: Option<String>,
}
