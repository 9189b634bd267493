//! Command-line interface definition.

use clap::{Parser, Subcommand};
use url::Url;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "taskhub", about = "Taskhub command-line client")]
pub struct Cli {
    /// Base URL of the Taskhub server.
    #[arg(
        long,
        env = "TASKHUB_SERVER",
        default_value = "http://127.0.0.1:8080",
        global = true
    )]
    pub server: Url,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new account.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: String,
    },

    /// Change an account password.
    ChangePassword {
        #[arg(long)]
        username: String,
        #[arg(long)]
        current_password: String,
        #[arg(long)]
        new_password: String,
    },

    /// List the departmental objective catalog.
    Objectives,

    /// Work with your tasks (logs in for the duration of the command).
    Tasks {
        #[arg(long, env = "TASKHUB_USERNAME")]
        username: String,
        #[arg(long, env = "TASKHUB_PASSWORD")]
        password: String,
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Print the CLI version.
    Version,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List your tasks.
    List,

    /// Add a task.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Due date, e.g. 2024-01-01.
        #[arg(long)]
        date: chrono::NaiveDate,
        /// Optional departmental objective to link.
        #[arg(long)]
        objective: Option<Uuid>,
    },

    /// Replace a task's fields.
    Edit {
        id: Uuid,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        date: chrono::NaiveDate,
        #[arg(long)]
        completed: bool,
    },

    /// Flip a task's completion flag.
    Toggle { id: Uuid },

    /// Delete a task (asks for confirmation unless --yes).
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}
