// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands, TaskCommands};
use taskhub_client::models::{TaskDraft, TaskEdit};
use taskhub_client::{ApiClient, Session};

mod cli;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    match args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Register {
            username,
            password,
            email,
        } => {
            let mut session = Session::new(ApiClient::new(args.server));
            session.begin_register()?;
            session.register(&username, &password, &email).await?;
            println!("Registered '{username}'. Log in to start adding tasks.");
        }
        Commands::ChangePassword {
            username,
            current_password,
            new_password,
        } => {
            let session = Session::new(ApiClient::new(args.server));
            session
                .change_password(&username, &current_password, &new_password)
                .await?;
            println!("Password changed.");
        }
        Commands::Objectives => {
            let session = Session::new(ApiClient::new(args.server));
            for objective in session.list_objectives().await? {
                println!("{}  {}", objective.id, objective.title);
            }
        }
        Commands::Tasks {
            username,
            password,
            command,
        } => {
            let mut session = Session::new(ApiClient::new(args.server));
            session.login(&username, &password).await?;
            run_task_command(&mut session, command).await?;
            session.logout()?;
        }
    }

    Ok(())
}

async fn run_task_command(session: &mut Session, command: TaskCommands) -> Result<()> {
    match command {
        TaskCommands::List => {
            for task in session.tasks() {
                let mark = if task.completed { 'x' } else { ' ' };
                println!("[{mark}] {}  {}  {}", task.id, task.date, task.title);
            }
        }
        TaskCommands::Add {
            title,
            description,
            date,
            objective,
        } => {
            let task = session
                .create_task(TaskDraft {
                    title,
                    description,
                    date,
                    departmental_goal: objective,
                })
                .await?;
            println!("Added task {}", task.id);
        }
        TaskCommands::Edit {
            id,
            title,
            description,
            date,
            completed,
        } => {
            session
                .update_task(
                    id,
                    TaskEdit {
                        title,
                        description,
                        date,
                        completed,
                    },
                )
                .await?;
            println!("Updated task {id}");
        }
        TaskCommands::Toggle { id } => {
            let completed = session.toggle_task(id).await?;
            println!(
                "Task {id} is now {}",
                if completed { "complete" } else { "open" }
            );
        }
        TaskCommands::Delete { id, yes } => {
            let pending = session.begin_delete(id)?;
            if yes || confirm(&format!("Delete task {id}? [y/N] "))? {
                pending.confirm().await?;
                println!("Deleted task {id}");
            } else {
                pending.cancel();
                println!("Aborted.");
            }
        }
    }
    Ok(())
}

/// Ask the user for a yes/no answer on stdin.
fn confirm(prompt: &str) -> Result<bool> {
    use std::io::Write;

    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
