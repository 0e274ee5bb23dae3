//! Taskdeck command-line front-end
//!
//! Thin presentation layer over `taskdeck-core`: every user action is
//! routed through the repository, which owns the collection and its
//! persistence. The binary itself never touches a task field directly.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use taskdeck_core::task::{
    upcoming_reminders, FileTaskStore, StatusFilter, Task, TaskDraft, TaskRepository, TaskStatus,
};

#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "Local task list manager")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Reminder time, RFC 3339 or YYYY-MM-DDTHH:MM (UTC)
        #[arg(long, value_parser = parse_reminder)]
        remind: Option<DateTime<Utc>>,
        /// Create the task already completed
        #[arg(long)]
        completed: bool,
    },
    /// List tasks, filtered by status and search term
    List {
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
        /// Case-insensitive substring match on name or description
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one task in full
    Show { id: Uuid },
    /// Edit a task interactively
    Edit { id: Uuid },
    /// Flip a task between pending and completed
    Toggle { id: Uuid },
    /// Delete a task
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    All,
    Pending,
    Completed,
}

impl std::fmt::Display for StatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => Self::All,
            StatusArg::Pending => Self::Pending,
            StatusArg::Completed => Self::Completed,
        }
    }
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Data directory holding `tasks.json`
fn data_dir() -> PathBuf {
    std::env::var("TASKDECK_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(".taskdeck"))
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let store = FileTaskStore::new(data_dir().join("tasks.json"));
    tracing::debug!("Using task file: {:?}", store.path());
    let mut repo = TaskRepository::open(Box::new(store))?;

    print_reminder_banner(&repo);

    match cli.command {
        Commands::Add {
            name,
            description,
            due,
            remind,
            completed,
        } => {
            let mut draft = TaskDraft::new(name).with_description(description);
            draft.due_date = due;
            draft.reminder = remind;
            if completed {
                draft = draft.with_status(TaskStatus::Completed);
            }
            let task = repo.create(draft)?;
            println!("Added {} ({})", task.name.bold(), task.id);
        }
        Commands::List { status, search } => {
            let tasks: Vec<&Task> = repo.query(status.into(), &search).collect();
            if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                for task in tasks {
                    print_task_row(task);
                }
            }
        }
        Commands::Show { id } => {
            let task = repo
                .find(id)
                .ok_or(taskdeck_core::Error::TaskNotFound(id))?;
            print_task_details(task);
        }
        Commands::Edit { id } => {
            let current = repo.begin_edit(id)?.clone();
            match prompt_draft(&current)? {
                Some(draft) => {
                    let task = repo.update(id, draft)?;
                    println!("Updated {}", task.name.bold());
                }
                None => {
                    repo.cancel_edit();
                    println!("Edit cancelled.");
                }
            }
        }
        Commands::Toggle { id } => {
            let status = repo.toggle_status(id)?;
            println!("Task marked as {status}");
        }
        Commands::Delete { id, yes } => {
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt("Are you sure you want to delete this task?")
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("Delete cancelled.");
            } else if repo.delete(id)? {
                println!("Task deleted.");
            } else {
                println!("No task with id {id}.");
            }
        }
    }

    Ok(())
}

/// One-shot check for reminders in the next half hour, shown before any
/// command output (mirrors the original on-load behavior).
fn print_reminder_banner(repo: &TaskRepository) {
    let upcoming = upcoming_reminders(repo.tasks(), Utc::now());
    if !upcoming.is_empty() {
        let names: Vec<&str> = upcoming.iter().map(|t| t.name.as_str()).collect();
        println!(
            "{} {}",
            "Reminder: upcoming tasks -".yellow().bold(),
            names.join(", ")
        );
    }
}

fn print_task_row(task: &Task) {
    let marker = match task.status {
        TaskStatus::Completed => "[x]".green(),
        TaskStatus::Pending => "[ ]".normal(),
    };
    let name = match task.status {
        TaskStatus::Completed => task.name.strikethrough(),
        TaskStatus::Pending => task.name.normal(),
    };
    let due = task
        .due_date
        .map(|d| format!("  due {d}"))
        .unwrap_or_default();
    println!("{marker} {name}{due}  {}", task.id.to_string().dimmed());
}

fn print_task_details(task: &Task) {
    println!("{}  {}", task.name.bold(), format!("[{}]", task.status).cyan());
    if !task.description.is_empty() {
        println!("  {}", task.description);
    }
    println!("  id:       {}", task.id);
    println!("  created:  {}", task.created_at.format("%Y-%m-%d %H:%M UTC"));
    match task.due_date {
        Some(due) => println!("  due:      {due}"),
        None => println!("  due:      none"),
    }
    match task.reminder {
        Some(reminder) => println!("  reminder: {}", reminder.format("%Y-%m-%d %H:%M UTC")),
        None => println!("  reminder: none"),
    }
}

/// Interactive edit form pre-filled with the task's current fields
///
/// Returns `None` when the user declines the final confirmation.
fn prompt_draft(current: &Task) -> Result<Option<TaskDraft>, Box<dyn Error>> {
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Name")
        .with_initial_text(current.name.clone())
        .interact_text()?;

    let description: String = Input::with_theme(&theme)
        .with_prompt("Description")
        .with_initial_text(current.description.clone())
        .allow_empty(true)
        .interact_text()?;

    let due_text: String = Input::with_theme(&theme)
        .with_prompt("Due date (YYYY-MM-DD, empty for none)")
        .with_initial_text(current.due_date.map(|d| d.to_string()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let due_date = match due_text.trim() {
        "" => None,
        text => Some(text.parse::<NaiveDate>()?),
    };

    let reminder_text: String = Input::with_theme(&theme)
        .with_prompt("Reminder (YYYY-MM-DDTHH:MM, empty for none)")
        .with_initial_text(
            current
                .reminder
                .map(|r| r.format("%Y-%m-%dT%H:%M").to_string())
                .unwrap_or_default(),
        )
        .allow_empty(true)
        .interact_text()?;
    let reminder = match reminder_text.trim() {
        "" => None,
        text => Some(parse_reminder(text)?),
    };

    let statuses = [TaskStatus::Pending, TaskStatus::Completed];
    let selected = Select::with_theme(&theme)
        .with_prompt("Status")
        .items(&["pending", "completed"])
        .default(statuses.iter().position(|s| *s == current.status).unwrap_or(0))
        .interact()?;

    if !Confirm::with_theme(&theme)
        .with_prompt("Apply changes?")
        .default(true)
        .interact()?
    {
        return Ok(None);
    }

    let mut draft = TaskDraft::new(name)
        .with_description(description)
        .with_status(statuses[selected]);
    draft.due_date = due_date;
    draft.reminder = reminder;
    Ok(Some(draft))
}

/// Accepts RFC 3339 or a bare YYYY-MM-DDTHH:MM read as UTC
fn parse_reminder(text: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid reminder '{text}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reminder_rfc3339() {
        let parsed = parse_reminder("2024-05-01T10:30:00Z").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2024-05-01 10:30");
    }

    #[test]
    fn test_parse_reminder_bare_minutes() {
        let parsed = parse_reminder("2024-05-01T10:30").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2024-05-01 10:30");
    }

    #[test]
    fn test_parse_reminder_rejects_garbage() {
        assert!(parse_reminder("soonish").is_err());
    }

    #[test]
    fn test_delete_accepts_yes_flag() {
        let id = Uuid::new_v4().to_string();
        let cli = Cli::try_parse_from(["taskdeck", "delete", &id, "--yes"]).unwrap();
        match cli.command {
            Commands::Delete { yes, .. } => assert!(yes),
            c => panic!("Expected delete command, got: {:?}", c),
        }

        let cli = Cli::try_parse_from(["taskdeck", "delete", &id]).unwrap();
        match cli.command {
            Commands::Delete { yes, .. } => assert!(!yes),
            c => panic!("Expected delete command, got: {:?}", c),
        }
    }

    #[test]
    fn test_status_arg_maps_to_filter() {
        assert_eq!(StatusFilter::from(StatusArg::All), StatusFilter::All);
        assert_eq!(StatusFilter::from(StatusArg::Pending), StatusFilter::Pending);
        assert_eq!(
            StatusFilter::from(StatusArg::Completed),
            StatusFilter::Completed
        );
    }
}
