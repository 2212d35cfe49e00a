//! Argument parsing and dispatch for `birth_prep_cli`.

use std::str::FromStr;

use strsim::levenshtein;
use thiserror::Error;
use tracing::debug;

use crate::{
    config::{ConfigManager, PlannerConfig},
    core::{BirthPrepPlanner, SystemClock},
    domain::{ContactField, Displayable, ExpenseCategory},
    errors::{ConfigError, PlannerError},
    storage::{JsonFileStore, CHECKLIST_KEY, CONTACTS_KEY, FINANCIAL_PLAN_KEY},
    utils::build_info,
};

use super::output::{self, ConsoleNotifier};

const COMMAND_NAMES: [&str; 12] = [
    "show", "sections", "checklist", "contacts", "toggle", "contact", "finance", "backups",
    "restore", "reset", "version", "help",
];

pub const USAGE: &str = "Usage: birth_prep_cli <command>\n\
Commands:\n  \
show                          plan summary\n  \
sections [id]                 preparation guidance\n  \
checklist                     list checklist items with ids\n  \
contacts                      list emergency contacts with indices\n  \
toggle <id>                   tick or untick a checklist item\n  \
contact <index> <name|phone> <value>\n  \
finance <field> <value>       field: due-date, target, current, transport,\n                                facility, supplies, emergency, postpartum\n  \
backups <section>             section: checklist, contacts, finance\n  \
restore <section> <backup>\n  \
reset                         restore the default plan\n  \
version";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("Unknown command `{input}`")]
    UnknownCommand {
        input: String,
        suggestion: Option<String>,
    },
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The failure was already shown to the user through the notifier.
    #[error("command failed")]
    Reported,
}

/// One of the three persisted plan sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Checklist,
    Contacts,
    Finance,
}

impl Section {
    pub fn key(self) -> &'static str {
        match self {
            Section::Checklist => CHECKLIST_KEY,
            Section::Contacts => CONTACTS_KEY,
            Section::Finance => FINANCIAL_PLAN_KEY,
        }
    }
}

impl FromStr for Section {
    type Err = CliError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "checklist" => Ok(Section::Checklist),
            "contacts" => Ok(Section::Contacts),
            "finance" | "financial-plan" => Ok(Section::Finance),
            other => Err(CliError::Usage(format!("unknown section `{}`", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinanceField {
    DueDate,
    Target,
    Current,
    Expense(ExpenseCategory),
}

impl FromStr for FinanceField {
    type Err = CliError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "due-date" | "due" => Ok(FinanceField::DueDate),
            "target" => Ok(FinanceField::Target),
            "current" => Ok(FinanceField::Current),
            other => other
                .parse::<ExpenseCategory>()
                .map(FinanceField::Expense)
                .map_err(|_| CliError::Usage(format!("unknown finance field `{}`", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Sections(Option<String>),
    Checklist,
    Contacts,
    Toggle(String),
    Contact {
        index: usize,
        field: ContactField,
        value: String,
    },
    Finance {
        field: FinanceField,
        value: String,
    },
    Backups(Section),
    Restore {
        section: Section,
        backup: String,
    },
    Reset,
    Version,
    Help,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };
        let command = match name.as_str() {
            "show" => Command::Show,
            "sections" => Command::Sections(rest.first().cloned()),
            "checklist" => Command::Checklist,
            "contacts" => Command::Contacts,
            "toggle" => Command::Toggle(required(rest, 0, "toggle <id>")?.to_string()),
            "contact" => {
                let usage = "contact <index> <name|phone> <value>";
                let index = required(rest, 0, usage)?
                    .parse::<usize>()
                    .map_err(|_| CliError::Usage(format!("invalid contact index; {}", usage)))?;
                let field = required(rest, 1, usage)?.parse::<ContactField>()?;
                Command::Contact {
                    index,
                    field,
                    value: rest.get(2..).unwrap_or_default().join(" "),
                }
            }
            "finance" => {
                let usage = "finance <field> <value>";
                let field = required(rest, 0, usage)?.parse::<FinanceField>()?;
                Command::Finance {
                    field,
                    value: rest.get(1..).unwrap_or_default().join(" "),
                }
            }
            "backups" => Command::Backups(required(rest, 0, "backups <section>")?.parse()?),
            "restore" => {
                let usage = "restore <section> <backup>";
                Command::Restore {
                    section: required(rest, 0, usage)?.parse()?,
                    backup: required(rest, 1, usage)?.to_string(),
                }
            }
            "reset" => Command::Reset,
            "version" | "--version" => Command::Version,
            "help" | "--help" | "-h" => Command::Help,
            other => {
                return Err(CliError::UnknownCommand {
                    input: other.to_string(),
                    suggestion: suggest(other),
                })
            }
        };
        Ok(command)
    }
}

fn required<'a>(args: &'a [String], index: usize, usage: &str) -> Result<&'a str, CliError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("missing argument; usage: {}", usage)))
}

/// Closest known command within an edit distance of 3.
pub fn suggest(input: &str) -> Option<String> {
    let mut suggestions: Vec<_> = COMMAND_NAMES
        .iter()
        .map(|name| (levenshtein(name, input), *name))
        .collect();
    suggestions.sort_by_key(|(distance, _)| *distance);
    suggestions
        .first()
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, name)| name.to_string())
}

/// Parses `args` (without the program name) and runs the command against the
/// plan stored under the configured data directory.
pub fn run_cli(args: Vec<String>) -> Result<(), CliError> {
    let command = Command::parse(&args)?;
    debug!(?command, "running command");
    match command {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Version => {
            let build = build_info::current();
            println!("birth_prep_cli {}", build.summary());
            println!("target {} ({}), {}", build.target, build.profile, build.rustc);
            return Ok(());
        }
        _ => {}
    }

    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    let store = JsonFileStore::with_retention(
        config.resolve_data_dir(manager.home()),
        config.backup_retention,
    )?;
    let mut planner = BirthPrepPlanner::new(
        Default::default(),
        Box::new(store.clone()),
        Box::new(ConsoleNotifier),
        Box::new(SystemClock),
    );
    planner.load();

    execute(command, &mut planner, &store, &config)
}

fn execute(
    command: Command,
    planner: &mut BirthPrepPlanner,
    store: &JsonFileStore,
    config: &PlannerConfig,
) -> Result<(), CliError> {
    match command {
        Command::Show => print_summary(planner, config),
        Command::Sections(None) => {
            for section in &planner.seed().sections {
                output::section(section.title);
                println!("{}", section.content);
            }
        }
        Command::Sections(Some(id)) => {
            let section = planner
                .seed()
                .section(&id)
                .ok_or_else(|| CliError::Usage(format!("unknown section `{}`", id)))?;
            output::section(section.title);
            println!("{}", section.content);
        }
        Command::Checklist => {
            for item in planner.checklist().items() {
                println!("{:<24} {}", item.id, item.display_label());
            }
        }
        Command::Contacts => {
            for (index, contact) in planner.contacts().contacts().iter().enumerate() {
                println!("[{}] {}", index, contact.display_label());
            }
        }
        Command::Toggle(id) => {
            let checked = planner.toggle_item(&id).map_err(|_| CliError::Reported)?;
            planner.save_checklist().map_err(|_| CliError::Reported)?;
            let state = if checked { "checked" } else { "unchecked" };
            output::info(format!("`{}` is now {}", id, state));
        }
        Command::Contact {
            index,
            field,
            value,
        } => {
            planner
                .update_contact(index, field, &value)
                .map_err(|_| CliError::Reported)?;
            planner.save_contacts().map_err(|_| CliError::Reported)?;
        }
        Command::Finance { field, value } => {
            match field {
                FinanceField::DueDate => planner.set_due_date(&value),
                FinanceField::Target => planner.set_target_saving(&value),
                FinanceField::Current => planner.set_current_saving(&value),
                FinanceField::Expense(category) => planner.update_expense(category, &value),
            }
            planner.save_financial_plan().map_err(|_| CliError::Reported)?;
        }
        Command::Backups(section) => {
            let backups = store.list_backups(section.key())?;
            if backups.is_empty() {
                output::info(format!("No backups for {}", section.key()));
            }
            for backup in backups {
                println!("{}", backup.name);
            }
        }
        Command::Restore { section, backup } => {
            store.restore_backup(section.key(), &backup)?;
            output::success(format!("Restored {} from {}", section.key(), backup));
        }
        Command::Reset => {
            planner.reset();
            planner.save_all().map_err(|_| CliError::Reported)?;
        }
        Command::Version | Command::Help => {}
    }
    Ok(())
}

fn print_summary(planner: &BirthPrepPlanner, config: &PlannerConfig) {
    let summary = planner.summary();
    output::section("Birth Preparedness Plan");
    println!(
        "Checklist: {}/{} done ({:.0}%)",
        summary.checked_items, summary.total_items, summary.checklist_progress
    );
    for (category, progress) in &summary.category_progress {
        println!("  {:<14} {:>3.0}%", category.to_string(), progress);
    }
    println!(
        "Contacts: {}/{} complete",
        summary.completed_contacts, summary.total_contacts
    );
    println!(
        "Decision maker: {}",
        summary.decision_maker.as_deref().unwrap_or("not set")
    );
    println!(
        "Total expenses: {}",
        config.format_amount(summary.total_expenses)
    );
    match planner.finance().plan().due_date {
        Some(date) => println!(
            "Due date: {} ({} days left)",
            date.format("%Y-%m-%d"),
            summary.remaining_days
        ),
        None => println!("Due date: not set"),
    }
    println!(
        "Daily savings target: {}",
        config.format_amount(summary.daily_savings_target)
    );
    println!(
        "Remaining to save: {} ({:.0}% of target saved)",
        config.format_amount(summary.remaining_to_save),
        summary.savings_progress
    );
    if summary.is_ready() {
        output::success("Your birth plan is complete");
    }
}
