/// Command-line front end for the habit store
///
/// This file sets up logging, parses command line arguments, opens the
/// SQLite-backed store and runs a single command against it.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::info;

use habit_store::{
    EntryDraft, EntryId, EntryPatch, Frequency, HabitDraft, HabitId, HabitPatch, HabitStore,
    ProfilePatch, SettingsPatch, SqliteKeyValueStore, ThemePreference,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> CliResult<PathBuf> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|mut p| {
            p.push(".habit_store");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("habit_store");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("habit_store");
            p
        }),
        // Last resort
        std::env::current_dir().ok().map(|mut p| {
            p.push(".habit_store");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("habits.db"));
            }
        }
    }

    let mut temp_path = std::env::temp_dir();
    temp_path.push("habit_store");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("habits.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the habit store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List habits with their current streaks
    Habits,
    /// Create a habit
    Add {
        name: String,
        #[arg(long, default_value = "Health")]
        category: String,
        #[arg(long, default_value_t = 1.0)]
        target: f64,
        #[arg(long, default_value = "")]
        unit: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "daily")]
        frequency: Frequency,
        #[arg(long)]
        reminder: Option<String>,
    },
    /// Change fields of a habit
    Edit {
        /// Habit id or name
        habit: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        frequency: Option<Frequency>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a habit with all of its entries
    Remove { habit: String },
    /// Record progress for a habit
    Log {
        habit: String,
        value: f64,
        /// Day of the entry (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
        /// Record the entry as not completed
        #[arg(long)]
        skipped: bool,
    },
    /// Toggle completion of a habit for a day
    Done {
        habit: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List entries of a habit, newest first
    Entries {
        habit: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Change an entry
    Amend {
        entry: String,
        #[arg(long)]
        value: Option<f64>,
        #[arg(long)]
        completed: Option<bool>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an entry
    Unlog { entry: String },
    /// Show the streak of a habit
    Streak { habit: String },
    /// Show statistics for the seven days ending on a date (default today)
    Stats {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Write all data as JSON
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace all data from a JSON export ("-" reads stdin)
    Import { file: PathBuf },
    /// Delete all stored data
    Reset {
        #[arg(long)]
        yes: bool,
    },
    /// List the built-in categories
    Categories,
    /// Create a local profile
    Register { name: String, email: String },
    Login { email: String },
    Logout,
    /// Update the current profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Update settings of the current profile
    Settings {
        #[arg(long)]
        notifications: Option<bool>,
        #[arg(long)]
        reminder: Option<String>,
        /// 0 = Sunday, 1 = Monday
        #[arg(long)]
        week_starts_on: Option<u8>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Upgrade the current profile to premium for a year
    Premium,
    /// Show or set the theme (light, dark, system)
    Theme { theme: Option<ThemePreference> },
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_store={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let kv = SqliteKeyValueStore::new(db_path)?;
    let mut store = HabitStore::load(kv).await;
    if let Some(error) = store.error() {
        return Err(error.into());
    }

    run(&mut store, args.command).await?;

    if let Some(error) = store.error() {
        return Err(error.into());
    }
    Ok(())
}

async fn run(store: &mut HabitStore<SqliteKeyValueStore>, command: Cmd) -> CliResult<()> {
    let today = Local::now().date_naive();

    match command {
        Cmd::Habits => {
            if store.habits().is_empty() {
                println!("No habits yet. Create one with `habit-store add <name>`.");
            }
            for habit in store.habits() {
                let streak = store.get_habit_streak(&habit.id).map_or(0, |s| s.current_streak);
                let status = if habit.is_active { "" } else { " (paused)" };
                println!(
                    "{}  {} [{}] {} {}, streak {}{}",
                    habit.id,
                    habit.name,
                    habit.category,
                    habit.frequency,
                    habit.target_display(),
                    streak,
                    status
                );
            }
        }
        Cmd::Add {
            name,
            category,
            target,
            unit,
            description,
            frequency,
            reminder,
        } => {
            let mut draft = HabitDraft::new(name, category, target, unit).frequency(frequency);
            if let Some(description) = description {
                draft = draft.description(description);
            }
            if let Some(reminder) = reminder {
                draft = draft.reminder_time(reminder);
            }
            let habit = store.add_habit(draft).await?;
            println!("Created habit '{}' ({})", habit.name, habit.id);
        }
        Cmd::Edit {
            habit,
            name,
            category,
            target,
            unit,
            description,
            frequency,
            active,
        } => {
            let habit_id = resolve_habit(store, &habit)?;
            let patch = HabitPatch {
                name,
                category,
                target,
                unit,
                description: description.map(Some),
                frequency,
                is_active: active,
                ..Default::default()
            };
            if let Some(habit) = store.update_habit(&habit_id, patch).await? {
                println!("Updated habit '{}'", habit.name);
            }
        }
        Cmd::Remove { habit } => {
            let habit_id = resolve_habit(store, &habit)?;
            if store.delete_habit(&habit_id).await {
                println!("Deleted habit {}", habit_id);
            }
        }
        Cmd::Log {
            habit,
            value,
            date,
            notes,
            skipped,
        } => {
            let habit_id = resolve_habit(store, &habit)?;
            let draft = EntryDraft {
                habit_id: habit_id.clone(),
                date: date.unwrap_or(today),
                value,
                completed: !skipped,
                notes,
            };
            if let Some(entry) = store.add_habit_entry(draft).await? {
                println!("Logged {} on {} ({})", entry.value, entry.date, entry.id);
                print_streak(store, &habit_id);
            }
        }
        Cmd::Done { habit, date } => {
            let habit_id = resolve_habit(store, &habit)?;
            let date = date.unwrap_or(today);
            if let Some(entry) = store.mark_done(&habit_id, date).await {
                let state = if entry.completed { "done" } else { "not done" };
                println!("Marked {} {}", date, state);
                print_streak(store, &habit_id);
            }
        }
        Cmd::Entries { habit, date } => {
            let habit_id = resolve_habit(store, &habit)?;
            for entry in store.get_habit_entries(&habit_id, date) {
                let mark = if entry.completed { "x" } else { " " };
                let notes = entry.notes.as_deref().unwrap_or("");
                println!("[{}] {}  {}  {}  {}", mark, entry.date, entry.value, entry.id, notes);
            }
        }
        Cmd::Amend {
            entry,
            value,
            completed,
            notes,
        } => {
            let patch = EntryPatch {
                value,
                completed,
                notes: notes.map(Some),
                ..Default::default()
            };
            match store.update_habit_entry(&EntryId::from(entry.as_str()), patch).await? {
                Some(entry) => println!("Updated entry {}", entry.id),
                None => println!("No entry {}", entry),
            }
        }
        Cmd::Unlog { entry } => {
            if store.delete_habit_entry(&EntryId::from(entry.as_str())).await {
                println!("Deleted entry {}", entry);
            } else {
                println!("No entry {}", entry);
            }
        }
        Cmd::Streak { habit } => {
            let habit_id = resolve_habit(store, &habit)?;
            store.calculate_streak(&habit_id).await;
            print_streak(store, &habit_id);
        }
        Cmd::Stats { date } => {
            let date = date.unwrap_or(today);
            let state = store.state();
            let analytics = store.analytics();
            let summary = store.weekly_summary_ending(date);

            println!("Completed this week: {}", summary.total_completed);
            println!("Active habits: {}", summary.active_habits);
            println!("Weekly completion: {}%", summary.completion_rate);
            println!("Current streaks: {} days total", summary.total_current_streak);
            println!("Longest streak: {} days", summary.longest_streak);
            for top in &summary.top_habits {
                println!("  {}: {}", top.name, top.completed_count);
            }
            println!(
                "{}: {}% complete, {} completions",
                date,
                analytics.daily_completion_rate(&state.habits, &state.habit_entries, date),
                analytics.completions_on(&state.habit_entries, date)
            );
            for day in analytics.week_days(date) {
                println!("  {} {}", day, analytics.completions_on(&state.habit_entries, day));
            }
        }
        Cmd::Export { output } => {
            let json = store.export_data()?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, json).await?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Cmd::Import { file } => {
            let text = if file.as_os_str() == "-" {
                let mut text = String::new();
                tokio::io::stdin().read_to_string(&mut text).await?;
                text
            } else {
                tokio::fs::read_to_string(&file).await?
            };
            store.import_data(&text).await?;
            println!("Imported {} habits", store.habits().len());
        }
        Cmd::Reset { yes } => {
            if !yes {
                return Err("Refusing to delete all data without --yes".into());
            }
            store.reset_data().await?;
            println!("All data deleted");
        }
        Cmd::Categories => {
            for category in store.categories() {
                println!("{} ({}, {}): {}", category.name, category.color, category.icon, category.description);
            }
        }
        Cmd::Register { name, email } => {
            let user = store.register(&name, &email).await?;
            println!("Registered {} <{}>", user.name, user.email);
        }
        Cmd::Login { email } => {
            let user = store.login(&email).await?;
            println!("Signed in as {}", user.name);
        }
        Cmd::Logout => {
            store.logout().await;
            println!("Signed out");
        }
        Cmd::Profile { name, email, avatar } => {
            let patch = ProfilePatch {
                name,
                email,
                avatar: avatar.map(Some),
            };
            match store.update_profile(patch).await? {
                Some(user) => println!("{} <{}>", user.name, user.email),
                None => println!("Not signed in"),
            }
        }
        Cmd::Settings {
            notifications,
            reminder,
            week_starts_on,
            language,
            timezone,
        } => {
            let patch = SettingsPatch {
                notifications,
                reminder_time: reminder,
                week_starts_on,
                language,
                timezone,
                ..Default::default()
            };
            match store.update_settings(patch).await? {
                Some(user) => println!("{}", serde_json::to_string_pretty(&user.settings)?),
                None => println!("Not signed in"),
            }
        }
        Cmd::Premium => match store.upgrade_to_premium().await {
            Some(user) => match user.premium_expiry {
                Some(expiry) => println!("Premium until {}", expiry.date_naive()),
                None => println!("Premium enabled"),
            },
            None => println!("Not signed in"),
        },
        Cmd::Theme { theme } => {
            if let Some(theme) = theme {
                store.set_theme(theme).await;
            }
            println!("{}", store.theme());
        }
    }

    Ok(())
}

/// Accept a habit id or a case-insensitive habit name
fn resolve_habit(store: &HabitStore<SqliteKeyValueStore>, key: &str) -> CliResult<HabitId> {
    store
        .habits()
        .iter()
        .find(|h| h.id.as_str() == key)
        .or_else(|| store.habits().iter().find(|h| h.name.eq_ignore_ascii_case(key)))
        .map(|h| h.id.clone())
        .ok_or_else(|| format!("No habit matching '{}'", key).into())
}

fn print_streak(store: &HabitStore<SqliteKeyValueStore>, habit_id: &HabitId) {
    if let Some(streak) = store.get_habit_streak(habit_id) {
        println!(
            "Current streak: {} days (longest {})",
            streak.current_streak, streak.longest_streak
        );
        println!("{}", streak.motivational_message());
    }
}
