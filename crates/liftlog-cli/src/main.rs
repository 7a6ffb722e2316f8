mod catalog_cmds;
mod config;
mod plan_cmds;
mod session_cmds;
mod setlog_cmds;
mod user_cmds;

use clap::{Parser, Subcommand};

use liftlog_db::pool;

use config::LiftlogConfig;

#[derive(Parser)]
#[command(name = "liftlog", about = "Workout plan and session tracker")]
struct Cli {
    /// Database URL (overrides LIFTLOG_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// User to act as (overrides LIFTLOG_USER env var and config default)
    #[arg(long, global = true)]
    user: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a liftlog config file (no database required)
    Init {
        /// SQLite connection URL
        #[arg(long, default_value = liftlog_db::config::DbConfig::DEFAULT_URL)]
        db_url: String,
        /// Default user id for commands that act on a user's data
        #[arg(long)]
        default_user: Option<i64>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create the liftlog database and run migrations
    DbInit,
    /// User management
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Exercise catalog management (shared across users)
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Workout plan management
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Workout session management
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Per-set logging within a session
    Set {
        #[command(subcommand)]
        command: SetCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user
    Create {
        username: String,
        email: String,
        /// Pre-hashed password value to store
        #[arg(long, default_value = "")]
        password_hash: String,
    },
    /// Show a user by id
    Show { user_id: i64 },
    /// Delete a user and everything they own
    Delete { user_id: i64 },
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Add a difficulty level
    AddLevel { name: String },
    /// List difficulty levels
    Levels,
    /// Add a body region
    AddRegion { name: String },
    /// List body regions
    Regions,
    /// Add an exercise
    AddExercise {
        name: String,
        /// Difficulty level id
        #[arg(long)]
        level: i64,
        /// Body region id
        #[arg(long)]
        region: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        video_url: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// List exercises (optionally for one region)
    Exercises {
        #[arg(long)]
        region: Option<i64>,
    },
    /// Delete an exercise (refused while referenced)
    DeleteExercise { exercise_id: i64 },
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create an empty plan
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Show a plan with its prescriptions (omit plan_id to list all)
    Show { plan_id: Option<i64> },
    /// Rename a plan / replace its description
    Update {
        plan_id: i64,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Add an exercise prescription to a plan
    AddExercise {
        plan_id: i64,
        exercise_id: i64,
        #[arg(long)]
        sets: i64,
        #[arg(long)]
        reps: i64,
        /// Rest between sets, in seconds
        #[arg(long)]
        rest: Option<i64>,
        /// Position in the plan (defaults to last)
        #[arg(long)]
        order: Option<i64>,
    },
    /// Remove a prescription from a plan
    RemoveExercise { plan_id: i64, plan_exercise_id: i64 },
    /// Delete a plan (session history survives)
    Delete { plan_id: i64 },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Start a session, from a plan or free-form
    Start {
        /// Plan to materialize the session from
        #[arg(long)]
        plan: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show a session with its exercises and sets (omit session_id to list all)
    Show { session_id: Option<i64> },
    /// End an active session
    End {
        session_id: i64,
        /// Duration in minutes (defaults to elapsed time since start)
        #[arg(long)]
        duration: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Add an exercise to a session ad hoc
    AddExercise {
        session_id: i64,
        exercise_id: i64,
        #[arg(long)]
        order: Option<i64>,
    },
    /// Delete a session and its records
    Delete { session_id: i64 },
}

#[derive(Subcommand)]
pub enum SetCommands {
    /// Record (or overwrite) one set's outcome
    Log {
        session_exercise_id: i64,
        set_number: i64,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        reps: Option<i64>,
        /// Mark the set completed
        #[arg(long)]
        done: bool,
    },
    /// List a session exercise's sets
    List { session_exercise_id: i64 },
    /// Delete one set log
    Delete { set_log_id: i64 },
}

/// Execute `liftlog init`: write the config file.
fn cmd_init(db_url: &str, default_user: Option<i64>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_string(),
        },
        defaults: config::DefaultsSection {
            user_id: default_user,
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    if let Some(id) = default_user {
        println!("  defaults.user_id = {id}");
    }
    println!();
    println!("Next: run `liftlog db-init` to create and migrate the database.");

    Ok(())
}

/// Execute `liftlog db-init`: create the database file and run migrations.
async fn cmd_db_init(cli_db_url: Option<&str>) -> anyhow::Result<()> {
    let resolved = LiftlogConfig::resolve(cli_db_url)?;

    println!("Initializing liftlog database...");

    let db_pool = pool::create_pool(&resolved.db_config).await?;
    pool::run_migrations(&db_pool).await?;

    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    db_pool.close().await;

    println!("liftlog db-init complete.");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            db_url,
            default_user,
            force,
        } => {
            cmd_init(&db_url, default_user, force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::User { command } => {
            let resolved = LiftlogConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = user_cmds::run_user_command(command, &db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Catalog { command } => {
            let resolved = LiftlogConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = catalog_cmds::run_catalog_command(command, &db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Plan { command } => {
            let resolved = LiftlogConfig::resolve(cli.database_url.as_deref())?;
            let user_id = resolved.acting_user(cli.user)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = plan_cmds::run_plan_command(command, &db_pool, user_id).await;
            db_pool.close().await;
            result?;
        }
        Commands::Session { command } => {
            let resolved = LiftlogConfig::resolve(cli.database_url.as_deref())?;
            let user_id = resolved.acting_user(cli.user)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = session_cmds::run_session_command(command, &db_pool, user_id).await;
            db_pool.close().await;
            result?;
        }
        Commands::Set { command } => {
            let resolved = LiftlogConfig::resolve(cli.database_url.as_deref())?;
            let user_id = resolved.acting_user(cli.user)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = setlog_cmds::run_set_command(command, &db_pool, user_id).await;
            db_pool.close().await;
            result?;
        }
    }

    Ok(())
}
