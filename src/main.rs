use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use moneyflow::advisory::advisor_from_settings;
use moneyflow::cli::{
    apply_period_args, handle_add_command, handle_advise_command, handle_budget_command,
    handle_delete_command, handle_group_command, handle_list_command, handle_periods_command,
    handle_suggest_command, handle_summary_command, handle_years_command, PeriodArgs,
};
use moneyflow::config::{MoneyflowPaths, Settings};
use moneyflow::models::SystemClock;
use moneyflow::services::Session;
use moneyflow::storage::Storage;

#[derive(Parser)]
#[command(
    name = "moneyflow",
    version,
    about = "Personal monthly expense tracker",
    long_about = "MoneyFlow records expenses per calendar month, keeps a spending \
                  limit for each month and shows where the money went, grouped \
                  by description."
)]
struct Cli {
    #[command(flatten)]
    period: PeriodArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an expense in the selected period
    Add {
        /// Amount as typed digits; the last two are cents (e.g., "1250" = 12.50)
        amount: String,
        /// Description
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Delete an expense by ID (full or as shown by `list`)
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
    },

    /// List the expenses of the selected period
    #[command(alias = "ls")]
    List,

    /// Budget, utilization and consolidated spending for the period
    Summary,

    /// Expenses behind one consolidated description
    Group {
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Spending limit commands
    #[command(subcommand)]
    Budget(moneyflow::cli::BudgetCommands),

    /// Months of the selected year
    Periods {
        /// One month per line with its period key
        #[arg(short, long)]
        list: bool,
    },

    /// Selectable years
    Years,

    /// Suggest previously used descriptions
    Suggest {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Ask for a short spending tip for the period
    Advise,

    /// Initialize the data directory and settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MONEYFLOW_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("moneyflow=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = MoneyflowPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("MoneyFlow is already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            println!("Initializing MoneyFlow at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            return Ok(());
        }
        Some(Commands::Config) => {
            println!("MoneyFlow Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Locale:           {}", settings.locale);
            match settings.utc_offset_minutes {
                Some(minutes) => println!("  UTC offset:       {} min", minutes),
                None => println!("  UTC offset:       host local time"),
            }
            println!(
                "  Selectable years: {}-{}",
                settings.first_selectable_year,
                settings.first_selectable_year + settings.selectable_year_count as i32 - 1
            );
            println!("  Advisory model:   {}", settings.advisory.model);
            println!(
                "  Advisory key:     {} ({})",
                settings.advisory.api_key_env,
                if settings.advisory.api_key().is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
            return Ok(());
        }
        _ => {}
    }

    let storage = Storage::open(&paths)?;
    let mut session = Session::load(storage, &settings, Box::new(SystemClock))?;
    apply_period_args(&mut session, &cli.period)?;

    match cli.command {
        Some(Commands::Add {
            amount,
            description,
        }) => handle_add_command(&mut session, &settings, &amount, &description)?,
        Some(Commands::Delete { id }) => handle_delete_command(&mut session, &settings, &id)?,
        Some(Commands::List) => handle_list_command(&session, &settings),
        Some(Commands::Summary) | None => handle_summary_command(&session, &settings),
        Some(Commands::Group { description }) => {
            handle_group_command(&session, &settings, &description)
        }
        Some(Commands::Budget(cmd)) => handle_budget_command(&mut session, &settings, cmd)?,
        Some(Commands::Periods { list }) => handle_periods_command(&session, &settings, list),
        Some(Commands::Years) => handle_years_command(&session),
        Some(Commands::Suggest { query }) => handle_suggest_command(&session, &query),
        Some(Commands::Advise) => {
            let advisor = advisor_from_settings(&settings.advisory, settings.locale);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(handle_advise_command(&session, &settings, advisor.as_ref()));
        }
        Some(Commands::Init) | Some(Commands::Config) => {}
    }

    Ok(())
}
