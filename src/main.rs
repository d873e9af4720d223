use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger::cli::{
    handle_budget_command, handle_config_command, handle_export_command, handle_import_command,
    handle_summary_command, handle_transaction_command, BudgetCommands, ConfigCommands,
    ExportArgs, TransactionCommands,
};
use ledger::config::{LedgerPaths, Settings};
use ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    author = "Kaylee Beyene",
    version,
    about = "Personal finance ledger",
    long_about = "Track income and expenses, set monthly category budgets and \
                  move transactions in and out as CSV, from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Tx(TransactionCommands),

    /// Import transactions from a CSV file
    Import {
        /// Path to CSV file (header: type,amount,category,date[,note])
        file: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export transactions to CSV
    Export(ExportArgs),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show the monthly summary
    Summary {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Initialize the data directory
    Init,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Tx(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Import { file, json }) => {
            handle_import_command(&storage, &settings, &file, json)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, &settings, args)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Summary { month, json }) => {
            handle_summary_command(&storage, &settings, month.as_deref(), json)?;
        }
        Some(Commands::Config { command }) => {
            handle_config_command(&paths, &mut settings, command)?;
        }
        Some(Commands::Init) => {
            println!("Initializing ledger at: {}", paths.base_dir().display());
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'ledger import <file.csv>' to load transactions,");
            println!("or 'ledger tx add EXPENSE 12.50 Food' to add one.");
        }
        None => {
            println!("ledger - personal finance from the command line");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
