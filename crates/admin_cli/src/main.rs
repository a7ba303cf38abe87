use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Currency, CurrencyPatch, Engine, Rate};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "yodi_admin")]
#[command(about = "Admin utilities for yodi (bootstrap and inspect currencies)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./yodi.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Currency(CurrencyArgs),
}

#[derive(Args, Debug)]
struct CurrencyArgs {
    #[command(subcommand)]
    command: CurrencyCommand,
}

#[derive(Subcommand, Debug)]
enum CurrencyCommand {
    /// Create a currency.
    Create(CurrencyCreateArgs),
    /// Print the current currency.
    Show,
    /// Change the name and/or the rate of a currency.
    Update(CurrencyUpdateArgs),
}

#[derive(Args, Debug)]
struct CurrencyCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long, value_parser = parse_rate)]
    rate: Rate,
}

#[derive(Args, Debug)]
struct CurrencyUpdateArgs {
    /// Currency id.
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long, value_parser = parse_rate)]
    rate: Option<Rate>,
}

fn parse_rate(raw: &str) -> Result<Rate, String> {
    raw.parse().map_err(|err: engine::EngineError| err.to_string())
}

fn print_currency(label: &str, currency: &Currency) {
    println!("{label}: {currency} [{}]", currency.id);
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    let Command::Currency(CurrencyArgs { command }) = cli.command;
    match command {
        CurrencyCommand::Create(args) => {
            let currency = engine.create_currency(&args.name, args.rate).await?;
            print_currency("created currency", &currency);
        }
        CurrencyCommand::Show => match engine.current_currency().await? {
            Some(currency) => print_currency("current currency", &currency),
            None => println!("no currency defined"),
        },
        CurrencyCommand::Update(args) => {
            let patch = CurrencyPatch {
                name: args.name,
                rate: args.rate,
            };
            if patch.is_empty() {
                eprintln!("provide at least one of --name or --rate");
                std::process::exit(2);
            }

            let before = engine.currency(&args.id).await?;
            let after = engine.update_currency(&args.id, patch).await?;
            print_currency("was", &before);
            print_currency("now", &after);
        }
    }

    engine.shutdown().await?;
    Ok(())
}
