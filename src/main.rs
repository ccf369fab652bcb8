use clap::Parser;
use pocketplan::args::{
    Args, Command, EventCommand, GoalCommand, RecipeCommand, ShoppingCommand, TransactionCommand,
};
use pocketplan::commands::{self, Out};
use pocketplan::Result;
use serde::Serialize;
use std::fmt::Debug;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();
    let json = args.common().json();

    // Commands that do not need an existing home directory.
    match args.command() {
        Command::Init(init_args) => {
            return emit(commands::init(home, init_args.user_id()).await?, json)
        }
        Command::Category(category_args) => return emit(commands::category(category_args)?, json),
        Command::Schema => return emit(commands::schema()?, json),
        _ => {}
    }

    let config = commands::load_config(home).await?;
    let mut store = config.store();

    match args.command() {
        Command::Init(_) | Command::Category(_) | Command::Schema => Ok(()),

        Command::Transaction(t) => match &t.command {
            TransactionCommand::Add(fields) => emit(
                commands::add_transaction(&mut store, fields.clone()).await?,
                json,
            ),
            TransactionCommand::Update(u) => emit(
                commands::update_transaction(&mut store, &u.id, u.fields.clone()).await?,
                json,
            ),
            TransactionCommand::Delete(id) => {
                emit(commands::delete_transaction(&mut store, &id.id).await?, json)
            }
            TransactionCommand::List(list) => emit(
                commands::list_transactions(&store, list.clone()).await?,
                json,
            ),
        },

        Command::Stats(stats_args) => emit(
            commands::stats(&config, &store, stats_args.clone()).await?,
            json,
        ),

        Command::Goal(g) => match &g.command {
            GoalCommand::Add(add) => emit(commands::add_goal(&mut store, add.clone()).await?, json),
            GoalCommand::Update(update) => emit(
                commands::update_goal(&mut store, update.clone()).await?,
                json,
            ),
            GoalCommand::Deposit(change) => {
                emit(commands::deposit(&mut store, change.clone()).await?, json)
            }
            GoalCommand::Withdraw(change) => {
                emit(commands::withdraw(&mut store, change.clone()).await?, json)
            }
            GoalCommand::Delete(id) => emit(commands::delete_goal(&mut store, &id.id).await?, json),
            GoalCommand::List => emit(commands::list_goals(&store).await?, json),
        },

        Command::Event(e) => match &e.command {
            EventCommand::Add(add) => emit(commands::add_event(&mut store, add.clone()).await?, json),
            EventCommand::Update(update) => emit(
                commands::update_event(&mut store, update.clone()).await?,
                json,
            ),
            EventCommand::Delete(id) => {
                emit(commands::delete_event(&mut store, &id.id).await?, json)
            }
            EventCommand::List(list) => {
                emit(commands::list_events(&store, list.clone()).await?, json)
            }
        },

        Command::Recipe(r) => match &r.command {
            RecipeCommand::Import(import) => emit(
                commands::import_recipes(&mut store, &import.file).await?,
                json,
            ),
            RecipeCommand::List(list) => {
                emit(commands::list_recipes(&store, list.clone()).await?, json)
            }
            RecipeCommand::Show(id) => emit(commands::show_recipe(&store, &id.id).await?, json),
            RecipeCommand::Favorite(id) => {
                emit(commands::toggle_favorite(&mut store, &id.id).await?, json)
            }
            RecipeCommand::Shop(id) => emit(commands::shop_recipe(&mut store, &id.id).await?, json),
        },

        Command::Shopping(s) => match &s.command {
            ShoppingCommand::List => emit(commands::list_shopping(&store).await?, json),
            ShoppingCommand::Add(add) => emit(
                commands::add_shopping_item(&mut store, add.clone()).await?,
                json,
            ),
            ShoppingCommand::Check(id) => emit(
                commands::check_shopping_item(&mut store, &id.id, true).await?,
                json,
            ),
            ShoppingCommand::Uncheck(id) => emit(
                commands::check_shopping_item(&mut store, &id.id, false).await?,
                json,
            ),
            ShoppingCommand::Remove(id) => emit(
                commands::remove_shopping_item(&mut store, &id.id).await?,
                json,
            ),
            ShoppingCommand::Clear => emit(commands::clear_shopping_list(&mut store).await?, json),
        },

        Command::Summary(summary_args) => emit(
            commands::summary(&store, summary_args.clone()).await?,
            json,
        ),
    }
}

/// Logs the outcome and, with `--json`, writes the structured result to stdout.
fn emit<T>(out: Out<T>, json: bool) -> Result<()>
where
    T: Serialize + Clone + Debug,
{
    out.print();
    if json {
        out.print_json()?;
    }
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
