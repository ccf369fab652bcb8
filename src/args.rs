//! These structs provide the CLI interface for the pocketplan CLI.

use crate::model::{
    Amount, CategoryKind, DietaryRestriction, Difficulty, EventCategory, MealType, Reminder,
    TransactionType,
};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing::level_filters::LevelFilter;

/// pocketplan: budget, savings goals, calendar and recipes for students.
///
/// Records are kept in a JSON data file in the pocketplan home directory. Start with
/// `pocketplan init --user-id <ID>`, then add transactions, savings goals, events and recipes and
/// look at the statistics with `pocketplan stats` and `pocketplan summary`.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory, the config file and an empty data file, and sign in as
    /// --user-id. Running it again on an existing home keeps the data and switches the user.
    Init(InitArgs),
    /// Add, change, delete or list income and expenses.
    Transaction(TransactionArgs),
    /// Show income, expenses, balance, spending per category, the monthly trend and savings.
    Stats(StatsArgs),
    /// Manage savings goals.
    Goal(GoalArgs),
    /// Manage calendar events.
    Event(EventArgs),
    /// Browse and import recipes, mark favorites and put ingredients on the shopping list.
    Recipe(RecipeArgs),
    /// Manage the shopping list.
    Shopping(ShoppingArgs),
    /// Look up the label, icon and color of a category code.
    Category(CategoryArgs),
    /// A dashboard overview of all records.
    Summary(SummaryArgs),
    /// Print the JSON schema of the data file.
    Schema,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where pocketplan data and configuration is held. Defaults to ~/pocketplan
    #[arg(long, env = "POCKETPLAN_HOME", default_value_t = default_home())]
    home: DisplayPath,

    /// Print the structured result of the command as JSON to stdout.
    #[arg(long)]
    json: bool,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf, json: bool) -> Self {
        Self {
            log_level,
            home: home.into(),
            json,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }

    pub fn json(&self) -> bool {
        self.json
    }
}

/// Args for the `pocketplan init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The id of the user to sign in as. Pass an empty string to sign out.
    #[arg(long)]
    user_id: String,
}

impl InitArgs {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// A record id.
#[derive(Debug, Parser, Clone)]
pub struct IdArgs {
    pub id: String,
}

// =============================================================================
// transaction
// =============================================================================

#[derive(Debug, Parser, Clone)]
pub struct TransactionArgs {
    #[command(subcommand)]
    pub command: TransactionCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TransactionCommand {
    /// Record a new income or expense.
    Add(TransactionFields),
    /// Replace all fields of an existing transaction.
    Update(UpdateTransactionArgs),
    /// Delete a transaction.
    Delete(IdArgs),
    /// List transactions, newest first.
    List(ListTransactionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct TransactionFields {
    /// income or expense
    #[arg(long = "type", value_enum, default_value_t = TransactionType::Expense)]
    pub transaction_type: TransactionType,

    /// The amount, always positive, e.g. 12.50
    #[arg(long)]
    pub amount: Amount,

    /// An expense category (food, transport, ...) or an income source (salary, freelance, ...)
    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub description: String,

    /// Booking date as YYYY-MM-DD, defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateTransactionArgs {
    pub id: String,

    #[clap(flatten)]
    pub fields: TransactionFields,
}

#[derive(Debug, Parser, Clone)]
pub struct ListTransactionArgs {
    /// Only list the most recent N transactions.
    #[arg(long)]
    pub limit: Option<usize>,
}

// =============================================================================
// stats
// =============================================================================

#[derive(Debug, Parser, Clone)]
pub struct StatsArgs {
    /// Number of months in the trend, defaults to `month_count` from config.json.
    #[arg(long)]
    pub months: Option<usize>,

    /// The last month of the trend is the month containing this date. Defaults to today.
    #[arg(long)]
    pub reference_date: Option<NaiveDate>,
}

// =============================================================================
// goal
// =============================================================================

#[derive(Debug, Parser, Clone)]
pub struct GoalArgs {
    #[command(subcommand)]
    pub command: GoalCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum GoalCommand {
    /// Create a savings goal.
    Add(AddGoalArgs),
    /// Replace all fields of an existing goal.
    Update(UpdateGoalArgs),
    /// Put money into a goal.
    Deposit(GoalChangeArgs),
    /// Take money out of a goal. The saved amount never drops below zero.
    Withdraw(GoalChangeArgs),
    /// Delete a goal.
    Delete(IdArgs),
    /// List goals with their progress.
    List,
}

#[derive(Debug, Parser, Clone)]
pub struct AddGoalArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub target: Amount,

    /// Amount already saved.
    #[arg(long, default_value_t = Amount::ZERO)]
    pub current: Amount,

    /// YYYY-MM-DD
    #[arg(long)]
    pub target_date: Option<NaiveDate>,
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateGoalArgs {
    pub id: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub target: Amount,

    /// Amount saved so far. Overwrites the stored amount.
    #[arg(long)]
    pub current: Amount,

    /// YYYY-MM-DD
    #[arg(long)]
    pub target_date: Option<NaiveDate>,
}

#[derive(Debug, Parser, Clone)]
pub struct GoalChangeArgs {
    pub id: String,

    /// A positive amount.
    #[arg(long)]
    pub amount: Amount,
}

// =============================================================================
// event
// =============================================================================

#[derive(Debug, Parser, Clone)]
pub struct EventArgs {
    #[command(subcommand)]
    pub command: EventCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum EventCommand {
    /// Create an event.
    Add(AddEventArgs),
    /// Replace the fields of an existing event. A stored recurrence is kept.
    Update(UpdateEventArgs),
    /// Delete an event.
    Delete(IdArgs),
    /// List events, optionally filtered, grouped by day.
    List(ListEventArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddEventArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value_t = EventCategory::Other)]
    pub category: EventCategory,

    /// Local start time, e.g. 2024-04-02T10:00:00
    #[arg(long)]
    pub start: NaiveDateTime,

    /// Local end time, not before the start.
    #[arg(long)]
    pub end: NaiveDateTime,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// none, 5min, 15min, 30min, 1hour or 1day
    #[arg(long, default_value_t = Reminder::None)]
    pub reminder: Reminder,

    #[arg(long)]
    pub all_day: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateEventArgs {
    pub id: String,

    #[clap(flatten)]
    pub fields: AddEventArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct ListEventArgs {
    /// Only events in this category. Repeat to select several.
    #[arg(long = "category")]
    pub categories: Vec<EventCategory>,

    /// Only events starting on or after this day.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only events starting on or before this day.
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

// =============================================================================
// recipe
// =============================================================================

#[derive(Debug, Parser, Clone)]
pub struct RecipeArgs {
    #[command(subcommand)]
    pub command: RecipeCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RecipeCommand {
    /// Add the recipes in a JSON file (an array of recipes) to the catalog.
    Import(ImportRecipeArgs),
    /// List recipes, optionally filtered.
    List(ListRecipeArgs),
    /// Show one recipe.
    Show(IdArgs),
    /// Mark a recipe as favorite, or unmark it if it already is one.
    Favorite(IdArgs),
    /// Put the ingredients of a recipe on the shopping list.
    Shop(IdArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ImportRecipeArgs {
    pub file: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct ListRecipeArgs {
    /// Repeat to select several; a recipe matches if it has any of them.
    #[arg(long, value_enum)]
    pub meal_type: Vec<MealType>,

    /// Repeat to select several; a recipe matches if it has any of them.
    #[arg(long, value_enum)]
    pub dietary: Vec<DietaryRestriction>,

    /// Repeat to select several.
    #[arg(long, value_enum)]
    pub difficulty: Vec<Difficulty>,

    /// Maximum preparation time in minutes.
    #[arg(long)]
    pub max_prep_time: Option<u32>,

    #[arg(long)]
    pub max_cost: Option<Amount>,

    /// Only favorites.
    #[arg(long)]
    pub favorites: bool,
}

// =============================================================================
// shopping
// =============================================================================

#[derive(Debug, Parser, Clone)]
pub struct ShoppingArgs {
    #[command(subcommand)]
    pub command: ShoppingCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ShoppingCommand {
    /// Show the list, open items first.
    List,
    /// Add an item.
    Add(AddShoppingArgs),
    /// Mark an item as bought.
    Check(IdArgs),
    /// Mark an item as not bought.
    Uncheck(IdArgs),
    /// Remove an item.
    Remove(IdArgs),
    /// Remove all checked items.
    Clear,
}

#[derive(Debug, Parser, Clone)]
pub struct AddShoppingArgs {
    pub name: String,

    #[arg(long, default_value_t = 1.0)]
    pub amount: f64,

    #[arg(long, default_value = "")]
    pub unit: String,
}

// =============================================================================
// category, summary
// =============================================================================

#[derive(Debug, Parser, Clone)]
pub struct CategoryArgs {
    /// The category code, e.g. food. Unknown codes show the `other` entry.
    pub code: String,

    #[arg(long, value_enum, default_value_t = CategoryKind::Expense)]
    pub kind: CategoryKind,
}

#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    /// The day to treat as today, YYYY-MM-DD.
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("pocketplan"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or POCKETPLAN_HOME instead of relying on the default \
                home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("pocketplan")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
