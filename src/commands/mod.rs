//! Command handlers for the pocketplan CLI.
//!
//! Every handler returns an `Out` holding a human-readable message and the structured result.
//! Handlers that touch user records take a `&mut dyn Store` and require a signed-in user.

mod category;
mod event;
mod goal;
mod init;
mod recipe;
mod shopping;
mod stats;
mod summary;
mod transaction;

use crate::error::{Error, ErrorType, IntoResult};
use crate::store::{Store, User};
use crate::{Config, Result};
use anyhow::anyhow;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Debug;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

pub use category::{category, schema};
pub use event::{add_event, delete_event, list_events, update_event};
pub use goal::{
    add_goal, delete_goal, deposit, list_goals, update_goal, withdraw, GoalStatus,
};
pub use init::init;
pub use recipe::{import_recipes, list_recipes, shop_recipe, show_recipe, toggle_favorite};
pub use shopping::{
    add_shopping_item, check_shopping_item, clear_shopping_list, list_shopping,
    remove_shopping_item,
};
pub use stats::{stats, StatsReport};
pub use summary::summary;
pub use transaction::{add_transaction, delete_transaction, list_transactions, update_transaction};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }

    /// Write the structured data as pretty JSON to stdout, or `null` if there is none.
    pub fn print_json(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.structure).pub_result(ErrorType::Output)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}").pub_result(ErrorType::Output)
    }
}

/// Loads the configuration from `home`.
pub async fn load_config(home: &Path) -> Result<Config> {
    Config::load(home).await.pub_result(ErrorType::Config)
}

/// The signed-in user, or a `Session` error when there is none.
async fn session(store: &dyn Store) -> Result<User> {
    store
        .current_user()
        .await
        .pub_result(ErrorType::Store)?
        .ok_or_else(|| {
            Error::new(
                ErrorType::Session,
                anyhow!("Nobody is signed in, run 'pocketplan init --user-id <ID>' first"),
            )
        })
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {one}")
    } else {
        format!("{count} {many}")
    }
}
