//! pocketplan keeps a student's budget, savings goals, calendar, recipes and shopping list in a
//! local JSON data file.
//!
//! The building blocks are the category registry in [`model`], the aggregations in [`stats`] and
//! the filters in [`filter`]. [`commands`] ties them to a [`store::Store`] for the CLI.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod filter;
pub mod model;
pub mod stats;
pub mod store;
mod utils;
pub mod validate;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ErrorType, Result};
