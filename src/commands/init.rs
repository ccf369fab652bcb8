use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory with `config.json` and an empty data file, signed in as `user_id`.
///
/// An existing data file is left untouched, so this is also how the signed-in user is changed.
/// An empty `user_id` signs out.
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(home: &Path, user_id: &str) -> Result<Out<()>> {
    let config = Config::create(home, user_id)
        .await
        .context("Unable to create the home directory and configs")
        .pub_result(ErrorType::Config)?;
    let message = if user_id.is_empty() {
        format!("Initialized {} with nobody signed in", config.root().display())
    } else {
        format!(
            "Initialized {} and signed in as '{user_id}'",
            config.root().display()
        )
    };
    Ok(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_twice_switches_user() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), "u1").await.unwrap();
        let out = init(dir.path(), "u2").await.unwrap();
        assert!(out.message().contains("u2"));
        let config = Config::load(dir.path()).await.unwrap();
        assert_eq!(config.user_id(), "u2");
    }
}
