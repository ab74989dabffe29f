//! CLI subcommands and the helpers they share.

pub mod menu;
pub mod order;
pub mod quote;

use std::path::Path;

use thiserror::Error;
use tracing::info;

use quickgrub_core::ChoiceId;
use quickgrub_storefront::catalog::{Catalog, OptionKind};
use quickgrub_storefront::configurator::ItemConfigurator;
use quickgrub_storefront::error::AppError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Input file could not be read.
    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// Order script is not valid YAML.
    #[error("Invalid order script: {0}")]
    Script(#[from] serde_yaml::Error),

    /// A `--select` argument was not `Option=choice`.
    #[error("Invalid selection {0:?}: expected OPTION=CHOICE")]
    Selection(String),

    /// Domain error from the storefront engine.
    #[error(transparent)]
    App(#[from] AppError),
}

/// Read a file to a string.
pub async fn read_file(path: &Path) -> Result<String, CommandError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Read {
            path: path.display().to_string(),
            source,
        })
}

/// Load and validate a catalog JSON file.
pub async fn load_catalog(path: &Path) -> Result<Catalog, CommandError> {
    info!(path = %path.display(), "Loading catalog");
    let json = read_file(path).await?;
    let catalog = Catalog::from_json(&json).map_err(AppError::from)?;
    info!(products = catalog.products().len(), "Parsed catalog");
    Ok(catalog)
}

/// Select `choice` in `option`.
///
/// Selecting is idempotent: a multi-select choice that is already picked
/// stays picked instead of being toggled off.
pub fn apply_choice(
    configurator: &mut ItemConfigurator<'_>,
    option: &str,
    choice: &str,
) -> Result<(), CommandError> {
    let kind = configurator
        .product()
        .option(option)
        .map(|o| o.kind)
        .ok_or_else(|| AppError::NotFound(format!("option {option:?}")))?;
    let choice = ChoiceId::new(choice);
    match kind {
        OptionKind::SingleSelect => configurator
            .select_single(option, &choice)
            .map_err(AppError::from)?,
        OptionKind::MultiSelect => {
            let selected = configurator
                .selections()
                .get(option)
                .is_some_and(|current| current.contains(&choice));
            if !selected {
                configurator
                    .toggle_multi(option, &choice)
                    .map_err(AppError::from)?;
            }
        }
    }
    Ok(())
}

/// Split an `Option=choice` argument.
pub fn parse_selection(raw: &str) -> Result<(&str, &str), CommandError> {
    raw.split_once('=')
        .map(|(option, choice)| (option.trim(), choice.trim()))
        .filter(|(option, choice)| !option.is_empty() && !choice.is_empty())
        .ok_or_else(|| CommandError::Selection(raw.to_owned()))
}
