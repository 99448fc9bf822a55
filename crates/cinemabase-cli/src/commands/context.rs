use crate::output::Output;
use color_eyre::Result;
use movie_catalog_config::{Config, CredentialStore, PathManager};
use movie_catalog_core::{CatalogError, CatalogStore, ImportError, JsonFileStore};
use serde_json::json;

/// Load and validate `config.toml`, using defaults when it does not exist
pub fn load_config() -> Result<(Config, PathManager)> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid config in {}: {}", config_file.display(), e))?;

    Ok((config, path_manager))
}

pub fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;
    Ok(credentials)
}

/// Open the on-disk catalog, seeding the stock directors when configured
pub fn open_catalog(config: &Config, path_manager: &PathManager) -> Result<CatalogStore<JsonFileStore>> {
    let data_dir = config.data_dir(path_manager);
    tracing::debug!("Opening catalog in {:?}", data_dir);

    let mut store = CatalogStore::load(JsonFileStore::new(&data_dir))
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load catalog from {}: {}", data_dir.display(), e))?;

    if config.storage.seed_default_directors {
        store
            .seed_default_directors()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to seed default directors: {}", e))?;
    }

    Ok(store)
}

/// Show a rejected mutation to the user and turn it into the command's error
pub fn report_catalog_error(output: &Output, action: &str, err: CatalogError) -> color_eyre::Report {
    match &err {
        CatalogError::Validation(errors) => {
            if output.is_human() {
                for field_error in errors.iter() {
                    output.error(format!("{}: {}", field_error.field, field_error.message));
                }
            } else {
                output.json(&json!({ "type": "validation_error", "errors": errors }));
            }
            color_eyre::eyre::eyre!("{}: {} invalid field(s)", action, errors.len())
        }
        CatalogError::ReferentialIntegrity { .. } | CatalogError::Storage(_) => {
            output.error(err.to_string());
            color_eyre::eyre::eyre!("{}", action)
        }
    }
}

pub fn report_import_error(output: &Output, action: &str, err: ImportError) -> color_eyre::Report {
    match err {
        ImportError::Catalog(catalog_err) => report_catalog_error(output, action, catalog_err),
        other => {
            output.error(other.to_string());
            color_eyre::eyre::eyre!("{}", action)
        }
    }
}

pub fn table() -> comfy_table::Table {
    let mut table = comfy_table::Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

pub fn header_cell(text: &str) -> comfy_table::Cell {
    comfy_table::Cell::new(text).add_attribute(comfy_table::Attribute::Bold)
}
