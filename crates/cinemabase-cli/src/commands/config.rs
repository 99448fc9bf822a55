use super::context::{self, header_cell, table};
use super::prompts;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::Cell;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Omdb { clear: true, .. } => clear_omdb(output),
        ConfigCommands::Omdb { api_key, .. } => configure_omdb(api_key, output),
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let (config, path_manager) = context::load_config()?;
    let credentials = context::load_credentials(&path_manager)?;

    let key_from_env = std::env::var("OMDB_API_KEY").map(|k| !k.trim().is_empty()).unwrap_or(false);
    let api_key = credentials.resolve_omdb_api_key().unwrap_or_default();
    let shown_key = if full { api_key.clone() } else { mask_string(&api_key) };
    let data_dir = config.data_dir(&path_manager);

    if !output.is_human() {
        output.json(&json!({
            "config_file": path_manager.config_file(),
            "credentials_file": path_manager.credentials_file(),
            "storage": {
                "data_dir": data_dir,
                "seed_default_directors": config.storage.seed_default_directors,
            },
            "omdb": {
                "enabled": config.omdb.enabled,
                "base_url": config.omdb.base_url,
                "timeout_seconds": config.omdb.timeout_seconds,
                "api_key": shown_key,
                "api_key_from_env": key_from_env,
            },
            "display": {
                "top_rated_count": config.display.top_rated_count,
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let mut config_table = table();
    config_table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    let rows = [
        ("Config file", path_manager.config_file().display().to_string()),
        ("Credentials file", path_manager.credentials_file().display().to_string()),
        ("Data directory", data_dir.display().to_string()),
        ("Seed default directors", config.storage.seed_default_directors.to_string()),
        ("OMDb enabled", config.omdb.enabled.to_string()),
        ("OMDb base URL", config.omdb.base_url.clone()),
        ("OMDb timeout", format!("{}s", config.omdb.timeout_seconds)),
        (
            "OMDb API key",
            if key_from_env {
                format!("{} (from OMDB_API_KEY)", shown_key)
            } else {
                shown_key
            },
        ),
        ("Top-rated count", config.display.top_rated_count.to_string()),
    ];
    for (label, value) in rows {
        config_table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("{}", config_table);
    Ok(())
}

fn configure_omdb(api_key_arg: Option<String>, output: &Output) -> Result<()> {
    let (config, path_manager) = context::load_config()?;
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;

    let api_key = match api_key_arg {
        Some(key) => key,
        None => {
            output.info("Get a free key at https://www.omdbapi.com/apikey.aspx");
            prompts::prompt_secret("OMDb API key")?
        }
    };
    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(color_eyre::eyre::eyre!("API key cannot be empty"));
    }

    let mut credentials = context::load_credentials(&path_manager)?;
    credentials.set_omdb_api_key(api_key);
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    let config_file = path_manager.config_file();
    if !config_file.exists() {
        config
            .save_to_file(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", config_file.display(), e))?;
    }

    let credentials_file = path_manager.credentials_file();
    let overridden = std::env::var("OMDB_API_KEY").map(|k| !k.trim().is_empty()).unwrap_or(false);
    output.done(
        format!("OMDb API key saved to {}", credentials_file.display()),
        &json!({ "credentials_file": credentials_file, "overridden_by_env": overridden }),
    );
    if overridden && output.is_human() {
        output.warn("OMDB_API_KEY is set in the environment and takes precedence over the stored key");
    }
    Ok(())
}

fn clear_omdb(output: &Output) -> Result<()> {
    let (_, path_manager) = context::load_config()?;
    let mut credentials = context::load_credentials(&path_manager)?;
    if credentials.get_omdb_api_key().is_none() {
        output.info("No OMDb API key is stored");
        return Ok(());
    }

    credentials.remove_omdb_api_key();
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;
    output.success("Removed the stored OMDb API key");
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
