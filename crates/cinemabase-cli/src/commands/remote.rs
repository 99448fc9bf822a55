use super::context::{self, header_cell, report_import_error, table};
use crate::output::Output;
use color_eyre::Result;
use comfy_table::Cell;
use indicatif::{ProgressBar, ProgressStyle};
use movie_catalog_config::{Config, PathManager};
use movie_catalog_core::MovieImporter;
use movie_catalog_models::SearchHit;
use movie_catalog_sources::OmdbClient;
use serde_json::json;
use std::time::Duration;

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let (config, path_manager) = context::load_config()?;
    let importer = MovieImporter::new(omdb_client(&config, &path_manager)?);

    let spinner = spinner(output, format!("Searching OMDb for '{}'...", query.trim()));
    let result = importer.search(query).await;
    spinner.finish_and_clear();

    let hits: Vec<SearchHit> = result
        .map_err(|e| report_import_error(output, "Search failed", e))?
        .collect();

    if !output.is_human() {
        output.json(&json!({ "results": hits }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    if hits.is_empty() {
        output.info("No results");
        return Ok(());
    }

    let mut hit_table = table();
    hit_table.set_header(vec![
        header_cell("ID"),
        header_cell("Title"),
        header_cell("Year"),
        header_cell("Rating"),
        header_cell("Poster"),
    ]);
    for hit in &hits {
        let rating = hit
            .external_rating
            .map(|r| format!("⭐ {}", r))
            .unwrap_or_else(|| "N/A".to_string());
        hit_table.add_row(vec![
            Cell::new(&hit.external_id),
            Cell::new(&hit.title),
            Cell::new(&hit.year),
            Cell::new(rating),
            Cell::new(&hit.poster),
        ]);
    }
    println!("{}", hit_table);
    output.info("Import one with: cinemabase import <ID>");
    Ok(())
}

pub async fn run_import(external_id: &str, output: &Output) -> Result<()> {
    let (config, path_manager) = context::load_config()?;
    let importer = MovieImporter::new(omdb_client(&config, &path_manager)?);
    let mut store = context::open_catalog(&config, &path_manager)?;

    let spinner = spinner(output, format!("Importing {}...", external_id.trim()));
    let result = importer.import(&mut store, external_id).await;
    spinner.finish_and_clear();

    let movie = result.map_err(|e| report_import_error(output, "Import failed", e))?;
    output.done(
        format!("Imported '{}' ({}) as ID {}", movie.title, movie.year, movie.id),
        &json!({ "movie": movie }),
    );
    Ok(())
}

fn omdb_client(config: &Config, path_manager: &PathManager) -> Result<OmdbClient> {
    if !config.omdb.enabled {
        return Err(color_eyre::eyre::eyre!(
            "OMDb is disabled. Set [omdb] enabled = true in {}",
            path_manager.config_file().display()
        ));
    }

    let api_key = context::load_credentials(path_manager)?
        .resolve_omdb_api_key()
        .ok_or_else(|| color_eyre::eyre::eyre!("No OMDb API key set. Run 'cinemabase config omdb' first."))?;

    OmdbClient::new(
        api_key,
        config.omdb.base_url.clone(),
        Duration::from_secs(config.omdb.timeout_seconds),
    )
    .map_err(|e| color_eyre::eyre::eyre!("Failed to create OMDb client: {}", e))
}

/// Spinner on stderr, hidden unless output is for a human
fn spinner(output: &Output, message: String) -> ProgressBar {
    if !output.is_human() || output.is_quiet() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
