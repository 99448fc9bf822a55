use super::context::{self, header_cell, report_catalog_error, table};
use super::prompts;
use crate::output::Output;
use crate::DirectorCommands;
use color_eyre::Result;
use comfy_table::Cell;
use movie_catalog_core::{CatalogStore, JsonFileStore};
use movie_catalog_models::{DirectorId, DirectorInput};
use serde_json::json;

pub fn run_director(cmd: DirectorCommands, output: &Output) -> Result<()> {
    let (config, path_manager) = context::load_config()?;
    let mut store = context::open_catalog(&config, &path_manager)?;

    match cmd {
        DirectorCommands::List => list_directors(&store, output),
        DirectorCommands::Add { name, nationality, bio } => save_director(
            &mut store,
            DirectorInput {
                id: None,
                name,
                nationality,
                bio,
            },
            output,
        ),
        DirectorCommands::Edit {
            id,
            name,
            nationality,
            bio,
        } => {
            let existing = store
                .director(id)
                .ok_or_else(|| color_eyre::eyre::eyre!("No director with ID {}", id))?;
            let mut input = DirectorInput::from(existing);
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(nationality) = nationality {
                input.nationality = nationality;
            }
            if bio.is_some() {
                input.bio = bio;
            }
            save_director(&mut store, input, output)
        }
        DirectorCommands::Delete { id, yes } => delete_director(&mut store, id, yes, output),
    }
}

fn list_directors(store: &CatalogStore<JsonFileStore>, output: &Output) -> Result<()> {
    let rows = store.director_rows();

    if !output.is_human() {
        output.json(&json!({ "directors": rows }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    if rows.is_empty() {
        output.info("No directors yet");
        return Ok(());
    }

    let mut director_table = table();
    director_table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Nationality"),
        header_cell("Movies"),
        header_cell("Bio"),
    ]);
    for row in &rows {
        director_table.add_row(vec![
            Cell::new(row.director.id),
            Cell::new(&row.director.name),
            Cell::new(&row.director.nationality),
            Cell::new(row.movie_count),
            Cell::new(&row.director.bio),
        ]);
    }
    println!("{}", director_table);
    Ok(())
}

fn save_director(store: &mut CatalogStore<JsonFileStore>, input: DirectorInput, output: &Output) -> Result<()> {
    let editing = input.id.is_some();
    match store.add_or_update_director(input) {
        Ok(director) => {
            output.done(
                format!(
                    "{} director '{}' (ID {})",
                    if editing { "Updated" } else { "Added" },
                    director.name,
                    director.id
                ),
                &json!({ "director": director }),
            );
            Ok(())
        }
        Err(e) => Err(report_catalog_error(output, "Director not saved", e)),
    }
}

fn delete_director(
    store: &mut CatalogStore<JsonFileStore>,
    id: DirectorId,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let Some(director) = store.director(id) else {
        output.info(format!("No director with ID {}", id));
        return Ok(());
    };

    let prompt = format!("Delete director '{}'?", director.name);
    if !yes && !prompts::confirm(&prompt)? {
        output.info("Cancelled");
        return Ok(());
    }

    store
        .delete_director(id)
        .map_err(|e| report_catalog_error(output, "Director not deleted", e))?;
    output.success(format!("Deleted director {}", id));
    Ok(())
}
