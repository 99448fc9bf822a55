use super::context::{self, header_cell, report_catalog_error, table};
use super::prompts;
use crate::output::Output;
use crate::{MovieCommands, MovieFields};
use color_eyre::Result;
use comfy_table::Cell;
use movie_catalog_core::{CatalogStore, JsonFileStore, SortKey};
use movie_catalog_models::{Genre, Movie, MovieId, MovieInput};
use serde_json::json;

pub fn run_movie(cmd: MovieCommands, output: &Output) -> Result<()> {
    let (config, path_manager) = context::load_config()?;
    let mut store = context::open_catalog(&config, &path_manager)?;

    match cmd {
        MovieCommands::List { search, genre, sort } => list_movies(&store, &search, &genre, &sort, output),
        MovieCommands::Show { id } => show_movie(&store, id, output),
        MovieCommands::Add { fields } => {
            let mut input = MovieInput::default();
            apply_fields(&mut input, fields);
            save_movie(&mut store, input, output)
        }
        MovieCommands::Edit { id, fields } => {
            let existing = store
                .movie(id)
                .ok_or_else(|| color_eyre::eyre::eyre!("No movie with ID {}", id))?;
            let mut input = MovieInput::from(existing);
            apply_fields(&mut input, fields);
            save_movie(&mut store, input, output)
        }
        MovieCommands::Delete { id, yes } => delete_movie(&mut store, id, yes, output),
    }
}

fn apply_fields(input: &mut MovieInput, fields: MovieFields) {
    if let Some(title) = fields.title {
        input.title = title;
    }
    if fields.year.is_some() {
        input.year = fields.year;
    }
    if fields.duration.is_some() {
        input.duration = fields.duration;
    }
    if let Some(genre) = fields.genre {
        input.genre = genre;
    }
    if fields.rating.is_some() {
        input.rating = fields.rating;
    }
    if fields.director.is_some() {
        input.director = fields.director;
    }
    if fields.synopsis.is_some() {
        input.synopsis = fields.synopsis;
    }
    if fields.poster.is_some() {
        input.poster = fields.poster;
    }
}

fn director_name(store: &CatalogStore<JsonFileStore>, movie: &Movie) -> String {
    store
        .director(movie.director)
        .map(|d| d.name.clone())
        .unwrap_or_else(|| "N/A".to_string())
}

fn list_movies(
    store: &CatalogStore<JsonFileStore>,
    search: &str,
    genre: &str,
    sort: &str,
    output: &Output,
) -> Result<()> {
    if !sort.is_empty() && SortKey::parse(sort).is_none() {
        output.warn(format!("Unknown sort key '{}', keeping catalog order", sort));
    }

    let movies = store.list_movies(search, genre, sort);

    if !output.is_human() {
        output.json(&json!({ "movies": movies }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    if movies.is_empty() {
        output.info("No movies found");
        return Ok(());
    }

    let mut movie_table = table();
    movie_table.set_header(vec![
        header_cell("ID"),
        header_cell("Title"),
        header_cell("Year"),
        header_cell("Genre"),
        header_cell("Rating"),
        header_cell("Director"),
    ]);
    for movie in &movies {
        movie_table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(movie.year),
            Cell::new(&movie.genre),
            Cell::new(format!("⭐ {}/10", movie.rating)),
            Cell::new(director_name(store, movie)),
        ]);
    }
    println!("{}", movie_table);
    Ok(())
}

fn show_movie(store: &CatalogStore<JsonFileStore>, id: MovieId, output: &Output) -> Result<()> {
    let detail = store
        .movie_detail(id)
        .ok_or_else(|| color_eyre::eyre::eyre!("No movie with ID {}", id))?;

    if !output.is_human() {
        output.json(&json!({ "movie": detail.movie, "director_name": detail.director_name }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let movie = detail.movie;
    let mut detail_table = table();
    detail_table.set_header(vec![header_cell(&movie.title)]);
    let rows = [
        ("Year", movie.year.to_string()),
        ("Duration", format!("{} minutes", movie.duration)),
        ("Genre", movie.genre.clone()),
        ("Rating", format!("⭐ {}/10", movie.rating)),
        ("Director", detail.director_name.clone()),
        (
            "Synopsis",
            movie
                .synopsis
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "No synopsis".to_string()),
        ),
        ("Poster", movie.poster.clone()),
        ("Added", movie.created_at.format("%Y-%m-%d").to_string()),
    ];
    for (label, value) in rows {
        detail_table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("{}", detail_table);
    Ok(())
}

fn save_movie(store: &mut CatalogStore<JsonFileStore>, input: MovieInput, output: &Output) -> Result<()> {
    let editing = input.id.is_some();
    if let Some(note) = custom_genre_note(&input.genre) {
        if output.is_human() {
            output.warn(note);
        }
    }
    match store.add_or_update_movie(input) {
        Ok(movie) => {
            output.done(
                format!(
                    "{} '{}' (ID {})",
                    if editing { "Updated" } else { "Added" },
                    movie.title,
                    movie.id
                ),
                &json!({ "movie": movie }),
            );
            Ok(())
        }
        Err(e) => Err(report_catalog_error(output, "Movie not saved", e)),
    }
}

/// Genres outside the standard categories are stored but not charted
fn custom_genre_note(genre: &str) -> Option<String> {
    let genre = genre.trim();
    if genre.is_empty() || Genre::from_label(genre).is_some() {
        return None;
    }
    let standard: Vec<&str> = Genre::ALL.iter().map(|g| g.label()).collect();
    Some(format!(
        "'{}' is not a standard genre and will not appear on the dashboard ({})",
        genre,
        standard.join(", ")
    ))
}

fn delete_movie(store: &mut CatalogStore<JsonFileStore>, id: MovieId, yes: bool, output: &Output) -> Result<()> {
    let Some(movie) = store.movie(id) else {
        output.info(format!("No movie with ID {}", id));
        return Ok(());
    };

    let prompt = format!("Delete '{}'?", movie.title);
    if !yes && !prompts::confirm(&prompt)? {
        output.info("Cancelled");
        return Ok(());
    }

    store
        .delete_movie(id)
        .map_err(|e| report_catalog_error(output, "Movie not deleted", e))?;
    output.success(format!("Deleted movie {}", id));
    Ok(())
}
