use super::context::{self, header_cell, table};
use crate::output::Output;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use serde_json::json;

const BAR_WIDTH: usize = 30;

pub fn run_dashboard(output: &Output) -> Result<()> {
    let (config, path_manager) = context::load_config()?;
    let store = context::open_catalog(&config, &path_manager)?;

    let summary = store.dashboard_summary();
    let genres = store.genre_counts();
    let chart = store.rating_chart(config.display.top_rated_count);

    if !output.is_human() {
        output.json(&json!({
            "summary": summary,
            "genres": genres,
            "top_rated": chart,
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let mut summary_table = table();
    summary_table.set_header(vec![header_cell("Total movies"), header_cell("Average rating"), header_cell("Directors"), header_cell("Recent movies")]);
    summary_table.add_row(vec![
        Cell::new(summary.total_movies),
        Cell::new(&summary.average_rating),
        Cell::new(summary.director_count),
        Cell::new(summary.recent_movie_count),
    ]);
    println!("{}", summary_table);

    println!("\n{}", "Movies by genre".bold());
    let largest = genres.iter().map(|g| g.count).max().unwrap_or(0);
    for entry in &genres {
        let bar = bar_length(entry.count as f64, largest as f64);
        println!("  {:<16} {} {}", entry.genre.label(), "█".repeat(bar).cyan(), entry.count);
    }

    println!("\n{}", "Top rated".bold());
    if chart.is_empty() {
        println!("  No movies yet");
    }
    for point in &chart {
        let bar = bar_length(point.rating, 10.0);
        println!("  {:<20} {} {:.1}", point.label, "█".repeat(bar).yellow(), point.rating);
    }

    Ok(())
}

fn bar_length(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * BAR_WIDTH as f64).round().clamp(1.0, BAR_WIDTH as f64) as usize
}
