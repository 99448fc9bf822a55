use movie_catalog_models::{Director, DirectorId};

/// Directors a fresh catalog starts with
pub fn default_directors() -> Vec<Director> {
    [
        (1, "Paul Feig", "Successful comedy director"),
        (2, "Quentin Tarantino", "Master of independent cinema"),
        (3, "Steven Spielberg", "Hollywood legend"),
        (4, "Martin Scorsese", "Icon of American cinema"),
    ]
    .into_iter()
    .map(|(id, name, bio)| Director {
        id: DirectorId(id),
        name: name.to_string(),
        nationality: "American".to_string(),
        bio: bio.to_string(),
    })
    .collect()
}
