use crate::error::ValidationErrors;
use movie_catalog_models::{Director, DirectorId, DirectorInput, MovieInput};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2026;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// Movie input after validation, trimmed and typed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidMovie {
    pub title: String,
    pub year: i32,
    pub duration: u32,
    pub genre: String,
    pub rating: f64,
    pub director: DirectorId,
    pub synopsis: Option<String>,
    pub poster: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn checked_year(input: &MovieInput) -> Option<i32> {
    input.year.filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
}

fn checked_duration(input: &MovieInput) -> Option<u32> {
    input.duration.filter(|d| *d >= 1).map(i32::unsigned_abs)
}

fn checked_rating(input: &MovieInput) -> Option<f64> {
    input
        .rating
        .filter(|r| r.is_finite() && (MIN_RATING..=MAX_RATING).contains(r))
}

/// Check every movie field except the director reference
pub fn check_movie_fields(input: &MovieInput, errors: &mut ValidationErrors) {
    if input.title.trim().is_empty() {
        errors.push("title", "title is required");
    }
    if checked_year(input).is_none() {
        errors.push("year", format!("year must be between {} and {}", MIN_YEAR, MAX_YEAR));
    }
    if checked_duration(input).is_none() {
        errors.push("duration", "duration must be at least 1 minute");
    }
    if input.genre.trim().is_empty() {
        errors.push("genre", "genre is required");
    }
    if checked_rating(input).is_none() {
        errors.push("rating", "rating must be between 0 and 10");
    }
}

/// Validate a movie form. All violations are collected before returning.
pub fn validate_movie(input: &MovieInput, directors: &[Director]) -> Result<ValidMovie, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_movie_fields(input, &mut errors);

    let director = match input.director {
        None => {
            errors.push("director", "director is required");
            None
        }
        Some(id) if !directors.iter().any(|d| d.id == id) => {
            errors.push("director", format!("director {} does not exist", id));
            None
        }
        Some(id) => Some(id),
    };

    match (checked_year(input), checked_duration(input), checked_rating(input), director) {
        (Some(year), Some(duration), Some(rating), Some(director)) if errors.is_empty() => Ok(ValidMovie {
            title: input.title.trim().to_string(),
            year,
            duration,
            genre: input.genre.trim().to_string(),
            rating,
            director,
            synopsis: non_blank(input.synopsis.as_deref()),
            poster: non_blank(input.poster.as_deref()),
        }),
        _ => Err(errors),
    }
}

/// Director input after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDirector {
    pub name: String,
    pub nationality: String,
    pub bio: String,
}

pub fn validate_director(input: &DirectorInput) -> Result<ValidDirector, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if input.name.trim().is_empty() {
        errors.push("name", "name is required");
    }
    if input.nationality.trim().is_empty() {
        errors.push("nationality", "nationality is required");
    }
    errors.into_result()?;

    Ok(ValidDirector {
        name: input.name.trim().to_string(),
        nationality: input.nationality.trim().to_string(),
        bio: non_blank(input.bio.as_deref()).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn director(id: u64) -> Director {
        Director {
            id: DirectorId(id),
            name: "Agnès Varda".to_string(),
            nationality: "French".to_string(),
            bio: String::new(),
        }
    }

    fn valid_input() -> MovieInput {
        MovieInput {
            id: None,
            title: "  Cléo from 5 to 7 ".to_string(),
            year: Some(1962),
            duration: Some(90),
            genre: "Drama".to_string(),
            rating: Some(8.0),
            director: Some(DirectorId(1)),
            synopsis: Some("   ".to_string()),
            poster: None,
        }
    }

    #[test]
    fn test_valid_movie_is_trimmed() {
        let valid = validate_movie(&valid_input(), &[director(1)]).unwrap();
        assert_eq!(valid.title, "Cléo from 5 to 7");
        assert_eq!(valid.duration, 90);
        assert_eq!(valid.synopsis, None);
    }

    #[test]
    fn test_every_violation_is_reported() {
        let input = MovieInput {
            title: "   ".to_string(),
            year: Some(1899),
            duration: Some(0),
            genre: String::new(),
            rating: Some(10.5),
            director: None,
            ..MovieInput::default()
        };

        let errors = validate_movie(&input, &[director(1)]).unwrap_err();
        assert_eq!(errors.len(), 6);
        for field in ["title", "year", "duration", "genre", "rating", "director"] {
            assert!(errors.has_field(field), "missing {}", field);
        }
    }

    #[test]
    fn test_year_bounds_are_inclusive() {
        let mut input = valid_input();
        input.year = Some(1900);
        assert!(validate_movie(&input, &[director(1)]).is_ok());
        input.year = Some(2026);
        assert!(validate_movie(&input, &[director(1)]).is_ok());
        input.year = Some(2027);
        assert!(validate_movie(&input, &[director(1)]).is_err());
    }

    #[test]
    fn test_zero_rating_is_accepted() {
        let mut input = valid_input();
        input.rating = Some(0.0);
        assert!(validate_movie(&input, &[director(1)]).is_ok());
        input.rating = Some(f64::NAN);
        assert!(validate_movie(&input, &[director(1)]).unwrap_err().has_field("rating"));
    }

    #[test]
    fn test_unknown_director_is_rejected() {
        let mut input = valid_input();
        input.director = Some(DirectorId(99));
        let errors = validate_movie(&input, &[director(1)]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("director"));
    }

    #[test]
    fn test_director_requires_name_and_nationality() {
        let errors = validate_director(&DirectorInput::default()).unwrap_err();
        assert!(errors.has_field("name"));
        assert!(errors.has_field("nationality"));

        let valid = validate_director(&DirectorInput {
            id: None,
            name: " Jane Campion ".to_string(),
            nationality: "New Zealander".to_string(),
            bio: None,
        })
        .unwrap();
        assert_eq!(valid.name, "Jane Campion");
        assert_eq!(valid.bio, "");
    }
}
