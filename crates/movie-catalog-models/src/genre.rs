use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed genre categories shown on the dashboard chart.
///
/// Movies store their genre as free text; only these categories are counted
/// by the genre view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    #[serde(rename = "Science-Fiction")]
    ScienceFiction,
    Horror,
    Thriller,
    Animation,
}

impl Genre {
    pub const ALL: [Genre; 7] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::ScienceFiction,
        Genre::Horror,
        Genre::Thriller,
        Genre::Animation,
    ];

    /// Label stored in `Movie::genre` for this category
    pub fn label(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::ScienceFiction => "Science-Fiction",
            Genre::Horror => "Horror",
            Genre::Thriller => "Thriller",
            Genre::Animation => "Animation",
        }
    }

    /// Exact label match
    pub fn from_label(label: &str) -> Option<Genre> {
        Genre::ALL.into_iter().find(|g| g.label() == label)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
