use crate::ids::DirectorId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Director {
    pub id: DirectorId,
    pub name: String,
    pub nationality: String,
    #[serde(default)]
    pub bio: String, // Empty when no biography was given
}

/// Director form data. `id` set means "edit this director".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectorInput {
    pub id: Option<DirectorId>,
    pub name: String,
    pub nationality: String,
    pub bio: Option<String>,
}

impl From<&Director> for DirectorInput {
    fn from(director: &Director) -> Self {
        Self {
            id: Some(director.id),
            name: director.name.clone(),
            nationality: director.nationality.clone(),
            bio: Some(director.bio.clone()),
        }
    }
}
