use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[schema(value_type = i16)]
pub struct GenreId(pub i16);

impl std::fmt::Display for GenreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i16> for GenreId {
    fn from(id: i16) -> Self {
        GenreId(id)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl Genre {
    pub fn new(id: GenreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
