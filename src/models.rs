use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier of a movie. The public catalogue serves UUID strings, older
/// dumps use integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Number(i64),
    Text(String),
}

/// One actor entry of a movie's cast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A movie entry as served by the paginated endpoint.
///
/// Every field is optional; absent values degrade to placeholder text at
/// render time instead of failing the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub id: Option<MovieId>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient_casts")]
    pub casts: Option<Vec<CastMember>>,
}

impl Movie {
    /// Title to show, or `None` when missing or empty.
    pub fn title(&self) -> Option<&str> {
        non_empty(self.original_title.as_deref())
    }

    pub fn poster(&self) -> Option<&str> {
        non_empty(self.poster_path.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(self.overview.as_deref())
    }
}

impl CastMember {
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    pub fn profile(&self) -> Option<&str> {
        non_empty(self.profile_path.as_deref())
    }
}

/// One validated page of the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub current_page: u32,
    pub last_page: u32,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Anything but an array means "no cast". Entries that are not cast objects
/// become unnamed members.
fn lenient_casts<'de, D>(deserializer: D) -> Result<Option<Vec<CastMember>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => Some(
            entries
                .into_iter()
                .map(|entry| CastMember::deserialize(entry).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    })
}
