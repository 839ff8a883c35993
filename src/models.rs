use serde::{Deserialize, Serialize};

/// One hit from a catalog search.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
    pub title: String,
    pub authors: Vec<String>,
    pub publish_year: Option<i64>,
    pub subjects: Vec<String>,
    pub work_id: String, // without the "/works/" prefix
}

/// A single work record, normalized from the catalog's detail document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct BookDetails {
    pub title: String,
    pub description: String,
    pub subjects: Vec<String>,
    pub links: Vec<String>,
    pub cover_art_url: String,
    pub work_id: String,
}

/// A saved readlist row after it has been read back from the store.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReadlistEntry {
    pub id: i64,
    pub title: String,
    pub authors: Vec<String>,
    pub subjects: Vec<String>,
    pub description: String,
    pub cover_art_url: String,
    pub work_id: String,
}

/// An entry as submitted by a client, before the store assigns an id.
///
/// Required fields default to empty so a partial payload still decodes and
/// validation can name everything that is missing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct NewReadlistEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_art_url: Option<String>,
    #[serde(default)]
    pub work_id: String,
}

impl NewReadlistEntry {
    pub fn into_entry(self, id: i64) -> ReadlistEntry {
        ReadlistEntry {
            id,
            title: self.title,
            authors: self.authors,
            subjects: self.subjects.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            cover_art_url: self.cover_art_url.unwrap_or_default(),
            work_id: self.work_id,
        }
    }
}

/// Presentation model shared by the JSON and HTML renderers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ViewBook {
    pub id: i64, // only meaningful for saved entries
    pub title: String,
    pub authors: Vec<String>,
    pub subjects: Vec<String>,
    pub publish_year: i64, // 0 when unknown
    pub description: String,
    pub cover_art_url: String,
    pub work_id: String,
    pub show_delete_button: bool,
}
