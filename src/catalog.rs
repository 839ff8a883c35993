use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::Settings;
use crate::error::{ReadlistError, Result};
use crate::models::{BookDetails, SearchResult};

const HTTP_USER_AGENT: &str = "Readlist/0.1 (+https://openlibrary.org/developers/api)";
/// Length of the "/works/" prefix on upstream work keys.
const WORK_KEY_PREFIX_LEN: usize = 7;

/// Blocking client for the Open Library search and works endpoints.
///
/// Every call issues exactly one GET. Nothing is retried or cached, and no
/// timeout is set beyond the transport default.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    catalog_url: String,
    covers_url: String,
}

impl CatalogClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_urls(&settings.catalog_url, &settings.covers_url)
    }

    pub fn with_urls(catalog_url: &str, covers_url: &str) -> Result<Self> {
        let catalog_url = catalog_url.trim_end_matches('/').to_string();
        let http = Client::builder()
            .user_agent(HTTP_USER_AGENT)
            .build()
            .map_err(|source| ReadlistError::Transport {
                url: catalog_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            catalog_url,
            covers_url: covers_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search.json?q={}",
            self.catalog_url,
            urlencoding::encode(query)
        )
    }

    pub fn work_url(&self, work_id: &str) -> String {
        format!(
            "{}/works/{}.json",
            self.catalog_url,
            urlencoding::encode(work_id)
        )
    }

    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = self.search_url(query);
        let data = self.fetch_json(&url)?;
        parse_search_response(&data).map_err(|message| ReadlistError::decode(&url, message))
    }

    pub fn get_details(&self, work_id: &str) -> Result<BookDetails> {
        let url = self.work_url(work_id);
        let data = self.fetch_json(&url)?;
        parse_work(&data, work_id, &self.covers_url)
            .map_err(|message| ReadlistError::decode(&url, message))
    }

    fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|source| ReadlistError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ReadlistError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().map_err(|source| ReadlistError::Transport {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str::<Value>(&body).map_err(|err| ReadlistError::decode(url, err.to_string()))
    }
}

/// Shape of the upstream `description` field.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Description {
    PlainText(String),
    Nested(String),
    Absent,
}

impl Description {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(text)) => Description::PlainText(text.clone()),
            Some(Value::Object(map)) => match map.get("value") {
                Some(Value::String(text)) => Description::Nested(text.clone()),
                _ => Description::Absent,
            },
            _ => Description::Absent,
        }
    }

    fn into_text(self) -> String {
        match self {
            Description::PlainText(text) | Description::Nested(text) => text,
            Description::Absent => String::new(),
        }
    }
}

pub(crate) fn normalize_description(value: Option<&Value>) -> String {
    Description::from_value(value).into_text()
}

/// Strips the "/works/" prefix from an upstream key. Keys no longer than the
/// prefix yield an empty id.
pub fn work_id_from_key(key: &str) -> String {
    if key.len() > WORK_KEY_PREFIX_LEN {
        key.get(WORK_KEY_PREFIX_LEN..).unwrap_or("").to_string()
    } else {
        String::new()
    }
}

fn parse_search_response(data: &Value) -> std::result::Result<Vec<SearchResult>, String> {
    let envelope = data
        .as_object()
        .ok_or_else(|| "expected a JSON object at the top level".to_string())?;

    let docs = match envelope.get("docs") {
        None | Some(Value::Null) => return Ok(vec![]),
        Some(Value::Array(docs)) => docs,
        Some(_) => return Err("`docs` is not an array".to_string()),
    };

    // A doc that is not an object has nothing to map; one with odd field
    // types still maps, with those fields defaulted.
    Ok(docs
        .iter()
        .filter(|doc| doc.is_object())
        .map(search_result_from_doc)
        .collect())
}

fn search_result_from_doc(doc: &Value) -> SearchResult {
    let publish_year = doc
        .get("first_publish_year")
        .and_then(|value| value.as_i64())
        .or_else(|| {
            doc.get("publish_year")
                .and_then(|value| value.as_array())
                .and_then(|years| years.iter().filter_map(|year| year.as_i64()).min())
        });

    SearchResult {
        title: string_field(doc, "title"),
        authors: string_list(doc, "author_name"),
        publish_year,
        subjects: string_list(doc, "subject"),
        work_id: work_id_from_key(doc.get("key").and_then(|value| value.as_str()).unwrap_or("")),
    }
}

fn parse_work(
    data: &Value,
    work_id: &str,
    covers_url: &str,
) -> std::result::Result<BookDetails, String> {
    if !data.is_object() {
        return Err("expected a JSON object at the top level".to_string());
    }

    let links = data
        .get("links")
        .and_then(|value| value.as_array())
        .map(|links| {
            links
                .iter()
                .filter_map(|link| link.get("url").and_then(|value| value.as_str()))
                .map(|url| url.to_string())
                .collect()
        })
        .unwrap_or_default();

    // Open Library uses -1 for "no cover" inside the covers array.
    let cover_art_url = data
        .get("covers")
        .and_then(|value| value.as_array())
        .and_then(|covers| covers.iter().filter_map(|cover| cover.as_i64()).find(|id| *id > 0))
        .map(|id| format!("{}/b/id/{}-L.jpg", covers_url, id))
        .unwrap_or_default();

    Ok(BookDetails {
        title: string_field(data, "title"),
        description: normalize_description(data.get("description")),
        subjects: string_list(data, "subjects"),
        links,
        cover_art_url,
        work_id: work_id.to_string(),
    })
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|value| value.as_str())
        .unwrap_or("")
        .to_string()
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(|value| value.as_array())
        .map(|values| {
            values
                .iter()
                .filter_map(|entry| entry.as_str().map(|text| text.to_string()))
                .collect()
        })
        .unwrap_or_default()
}
