//! Handler-facing contract: each operation produces a status code, a
//! content type, and a rendered body. Errors are mapped to statuses and
//! logged here; the components underneath never log.

use serde_json::json;

use crate::catalog::CatalogClient;
use crate::error::ReadlistError;
use crate::models::NewReadlistEntry;
use crate::readlist::ReadlistRepository;
use crate::render;
use crate::view::{project, project_all, ViewContext};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Response {
    fn json(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: CONTENT_TYPE_JSON,
            body,
        }
    }

    fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: CONTENT_TYPE_HTML,
            body,
        }
    }

    fn no_content() -> Self {
        Self {
            status: 204,
            content_type: CONTENT_TYPE_JSON,
            body: String::new(),
        }
    }

    fn bad_request(message: &str) -> Self {
        Self::json(400, json!({ "error": message }).to_string())
    }

    fn from_error(err: &ReadlistError) -> Self {
        Self::json(err.status_code(), err.to_payload().to_string())
    }

    fn encoding_failed(err: serde_json::Error) -> Self {
        log::error!("failed to encode response: {}", err);
        Self::json(500, json!({ "error": "failed to encode response" }).to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub fn search(client: &CatalogClient, query: &str, format: Format) -> Response {
    let query = query.trim();
    if query.is_empty() {
        return Response::bad_request("Missing query parameter 'q'");
    }

    let results = match client.search(query) {
        Ok(results) => results,
        Err(err) => {
            log::error!("search failed query=\"{}\": {}", query, err);
            return Response::from_error(&err);
        }
    };
    log::info!("search query=\"{}\" found={}", query, results.len());

    let views = project_all(&results, ViewContext::search());
    match format {
        Format::Html => Response::html(200, render::to_html(&views)),
        Format::Json => match render::to_json(&views) {
            Ok(body) => Response::json(200, body),
            Err(err) => Response::encoding_failed(err),
        },
    }
}

pub fn details(client: &CatalogClient, work_id: &str, format: Format) -> Response {
    let work_id = work_id.trim();
    if work_id.is_empty() {
        return Response::bad_request("missing work ID");
    }

    let details = match client.get_details(work_id) {
        Ok(details) => details,
        Err(err) => {
            log::error!("error loading details for {}: {}", work_id, err);
            return Response::from_error(&err);
        }
    };
    log::info!("details work_id={} links={}", work_id, details.links.len());

    match format {
        Format::Html => Response::html(200, render::details_to_html(&details)),
        Format::Json => match render::details_to_json(&details) {
            Ok(body) => Response::json(200, body),
            Err(err) => Response::encoding_failed(err),
        },
    }
}

/// Adds an entry from a JSON request body. Answers with the created book.
pub fn add(repo: &ReadlistRepository, body: &str) -> Response {
    let entry: NewReadlistEntry = match serde_json::from_str(body) {
        Ok(entry) => entry,
        Err(err) => {
            log::warn!("rejected readlist payload: {}", err);
            return Response::bad_request("Invalid input");
        }
    };
    add_entry(repo, entry)
}

pub fn add_entry(repo: &ReadlistRepository, entry: NewReadlistEntry) -> Response {
    let id = match repo.add(&entry) {
        Ok(id) => id,
        Err(err) => {
            match &err {
                ReadlistError::Validation { .. } => log::warn!("readlist add rejected: {}", err),
                _ => log::error!("failed to add book to readlist: {}", err),
            }
            return Response::from_error(&err);
        }
    };
    log::info!("readlist add id={} work_id={}", id, entry.work_id);

    let saved = entry.into_entry(id);
    match render::book_to_json(&project(&saved, ViewContext::readlist())) {
        Ok(body) => Response::json(201, body),
        Err(err) => Response::encoding_failed(err),
    }
}

pub fn list(repo: &ReadlistRepository, format: Format) -> Response {
    let entries = match repo.list() {
        Ok(entries) => entries,
        Err(err) => {
            log::error!("failed to retrieve readlist: {}", err);
            return Response::from_error(&err);
        }
    };
    log::info!("readlist list count={}", entries.len());

    let views = project_all(&entries, ViewContext::readlist());
    match format {
        Format::Html => Response::html(200, render::to_html(&views)),
        Format::Json => match render::to_json(&views) {
            Ok(body) => Response::json(200, body),
            Err(err) => Response::encoding_failed(err),
        },
    }
}

pub fn delete(repo: &ReadlistRepository, id: i64) -> Response {
    match repo.delete_by_id(id) {
        Ok(()) => {
            log::info!("readlist delete id={}", id);
            Response::no_content()
        }
        Err(err) => {
            match &err {
                ReadlistError::NotFound { .. } => log::warn!("readlist delete: {}", err),
                _ => log::error!("failed to delete book {}: {}", id, err),
            }
            Response::from_error(&err)
        }
    }
}
