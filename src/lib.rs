pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod readlist;
pub mod render;
pub mod view;

pub use catalog::CatalogClient;
pub use config::Settings;
pub use error::{ReadlistError, Result};
pub use models::{BookDetails, NewReadlistEntry, ReadlistEntry, SearchResult, ViewBook};
pub use readlist::ReadlistRepository;
pub use view::{project, project_all, BookSource, ViewContext};
