use crate::models::{ReadlistEntry, SearchResult, ViewBook};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewContext {
    pub is_readlist_view: bool,
}

impl ViewContext {
    pub fn search() -> Self {
        Self {
            is_readlist_view: false,
        }
    }

    pub fn readlist() -> Self {
        Self {
            is_readlist_view: true,
        }
    }
}

/// A record that can be shown as a `ViewBook`.
#[derive(Debug, Clone, Copy)]
pub enum BookSource<'a> {
    Search(&'a SearchResult),
    Saved(&'a ReadlistEntry),
}

impl<'a> From<&'a SearchResult> for BookSource<'a> {
    fn from(value: &'a SearchResult) -> Self {
        BookSource::Search(value)
    }
}

impl<'a> From<&'a ReadlistEntry> for BookSource<'a> {
    fn from(value: &'a ReadlistEntry) -> Self {
        BookSource::Saved(value)
    }
}

/// Builds the presentation model. Fields the source does not carry are left
/// at their zero value; `show_delete_button` comes only from `context`.
pub fn project<'a>(book: impl Into<BookSource<'a>>, context: ViewContext) -> ViewBook {
    let mut view = match book.into() {
        BookSource::Search(result) => ViewBook {
            title: result.title.clone(),
            authors: result.authors.clone(),
            subjects: result.subjects.clone(),
            publish_year: result.publish_year.unwrap_or(0),
            work_id: result.work_id.clone(),
            ..ViewBook::default()
        },
        BookSource::Saved(entry) => ViewBook {
            id: entry.id,
            title: entry.title.clone(),
            authors: entry.authors.clone(),
            subjects: entry.subjects.clone(),
            description: entry.description.clone(),
            cover_art_url: entry.cover_art_url.clone(),
            work_id: entry.work_id.clone(),
            ..ViewBook::default()
        },
    };
    view.show_delete_button = context.is_readlist_view;
    view
}

pub fn project_all<'a, T>(books: &'a [T], context: ViewContext) -> Vec<ViewBook>
where
    &'a T: Into<BookSource<'a>>,
{
    books.iter().map(|book| project(book, context)).collect()
}
