//! Readlist persistence.
//!
//! Entries are stored flattened: `authors` and `subjects` become
//! comma-joined strings, and optional fields become nullable columns. An
//! empty list or empty string is stored as NULL, and NULL reads back as an
//! empty list or string. Blank author names are rejected; blank subjects
//! are dropped before joining.
//!
//! The comma encoding is lossy for names that themselves contain a comma:
//! "Herbert, Frank" is stored as-is and reads back as two names. Storing
//! such names faithfully needs an array-typed column or a length-prefixed
//! encoding instead of delimiter joining.

use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

use crate::db;
use crate::error::{ReadlistError, Result};
use crate::models::{NewReadlistEntry, ReadlistEntry};

const LIST_DELIMITER: char = ',';

/// Column values of one `readlist` row, excluding the generated id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadlistRow {
    pub title: String,
    pub authors: String,
    pub subjects: Option<String>,
    pub description: Option<String>,
    pub cover_art_url: Option<String>,
    pub work_id: String,
}

#[derive(Debug, Clone)]
pub struct ReadlistRepository {
    db_path: PathBuf,
}

impl ReadlistRepository {
    /// Creates the database if needed and brings its schema up to date.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        db::open_db(&db_path)?;
        Ok(Self { db_path })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.db_path)?)
    }

    /// Validates and stores a new entry, returning the id the store assigned.
    pub fn add(&self, entry: &NewReadlistEntry) -> Result<i64> {
        validate(entry)?;
        let row = to_row(entry);

        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO readlist (title, authors, subjects, description, cover_art_url, work_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                row.title,
                row.authors,
                row.subjects,
                row.description,
                row.cover_art_url,
                row.work_id
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn list(&self) -> Result<Vec<ReadlistEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, authors, subjects, description, cover_art_url, work_id
             FROM readlist
             ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                ReadlistRow {
                    title: row.get(1)?,
                    authors: row.get(2)?,
                    subjects: row.get(3)?,
                    description: row.get(4)?,
                    cover_art_url: row.get(5)?,
                    work_id: row.get(6)?,
                },
            ))
        })?;

        let mut entries = vec![];
        for row in rows {
            let (id, row) = row?;
            entries.push(entry_from_row(id, row));
        }
        Ok(entries)
    }

    /// Removes one entry. A missing id is `NotFound`; a failing store is
    /// `Store`.
    pub fn delete_by_id(&self, id: i64) -> Result<()> {
        let conn = self.connect()?;
        let affected = conn.execute("DELETE FROM readlist WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(ReadlistError::NotFound { id });
        }
        Ok(())
    }
}

/// Checks required fields, reporting every missing one at once.
pub fn validate(entry: &NewReadlistEntry) -> Result<()> {
    let mut missing_fields = vec![];
    if entry.title.trim().is_empty() {
        missing_fields.push("title");
    }
    // A blank name would vanish on the way back out of the store.
    if entry.authors.is_empty() || entry.authors.iter().any(|author| author.trim().is_empty()) {
        missing_fields.push("authors");
    }
    if entry.work_id.trim().is_empty() {
        missing_fields.push("work_id");
    }

    if missing_fields.is_empty() {
        Ok(())
    } else {
        Err(ReadlistError::validation(missing_fields))
    }
}

pub fn to_row(entry: &NewReadlistEntry) -> ReadlistRow {
    ReadlistRow {
        title: entry.title.clone(),
        authors: join_list(&entry.authors).unwrap_or_default(),
        subjects: entry.subjects.as_deref().and_then(join_list),
        description: nullable(entry.description.as_deref()),
        cover_art_url: nullable(entry.cover_art_url.as_deref()),
        work_id: entry.work_id.clone(),
    }
}

pub fn entry_from_row(id: i64, row: ReadlistRow) -> ReadlistEntry {
    ReadlistEntry {
        id,
        title: row.title,
        authors: split_list(Some(&row.authors)),
        subjects: split_list(row.subjects.as_deref()),
        description: row.description.unwrap_or_default(),
        cover_art_url: row.cover_art_url.unwrap_or_default(),
        work_id: row.work_id,
    }
}

/// Joins a list for storage, skipping blank elements. A list with nothing
/// left has no stored value.
pub fn join_list(values: &[String]) -> Option<String> {
    let kept: Vec<&str> = values
        .iter()
        .map(|value| value.as_str())
        .filter(|value| !value.trim().is_empty())
        .collect();
    if kept.is_empty() {
        return None;
    }
    Some(kept.join(&LIST_DELIMITER.to_string()))
}

/// Splits a stored list, trimming each element and dropping empty ones.
pub fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or("")
        .split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}

fn nullable(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::{entry_from_row, join_list, split_list, to_row, validate, ReadlistRepository};
    use crate::error::ReadlistError;
    use crate::models::NewReadlistEntry;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn dune() -> NewReadlistEntry {
        NewReadlistEntry {
            title: "Dune".to_string(),
            authors: strings(&["Frank Herbert", "Brian Herbert"]),
            subjects: Some(strings(&["Science fiction", "Deserts"])),
            description: Some("Arrakis.".to_string()),
            cover_art_url: None,
            work_id: "OL893415W".to_string(),
        }
    }

    fn temp_repo() -> (tempfile::TempDir, ReadlistRepository) {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = ReadlistRepository::open(dir.path().join("readlist.db")).expect("open repo");
        (dir, repo)
    }

    #[test]
    fn validation_names_every_missing_field() {
        let err = validate(&NewReadlistEntry::default()).expect_err("expected validation error");
        match err {
            ReadlistError::Validation { missing_fields } => {
                assert_eq!(missing_fields, strings(&["title", "authors", "work_id"]));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_authors_count_as_missing() {
        let entry = NewReadlistEntry {
            authors: strings(&["", "  "]),
            ..dune()
        };
        match validate(&entry) {
            Err(ReadlistError::Validation { missing_fields }) => {
                assert_eq!(missing_fields, strings(&["authors"]));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn blank_author_names_are_rejected() {
        let entry = NewReadlistEntry {
            authors: strings(&["Frank Herbert", ""]),
            ..dune()
        };
        match validate(&entry) {
            Err(ReadlistError::Validation { missing_fields }) => {
                assert_eq!(missing_fields, strings(&["authors"]));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn blank_elements_and_values_round_trip_through_the_store() {
        let (_dir, repo) = temp_repo();
        let rejected = NewReadlistEntry {
            authors: strings(&["A", ""]),
            ..dune()
        };
        assert!(matches!(repo.add(&rejected), Err(ReadlistError::Validation { .. })));

        let entry = NewReadlistEntry {
            authors: strings(&["A"]),
            subjects: Some(strings(&["", "  "])),
            description: Some("   ".to_string()),
            ..dune()
        };
        assert_eq!(to_row(&entry).subjects, None);

        let id = repo.add(&entry).expect("add");
        let conn = rusqlite::Connection::open(repo.db_path()).expect("open");
        let stored_subjects: Option<String> = conn
            .query_row(
                "SELECT subjects FROM readlist WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .expect("stored row");
        assert_eq!(stored_subjects, None);

        let entries = repo.list().expect("list");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].authors, strings(&["A"]));
        assert!(entries[0].subjects.is_empty());
        assert_eq!(entries[0].description, "   ");
    }

    #[test]
    fn empty_optionals_are_stored_as_null() {
        let entry = NewReadlistEntry {
            subjects: Some(vec![]),
            description: Some(String::new()),
            cover_art_url: None,
            ..dune()
        };
        let row = to_row(&entry);

        assert_eq!(row.authors, "Frank Herbert,Brian Herbert");
        assert_eq!(row.subjects, None);
        assert_eq!(row.description, None);
        assert_eq!(row.cover_art_url, None);
    }

    #[test]
    fn null_columns_read_back_as_empty() {
        let mut row = to_row(&dune());
        row.subjects = None;
        row.description = None;

        let entry = entry_from_row(3, row);
        assert!(entry.subjects.is_empty());
        assert_eq!(entry.description, "");
        assert_eq!(entry.cover_art_url, "");
        assert_eq!(split_list(None), Vec::<String>::new());
        assert_eq!(split_list(Some("")), Vec::<String>::new());
    }

    #[test]
    fn split_trims_each_name() {
        assert_eq!(split_list(Some(" A , B ,C")), strings(&["A", "B", "C"]));
        assert_eq!(join_list(&[]), None);
        assert_eq!(join_list(&strings(&["A", " ", "B"])), Some("A,B".to_string()));
    }

    #[test]
    fn names_with_commas_do_not_survive_the_encoding() {
        let joined = join_list(&strings(&["Herbert, Frank"])).expect("joined");
        assert_eq!(split_list(Some(&joined)), strings(&["Herbert", "Frank"]));
    }

    #[test]
    fn add_then_list_round_trips_lists() {
        let (_dir, repo) = temp_repo();

        let id = repo.add(&dune()).expect("add");
        let entries = repo.list().expect("list");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);
        assert_eq!(entries[0].authors, strings(&["Frank Herbert", "Brian Herbert"]));
        assert_eq!(entries[0].subjects, strings(&["Science fiction", "Deserts"]));
        assert_eq!(entries[0].description, "Arrakis.");
        assert_eq!(entries[0].cover_art_url, "");
    }

    #[test]
    fn invalid_entry_is_not_stored() {
        let (_dir, repo) = temp_repo();
        let entry = NewReadlistEntry {
            title: " ".to_string(),
            ..dune()
        };

        assert!(matches!(repo.add(&entry), Err(ReadlistError::Validation { .. })));
        assert!(repo.list().expect("list").is_empty());
    }

    #[test]
    fn delete_missing_id_is_not_found_and_keeps_other_rows() {
        let (_dir, repo) = temp_repo();
        let kept = repo.add(&dune()).expect("add");

        match repo.delete_by_id(kept + 100) {
            Err(ReadlistError::NotFound { id }) => assert_eq!(id, kept + 100),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(repo.list().expect("list").len(), 1);

        repo.delete_by_id(kept).expect("delete");
        assert!(repo.list().expect("list").is_empty());
    }

    #[test]
    fn broken_store_is_a_store_error_not_missing() {
        let (_dir, repo) = temp_repo();
        let conn = rusqlite::Connection::open(repo.db_path()).expect("open");
        conn.execute_batch("DROP TABLE readlist;").expect("drop table");

        assert!(matches!(repo.delete_by_id(1), Err(ReadlistError::Store(_))));
        assert!(matches!(repo.list(), Err(ReadlistError::Store(_))));
    }

    #[test]
    fn ids_come_from_the_store() {
        let (_dir, repo) = temp_repo();
        let first = repo.add(&dune()).expect("add first");
        let second = repo.add(&dune()).expect("add second");
        assert!(second > first);
    }
}
