//! Serializers for view data. Both paths take already-projected data and
//! never change it.

use std::fmt::Write;

use crate::models::{BookDetails, ViewBook};

pub fn to_json(books: &[ViewBook]) -> serde_json::Result<String> {
    serde_json::to_string(books)
}

pub fn book_to_json(book: &ViewBook) -> serde_json::Result<String> {
    serde_json::to_string(book)
}

pub fn details_to_json(details: &BookDetails) -> serde_json::Result<String> {
    serde_json::to_string(details)
}

/// Book list fragment, one `<li>` per book.
pub fn to_html(books: &[ViewBook]) -> String {
    let mut out = String::from("<ul class=\"book-list\">\n");
    for book in books {
        write_book_item(&mut out, book);
    }
    out.push_str("</ul>\n");
    out
}

pub fn details_to_html(details: &BookDetails) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<section class=\"book-details\" id=\"details-{}\">",
        escape(&details.work_id)
    );
    if !details.cover_art_url.is_empty() {
        let _ = writeln!(
            out,
            "  <img class=\"cover\" src=\"{}\" alt=\"{}\">",
            escape(&details.cover_art_url),
            escape(&details.title)
        );
    }
    let _ = writeln!(out, "  <h2>{}</h2>", escape(&details.title));
    if !details.description.is_empty() {
        let _ = writeln!(out, "  <p class=\"description\">{}</p>", escape(&details.description));
    }
    if !details.subjects.is_empty() {
        let _ = writeln!(out, "  <p class=\"subjects\">{}</p>", escape(&details.subjects.join(", ")));
    }
    if !details.links.is_empty() {
        out.push_str("  <ul class=\"links\">\n");
        for link in &details.links {
            let _ = writeln!(
                out,
                "    <li><a href=\"{}\">{}</a></li>",
                escape(link),
                escape(link)
            );
        }
        out.push_str("  </ul>\n");
    }
    out.push_str("</section>\n");
    out
}

fn write_book_item(out: &mut String, book: &ViewBook) {
    let _ = writeln!(out, "  <li class=\"book\" data-work-id=\"{}\">", escape(&book.work_id));
    if !book.cover_art_url.is_empty() {
        let _ = writeln!(
            out,
            "    <img class=\"cover\" src=\"{}\" alt=\"{}\">",
            escape(&book.cover_art_url),
            escape(&book.title)
        );
    }
    let _ = writeln!(out, "    <h3>{}</h3>", escape(&book.title));
    if !book.authors.is_empty() {
        let _ = writeln!(out, "    <p class=\"authors\">{}</p>", escape(&book.authors.join(", ")));
    }
    if book.publish_year != 0 {
        let _ = writeln!(out, "    <p class=\"year\">{}</p>", book.publish_year);
    }
    if !book.subjects.is_empty() {
        let _ = writeln!(out, "    <p class=\"subjects\">{}</p>", escape(&book.subjects.join(", ")));
    }
    if !book.description.is_empty() {
        let _ = writeln!(out, "    <p class=\"description\">{}</p>", escape(&book.description));
    }
    if !book.work_id.is_empty() {
        let _ = writeln!(
            out,
            "    <a class=\"details\" href=\"/details?id={}\">Details</a>",
            urlencoding::encode(&book.work_id)
        );
    }
    if book.show_delete_button {
        let _ = writeln!(
            out,
            "    <button class=\"delete\" data-id=\"{}\">Remove</button>",
            book.id
        );
    }
    out.push_str("  </li>\n");
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
