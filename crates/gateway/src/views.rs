//! HTML rendering for the web forms
//!
//! Pages are plain strings poured into one layout. Every value that
//! came from a document or a user goes through [`escape`].

use axum::response::Html;
use litforge_common::db::models::{GenerationStatus, Literature};
use litforge_common::db::LiteratureEdit;

const LAYOUT: &str = include_str!("../templates/layout.html");

/// Escape text for HTML element and attribute content
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap a page body in the shared layout
pub fn page(title: &str, body: &str) -> Html<String> {
    let (head, tail) = LAYOUT.split_once("{{ body }}").unwrap_or((LAYOUT, ""));
    let head = head.replace("{{ title }}", &escape(title));

    let mut html = String::with_capacity(head.len() + body.len() + tail.len());
    html.push_str(&head);
    html.push_str(body);
    html.push_str(tail);
    Html(html)
}

pub fn upload_form() -> Html<String> {
    page(
        "Upload Literature",
        r#"<form method="post" action="/upload" enctype="multipart/form-data"
      onsubmit="document.getElementById('progress').hidden = false">
  <label for="file">PDF file</label>
  <input type="file" id="file" name="file" accept="application/pdf,.pdf" required>
  <p><button type="submit">Upload</button></p>
  <p id="progress" hidden>Processing document and generating summary and outline...</p>
</form>"#,
    )
}

pub fn upload_success(record: &Literature) -> Html<String> {
    let body = format!(
        r#"<p class="success">Literature '{}' uploaded and processed successfully!</p>
{}
<p><a href="/upload">Upload another</a> · <a href="/literature">View all literature</a></p>"#,
        escape(&record.title),
        record_details(record, true),
    );
    page("Upload Literature", &body)
}

pub fn literature_list(records: &[Literature]) -> Html<String> {
    if records.is_empty() {
        return page(
            "View Literature",
            r#"<p>No literature found. <a href="/upload">Upload a PDF</a> to get started.</p>"#,
        );
    }

    let body: String = records.iter().map(|r| record_details(r, false)).collect();
    page("View Literature", &body)
}

pub fn delete_confirm(record: &Literature) -> Html<String> {
    let body = format!(
        r#"<p>Delete '{}' by {}? This cannot be undone.</p>
<form method="post" action="/literature/{}/delete">
  <button type="submit">Delete</button>
  <a href="/literature">Cancel</a>
</form>"#,
        escape(&record.title),
        escape(&record.authors),
        record.id,
    );
    page("Delete Literature", &body)
}

/// Record picker; the option value is always the id
pub fn edit_picker(records: &[Literature]) -> Html<String> {
    if records.is_empty() {
        return page("Edit Literature", "<p>No literature available to edit.</p>");
    }

    let options: String = records
        .iter()
        .map(|r| {
            format!(
                r#"<option value="{}">{}</option>"#,
                r.id,
                escape(&r.display_label())
            )
        })
        .collect();

    let body = format!(
        r#"<form method="get" action="/edit">
  <label for="id">Select literature to edit</label>
  <select id="id" name="id">{}</select>
  <p><button type="submit">Edit</button></p>
</form>"#,
        options
    );
    page("Edit Literature", &body)
}

/// Edit form pre-filled with `values`; `error` is shown above the form
pub fn edit_form(id: i64, values: &LiteratureEdit, error: Option<&str>) -> Html<String> {
    let error_html = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();

    let body = format!(
        r#"{error_html}<form method="post" action="/literature/{id}/edit">
  <label for="title">Title</label>
  <input type="text" id="title" name="title" value="{title}">
  <label for="authors">Authors</label>
  <input type="text" id="authors" name="authors" value="{authors}">
  <label for="publication_date">Publication Date</label>
  <input type="text" id="publication_date" name="publication_date" value="{date}">
  <label for="location">Location</label>
  <input type="text" id="location" name="location" value="{location}">
  <label for="abstract">Abstract</label>
  <textarea id="abstract" name="abstract">
{abstract_text}</textarea>
  <label for="summary">Summary</label>
  <textarea id="summary" name="summary">
{summary}</textarea>
  <label for="outline">Outline</label>
  <textarea id="outline" name="outline">
{outline}</textarea>
  <p><button type="submit">Save Changes</button> <a href="/literature">Cancel</a></p>
</form>"#,
        title = escape(&values.title),
        authors = escape(&values.authors),
        date = escape(&values.publication_date),
        location = escape(&values.location),
        abstract_text = escape(&values.abstract_text),
        summary = escape(&values.summary),
        outline = escape(&values.outline),
    );
    page("Edit Literature", &body)
}

pub fn edit_saved(record: &Literature) -> Html<String> {
    let body = format!(
        r#"<p class="success">Literature '{}' updated successfully!</p>
{}"#,
        escape(&record.title),
        record_details(record, true),
    );
    page("Edit Literature", &body)
}

pub fn error_page(status: u16, message: &str) -> Html<String> {
    let body = format!(
        r#"<p class="error">{}</p>
<p><a href="/literature">Back to literature</a></p>"#,
        escape(message)
    );
    page(&format!("Error {}", status), &body)
}

fn record_details(record: &Literature, open: bool) -> String {
    format!(
        r#"<details{open}>
  <summary>{label}</summary>
  <p><strong>Authors:</strong> {authors}</p>
  <p><strong>Publication Date:</strong> {date}</p>
  <p><strong>Location:</strong> {location}</p>
  <p><strong>Abstract:</strong></p>
  <pre>{abstract_text}</pre>
  <p><strong>Summary:</strong></p>
  {summary}
  <p><strong>Outline:</strong></p>
  {outline}
  <p>
    <a href="/literature/{id}/file">Download PDF</a> ·
    <a href="/literature/{id}/edit">Edit</a> ·
    <a href="/literature/{id}/delete">Delete</a>
  </p>
</details>
"#,
        open = if open { " open" } else { "" },
        label = escape(&record.display_label()),
        authors = escape(&record.authors),
        date = escape(&record.publication_date),
        location = escape(&record.location),
        abstract_text = escape(&record.abstract_text),
        summary = generated_block(&record.summary, record.summary_status()),
        outline = generated_block(&record.outline, record.outline_status()),
        id = record.id,
    )
}

fn generated_block(content: &str, status: GenerationStatus) -> String {
    match status {
        GenerationStatus::Generated => format!("<pre>{}</pre>", escape(content)),
        GenerationStatus::Failed => format!(r#"<pre class="failed">{}</pre>"#, escape(content)),
    }
}
