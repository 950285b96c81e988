//! HTML for the list and detail pages.
//!
//! Element ids match the ones the page scripts and styles expect
//! (`booksContainer`, `searchInput`, `prevPageBtn`, ...).

use crate::domain::models::{
    BookCard, BookDetail, DetailView, ListView, SortDirection, SortField, SortKey,
};

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>{}</style>
</head>
<body>
{}
</body>
</html>"#,
        html_escape(title),
        CSS,
        content
    )
}

fn sort_label(key: SortKey) -> &'static str {
    match (key.field, key.direction) {
        (SortField::Title, SortDirection::Asc) => "Title (A-Z)",
        (SortField::Title, SortDirection::Desc) => "Title (Z-A)",
        (SortField::Author, SortDirection::Asc) => "Author (A-Z)",
        (SortField::Author, SortDirection::Desc) => "Author (Z-A)",
        (SortField::Date, SortDirection::Asc) => "Oldest first",
        (SortField::Date, SortDirection::Desc) => "Newest first",
    }
}

fn render_card(card: &BookCard) -> String {
    format!(
        r#"        <div class="book-item">
            <img src="{thumb}" alt="{title}">
            <div class="book-details">
                <h2>{title}</h2>
                <p>Author: {authors}</p>
                <p>Published: {published}</p>
                <a href="{href}" target="_blank">More Details</a>
            </div>
        </div>
"#,
        thumb = html_escape(&card.thumbnail),
        title = html_escape(&card.title),
        authors = html_escape(&card.authors),
        published = html_escape(&card.published),
        href = html_escape(&card.detail_href),
    )
}

fn disabled(flag: bool) -> &'static str {
    if flag { " disabled" } else { "" }
}

fn active(flag: bool) -> &'static str {
    if flag { " active" } else { "" }
}

pub fn list_page(view: &ListView) -> String {
    let toggle = view.toggle();

    let options: String = SortKey::ALL
        .iter()
        .map(|key| {
            let selected = if view.sort == Some(*key) { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                key,
                selected,
                sort_label(*key)
            )
        })
        .collect();

    let cards: String = view.cards.iter().map(render_card).collect();

    let content = format!(
        r#"<header>
    <h1>Book Library</h1>
    <div class="controls">
        <form method="get" action="/">
            <input type="search" id="searchInput" name="search" placeholder="Search by title or author" value="{search}">
        </form>
        <form method="get" action="/">
            <select id="sortSelect" name="sort" onchange="this.form.submit()">{options}</select>
        </form>
        <a id="listViewBtn" class="view-btn{list_active}" href="/?view=list">List</a>
        <a id="gridViewBtn" class="view-btn{grid_active}" href="/?view=grid">Grid</a>
    </div>
</header>
<main>
    <div id="booksContainer" class="books-container{list_class}">
{cards}    </div>
    <form class="pagination" method="get" action="/">
        <button type="submit" id="prevPageBtn" name="nav" value="prev"{prev_disabled}>Previous</button>
        <span id="currentPage">{label}</span>
        <button type="submit" id="nextPageBtn" name="nav" value="next"{next_disabled}>Next</button>
    </form>
</main>"#,
        search = html_escape(&view.search_term),
        options = options,
        list_active = active(toggle.list_button_active),
        grid_active = active(toggle.grid_button_active),
        list_class = if toggle.container_list_class { " list-view" } else { "" },
        cards = cards,
        prev_disabled = disabled(view.pagination.prev_disabled),
        label = html_escape(&view.pagination.label),
        next_disabled = disabled(view.pagination.next_disabled),
    );
    base_template("Book Library", &content)
}

/// Anchor for an API-supplied URL; only http(s) targets are linked.
fn external_link(href: &str, class: &str, label: &str) -> String {
    if !(href.starts_with("http://") || href.starts_with("https://")) {
        return String::new();
    }
    format!(
        r#"                <a href="{}" target="_blank" class="{}">{}</a>
"#,
        html_escape(href),
        class,
        label
    )
}

fn render_detail(detail: &BookDetail) -> String {
    format!(
        r#"    <div class="book-detail-content">
        <img src="{thumb}" alt="{title}" class="book-detail-image">
        <div class="book-detail-info">
            <h1>{title}</h1>
            <h2>{subtitle}</h2>
            <p><strong>Authors:</strong> {authors}</p>
            <p><strong>Publisher:</strong> {publisher}</p>
            <p><strong>Published Date:</strong> {published}</p>
            <p><strong>Categories:</strong> {categories}</p>
            <div class="book-description">
                <h3>Description</h3>
                <p>{description}</p>
            </div>
            <div class="book-links">
{preview}{info}            </div>
        </div>
    </div>
"#,
        thumb = html_escape(&detail.thumbnail),
        title = html_escape(&detail.title),
        subtitle = html_escape(&detail.subtitle),
        authors = html_escape(&detail.authors),
        publisher = html_escape(&detail.publisher),
        published = html_escape(&detail.published_date),
        categories = html_escape(&detail.categories),
        description = html_escape(&detail.description),
        preview = external_link(&detail.preview_link, "preview-link", "Preview Book"),
        info = external_link(&detail.info_link, "info-link", "More Information"),
    )
}

pub fn detail_page(view: &DetailView) -> String {
    let (title, inner) = match view {
        DetailView::Loaded(detail) => (detail.title.as_str(), render_detail(detail)),
        other => (
            "Book Details",
            format!("    <p>{}</p>\n", other.message().unwrap_or_default()),
        ),
    };
    let content = format!(
        r#"<main>
    <a href="/" class="back-link">Back to library</a>
    <div id="bookDetailContainer">
{}    </div>
</main>"#,
        inner
    );
    base_template(title, &content)
}

pub const CSS: &str = r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem; color: #222; }
.controls { display: flex; gap: .5rem; align-items: center; flex-wrap: wrap; }
.view-btn { padding: .3rem .7rem; border: 1px solid #999; text-decoration: none; color: #222; }
.view-btn.active { background: #222; color: #fff; }
.books-container { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 1rem; margin: 1rem 0; }
.books-container.list-view { grid-template-columns: 1fr; }
.book-item { border: 1px solid #ddd; padding: .75rem; display: flex; gap: .75rem; }
.book-item img { width: 100px; height: 150px; object-fit: cover; }
.pagination { display: flex; gap: 1rem; align-items: center; justify-content: center; }
.book-detail-content { display: flex; gap: 1.5rem; }
.book-detail-image { width: 300px; }
"#;
