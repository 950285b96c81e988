// View models produced from catalog data; rendering reads only these

use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    List,
    #[default]
    Grid,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(ViewMode::List),
            "grid" => Ok(ViewMode::Grid),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

/// CSS state for the container and the two toggle buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewToggle {
    pub container_list_class: bool,
    pub list_button_active: bool,
    pub grid_button_active: bool,
}

impl From<ViewMode> for ViewToggle {
    fn from(mode: ViewMode) -> Self {
        let list = mode == ViewMode::List;
        ViewToggle {
            container_list_class: list,
            list_button_active: list,
            grid_button_active: !list,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Author,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Parsed form of the `<field>-<direction>` sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::new(SortField::Title, SortDirection::Asc),
        SortKey::new(SortField::Title, SortDirection::Desc),
        SortKey::new(SortField::Author, SortDirection::Asc),
        SortKey::new(SortField::Author, SortDirection::Desc),
        SortKey::new(SortField::Date, SortDirection::Asc),
        SortKey::new(SortField::Date, SortDirection::Desc),
    ];

    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        SortKey { field, direction }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid sort selector: {}", s))?;
        let field = match field {
            "title" => SortField::Title,
            "author" => SortField::Author,
            "date" => SortField::Date,
            other => return Err(format!("unknown sort field: {}", other)),
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(format!("unknown sort direction: {}", other)),
        };
        Ok(SortKey { field, direction })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Date => "date",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}-{}", field, direction)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub label: String,
}

impl Pagination {
    pub fn for_page(page: u32, total_pages: u32) -> Self {
        Pagination {
            current_page: page,
            total_pages,
            prev_disabled: page == 1,
            next_disabled: page == total_pages,
            label: format!("Page {}", page),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::for_page(1, 1)
    }
}

/// One entry in the books container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub id: String,
    pub thumbnail: String,
    pub title: String,
    pub authors: String,
    pub published: String,
    pub detail_href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub thumbnail: String,
    pub title: String,
    pub subtitle: String,
    pub authors: String,
    pub publisher: String,
    pub published_date: String,
    pub categories: String,
    pub description: String,
    pub preview_link: String,
    pub info_link: String,
}

/// Everything the list page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub cards: Vec<BookCard>,
    pub pagination: Pagination,
    pub view_mode: ViewMode,
    pub search_term: String,
    pub sort: Option<SortKey>,
}

impl ListView {
    pub fn toggle(&self) -> ViewToggle {
        self.view_mode.into()
    }
}

pub const NO_BOOK_SELECTED: &str = "No book selected.";
pub const DETAIL_UNAVAILABLE: &str = "Unable to load book details. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    NoSelection,
    Loaded(Box<BookDetail>),
    Unavailable,
}

impl DetailView {
    /// Message shown in place of a book, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            DetailView::NoSelection => Some(NO_BOOK_SELECTED),
            DetailView::Unavailable => Some(DETAIL_UNAVAILABLE),
            DetailView::Loaded(_) => None,
        }
    }
}
