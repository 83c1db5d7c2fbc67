// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! HTML views of the catalog.
//!
//! Every view renders its own content template and wraps it in the shared layout.  All values
//! that come from the user or from the database are escaped before being substituted.

use crate::model::*;
use axum::response::Html;
use bookshelf_core::model::FieldErrors;
use bookshelf_core::rest::{RestError, RestResult};
use bookshelf_core::template::{apply, escape};

/// Shared layout of all pages.
const LAYOUT: &str = include_str!("templates/layout.html");

/// Listing of books with search and pagination controls.
const INDEX: &str = include_str!("templates/index.html");

/// Notice shown in the listing when a search is active.
const CLEAR_SEARCH: &str = include_str!("templates/clear-search.html");

/// One book in the listing.
const BOOK_ROW: &str = include_str!("templates/book-row.html");

/// One link in the pagination controls.
const PAGE_LINK: &str = include_str!("templates/page-link.html");

/// Input fields of the book forms.
const BOOK_FIELDS: &str = include_str!("templates/book-fields.html");

/// Box listing the validation problems of a rejected form.
const FORM_ERRORS: &str = include_str!("templates/form-errors.html");

/// One validation problem of a rejected form.
const FORM_ERROR: &str = include_str!("templates/form-error.html");

/// Form to create a book.
const NEW_BOOK: &str = include_str!("templates/new-book.html");

/// Form to update a book.
const UPDATE_BOOK: &str = include_str!("templates/update-book.html");

/// Confirmation page to delete a book.
const DELETE: &str = include_str!("templates/delete.html");

/// Page shown when a search has no results.
const BOOKS_NOT_FOUND: &str = include_str!("templates/books-not-found.html");

/// Page shown for missing resources.
const NOT_FOUND: &str = include_str!("templates/not-found.html");

/// Page shown for failed requests.
const ERROR: &str = include_str!("templates/error.html");

/// Wraps `content` in the shared layout.
fn layout(title: &str, content: &str) -> Html<String> {
    Html(apply(LAYOUT, &[("title", escape(title).as_str()), ("content", content)]))
}

/// Renders one row of the listing of books.
fn book_row(book: &Book) -> String {
    let fields = book.fields();
    apply(
        BOOK_ROW,
        &[
            ("id", book.id().to_string().as_str()),
            ("title", escape(fields.title()).as_str()),
            ("author", escape(fields.author()).as_str()),
            ("genre", escape(fields.genre().as_deref().unwrap_or("")).as_str()),
            ("year", fields.year().map(|y| y.to_string()).unwrap_or_default().as_str()),
        ],
    )
}

/// Renders the link to page `number` of the listing, which is restricted to `search` if present.
fn page_link(
    number: u64,
    current: PageRequest,
    search: Option<&SearchTerm>,
) -> RestResult<String> {
    let href = match search {
        None => format!("/books?page={}", number),
        Some(term) => {
            let number = number.to_string();
            let query = serde_urlencoded::to_string(&[
                ("searchValue", term.as_str()),
                ("page", number.as_str()),
            ])
            .map_err(|e| RestError::InternalError(format!("Cannot encode page link: {}", e)))?;
            format!("/books/search?{}", query)
        }
    };
    let class = if number == u64::from(current.number()) { "active" } else { "" };
    Ok(apply(
        PAGE_LINK,
        &[
            ("class", class),
            ("href", escape(&href).as_str()),
            ("number", number.to_string().as_str()),
        ],
    ))
}

/// Renders the `index` view with the given table `rows` and pagination `pages`.
fn listing(rows: &str, pages: &str, search: Option<&SearchTerm>) -> Html<String> {
    let search_value = search.map(|term| escape(term.as_str())).unwrap_or_default();
    let clear_search = match search {
        Some(_) => apply(CLEAR_SEARCH, &[("search_value", search_value.as_str())]),
        None => String::new(),
    };

    let title = "Library";
    let content = apply(
        INDEX,
        &[
            ("title", title),
            ("search_value", search_value.as_str()),
            ("clear_search", clear_search.as_str()),
            ("rows", rows),
            ("pages", pages),
        ],
    );
    layout(title, &content)
}

/// Renders the `index` view with one `page` of books.
///
/// `current` is the page being shown and `search` is the active search term, if any, which is
/// echoed in the search box and carried over to the pagination links.
pub(crate) fn index(
    page: &BookPage,
    current: PageRequest,
    search: Option<&SearchTerm>,
) -> RestResult<Html<String>> {
    let rows = page.books().iter().map(book_row).collect::<String>();

    let mut pages = String::new();
    for number in 1..=page.num_pages() {
        pages.push_str(&page_link(number, current, search)?);
    }

    Ok(listing(&rows, &pages, search))
}

/// Renders the `index` view with all `books` in one table and no pagination controls.
pub(crate) fn index_all(books: &[Book]) -> Html<String> {
    let rows = books.iter().map(book_row).collect::<String>();
    listing(&rows, "", None)
}

/// Renders the input fields of the book forms, pre-filled with `draft`.
fn book_fields(draft: &BookDraft) -> String {
    apply(
        BOOK_FIELDS,
        &[
            ("book_title", escape(&draft.title).as_str()),
            ("book_author", escape(&draft.author).as_str()),
            ("book_genre", escape(&draft.genre).as_str()),
            ("book_year", escape(&draft.year).as_str()),
        ],
    )
}

/// Renders the validation problems of a rejected form, if any.
fn form_errors(errors: Option<&FieldErrors>) -> String {
    let errors = match errors {
        Some(errors) if !errors.is_empty() => errors,
        _ => return String::new(),
    };
    let items = errors
        .iter()
        .map(|e| {
            apply(FORM_ERROR, &[("field", e.field()), ("message", escape(e.message()).as_str())])
        })
        .collect::<String>();
    apply(FORM_ERRORS, &[("items", items.as_str())])
}

/// Renders the `books/new-book` view with the values in `draft` and the problems in `errors`.
pub(crate) fn new_book(draft: &BookDraft, errors: Option<&FieldErrors>) -> Html<String> {
    let title = "New Book";
    let content = apply(
        NEW_BOOK,
        &[
            ("title", title),
            ("errors", form_errors(errors).as_str()),
            ("fields", book_fields(draft).as_str()),
        ],
    );
    layout(title, &content)
}

/// Renders the `books/update-book` view for book `id` with the values in `draft` and the problems
/// in `errors`.
pub(crate) fn update_book(
    id: BookId,
    draft: &BookDraft,
    errors: Option<&FieldErrors>,
) -> Html<String> {
    let title = "Update Book";
    let content = apply(
        UPDATE_BOOK,
        &[
            ("title", title),
            ("id", id.to_string().as_str()),
            ("errors", form_errors(errors).as_str()),
            ("fields", book_fields(draft).as_str()),
        ],
    );
    layout(title, &content)
}

/// Renders the `books/delete` confirmation view for `book`.
pub(crate) fn delete_book(book: &Book) -> Html<String> {
    let title = "Delete Book";
    let content = apply(
        DELETE,
        &[
            ("title", title),
            ("id", book.id().to_string().as_str()),
            ("book_title", escape(book.fields().title()).as_str()),
            ("book_author", escape(book.fields().author()).as_str()),
        ],
    );
    layout(title, &content)
}

/// Renders the `books/books-not-found` view for a search of `term` without results.
pub(crate) fn books_not_found(term: &SearchTerm) -> Html<String> {
    let title = "No Books Found";
    let content = apply(
        BOOKS_NOT_FOUND,
        &[("title", title), ("search_value", escape(term.as_str()).as_str())],
    );
    layout(title, &content)
}

/// Renders the `not-found` view with `message`.
pub(crate) fn not_found(message: &str) -> Html<String> {
    let content = apply(NOT_FOUND, &[("message", escape(message).as_str())]);
    layout("Page Not Found", &content)
}

/// Renders the `error` view with `heading` and `message`.
pub(crate) fn error(heading: &str, message: &str) -> Html<String> {
    let content = apply(
        ERROR,
        &[("heading", escape(heading).as_str()), ("message", escape(message).as_str())],
    );
    layout(heading, &content)
}
