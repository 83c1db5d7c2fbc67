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

//! Entry point to the web interface.

use crate::driver::Driver;
use crate::model::BookId;
use axum::Router;
use axum::middleware;
use bookshelf_core::rest::{RestError, RestResult};
use serde::Deserialize;
use tower_http::catch_panic::CatchPanicLayer;

mod book_delete_get;
mod book_delete_post;
mod book_get;
mod book_new_get;
mod book_new_post;
mod book_post;
mod books_all_get;
mod books_get;
mod books_search_get;
mod funnel;
mod logging;
mod root_get;
#[cfg(test)]
mod testutils;
mod views;

/// Query parameters accepted by the listing pages.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListQuery {
    /// Raw number of the page to show.
    page: Option<String>,

    /// Raw search term to restrict the listing to.
    #[serde(rename = "searchValue")]
    search_value: Option<String>,
}

/// Parses the book identifier in the `raw` path segment.
///
/// Identifiers that cannot possibly exist are reported as missing pages.
fn parse_book_id(raw: &str) -> RestResult<BookId> {
    raw.parse::<BookId>().map_err(|e| RestError::NotFound(e.to_string()))
}

/// Wraps `router` with the handling that all pages share: unknown routes, panics in handlers,
/// and access logging.
fn with_funnel<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .fallback(funnel::not_found)
        .layer(CatchPanicLayer::custom(funnel::panic_page))
        .layer(middleware::from_fn(logging::log_request))
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;
    let router = Router::new()
        .route("/", get(root_get::handler))
        .route("/books", get(books_get::handler))
        .route("/books/all", get(books_all_get::handler))
        .route("/books/search", get(books_search_get::handler))
        .route("/books/new", get(book_new_get::handler).post(book_new_post::handler))
        .route("/books/:id", get(book_get::handler).post(book_post::handler))
        .route(
            "/books/:id/delete",
            get(book_delete_get::handler).post(book_delete_post::handler),
        );
    with_funnel(router).with_state(driver)
}
