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

//! Page to browse the books that match a search term.

use crate::driver::Driver;
use crate::model::{PageRequest, SearchTerm};
use crate::rest::ListQuery;
use crate::rest::funnel::ErrorPage;
use crate::rest::views;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use bookshelf_core::rest::RestError;

/// Page handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ErrorPage> {
    let Query(query) = query.map_err(|e| RestError::InvalidRequest(e.body_text()))?;

    let term = match SearchTerm::parse(query.search_value.as_deref()) {
        Some(term) => term,
        None => return Ok(Redirect::to("/books").into_response()),
    };

    let current = PageRequest::parse(query.page.as_deref());
    let page = driver.search_page(&term, current).await?;
    if *page.total() == 0 {
        return Ok(views::books_not_found(&term).into_response());
    }
    Ok(views::index(&page, current, Some(&term))?.into_response())
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use bookshelf_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/books/search".to_owned())
    }

    #[tokio::test]
    async fn test_matches_any_field() {
        let context = TestContext::setup().await;
        context.create_simple_book("The Smiths", "Someone").await;
        context.create_simple_book("Unrelated", "Adam SMITH").await;
        context
            .create_book(
                BookFields::new("Poems", "Ann", Some("Blacksmithing".to_owned()), None).unwrap(),
            )
            .await;
        context
            .create_book(
                BookFields::new("Dated", "Bob", None, Some(Year::from_i32(1984).unwrap())).unwrap(),
            )
            .await;
        context.create_simple_book("Nothing", "Here").await;

        let body = OneShotBuilder::new(context.app(), route())
            .with_query([("searchValue", "smith")])
            .send_empty()
            .await
            .expect_html("The Smiths")
            .await;
        assert!(body.contains("Adam SMITH"));
        assert!(body.contains("Poems"));
        assert!(!body.contains("Nothing"));
        assert!(!body.contains("Dated"));
        assert!(body.contains("value=\"smith\""));
        assert!(body.contains("Show all books"));

        let body = OneShotBuilder::new(context.into_app(), route())
            .with_query([("searchValue", "984")])
            .send_empty()
            .await
            .expect_html("Dated")
            .await;
        assert!(!body.contains("Poems"));
    }

    #[tokio::test]
    async fn test_pages_keep_search_term() {
        let context = TestContext::setup().await;
        for i in 0..6 {
            context.create_simple_book(&format!("Match {}", i), "Author").await;
            context.create_simple_book(&format!("Other {}", i), "Author").await;
        }

        let body = OneShotBuilder::new(context.into_app(), route())
            .with_query([("searchValue", "match"), ("page", "2")])
            .send_empty()
            .await
            .expect_html("Match 5")
            .await;
        assert!(!body.contains("Match 4"));
        assert!(!body.contains("Other"));
        assert!(body.contains("href=\"/books/search?searchValue=match&amp;page=1\""));
        assert!(body.contains(
            "<a class=\"active\" href=\"/books/search?searchValue=match&amp;page=2\">2</a>"
        ));
    }

    #[tokio::test]
    async fn test_no_matches() {
        let context = TestContext::setup().await;
        context.create_simple_book("Some book", "Author").await;

        let body = OneShotBuilder::new(context.into_app(), route())
            .with_query([("searchValue", "<missing>")])
            .send_empty()
            .await
            .expect_html("<h1>No Books Found</h1>")
            .await;
        assert!(body.contains("&ldquo;&lt;missing&gt;&rdquo;"));
        assert!(!body.contains("Some book"));
    }

    #[tokio::test]
    async fn test_wildcards_are_literal() {
        let context = TestContext::setup().await;
        context.create_simple_book("Anything", "Author").await;

        OneShotBuilder::new(context.into_app(), route())
            .with_query([("searchValue", "%")])
            .send_empty()
            .await
            .expect_html("<h1>No Books Found</h1>")
            .await;
    }

    #[tokio::test]
    async fn test_blank_term_redirects() {
        for query in [vec![], vec![("searchValue", "")], vec![("searchValue", "   ")]] {
            let context = TestContext::setup().await;

            let builder = OneShotBuilder::new(context.into_app(), route());
            let builder = if query.is_empty() { builder } else { builder.with_query(query) };
            builder.send_empty().await.expect_redirect("/books");
        }
    }
}
