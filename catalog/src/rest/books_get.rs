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

//! Page to browse the listing of all books.

use crate::driver::Driver;
use crate::model::PageRequest;
use crate::rest::ListQuery;
use crate::rest::funnel::ErrorPage;
use crate::rest::views;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use bookshelf_core::rest::RestError;

/// Page handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Html<String>, ErrorPage> {
    let Query(query) = query.map_err(|e| RestError::InvalidRequest(e.body_text()))?;

    let current = PageRequest::parse(query.page.as_deref());
    let page = driver.find_page(current).await?;
    Ok(views::index(&page, current, None)?)
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;
    use bookshelf_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/books".to_owned())
    }

    /// Creates `n` books whose titles sort in creation order.
    async fn create_books(context: &TestContext, n: usize) {
        for i in 0..n {
            context.create_simple_book(&format!("Book {:02}", i), "Author").await;
        }
    }

    #[tokio::test]
    async fn test_empty() {
        let context = TestContext::setup().await;

        let body = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_html("<title>Library</title>")
            .await;
        assert!(!body.contains("<td>"));
        assert!(!body.contains("page="));
        assert!(body.contains("href=\"/books/new\""));
    }

    #[tokio::test]
    async fn test_first_page() {
        let context = TestContext::setup().await;
        create_books(&context, 7).await;

        let body = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_html("Book 00(.|\n)*Book 04")
            .await;
        assert!(!body.contains("Book 05"));
        assert!(body.contains("<a class=\"active\" href=\"/books?page=1\">1</a>"));
        assert!(body.contains("<a class=\"\" href=\"/books?page=2\">2</a>"));
        assert!(!body.contains("page=3"));
    }

    #[tokio::test]
    async fn test_explicit_page() {
        let context = TestContext::setup().await;
        create_books(&context, 7).await;

        let body = OneShotBuilder::new(context.into_app(), route())
            .with_query([("page", "2")])
            .send_empty()
            .await
            .expect_html("Book 05(.|\n)*Book 06")
            .await;
        assert!(!body.contains("Book 04"));
        assert!(body.contains("<a class=\"active\" href=\"/books?page=2\">2</a>"));
    }

    #[tokio::test]
    async fn test_page_beyond_last() {
        let context = TestContext::setup().await;
        create_books(&context, 3).await;

        let body = OneShotBuilder::new(context.into_app(), route())
            .with_query([("page", "9")])
            .send_empty()
            .await
            .expect_html("<title>Library</title>")
            .await;
        assert!(!body.contains("<td>"));
        assert!(body.contains("href=\"/books?page=1\""));
    }

    #[tokio::test]
    async fn test_invalid_page_shows_first() {
        for raw in ["0", "-1", "abc", ""] {
            let context = TestContext::setup().await;
            create_books(&context, 6).await;

            let body = OneShotBuilder::new(context.into_app(), route())
                .with_query([("page", raw)])
                .send_empty()
                .await
                .expect_html("Book 00")
                .await;
            assert!(!body.contains("Book 05"), "Wrong page for {}", raw);
            assert!(body.contains("<a class=\"active\" href=\"/books?page=1\">1</a>"));
        }
    }

    #[tokio::test]
    async fn test_escapes_values() {
        let context = TestContext::setup().await;
        context.create_simple_book("<b>Bold</b>", "Tom & Jerry").await;

        let body = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_html("&lt;b&gt;Bold&lt;/b&gt;")
            .await;
        assert!(body.contains("<td>Tom &amp; Jerry</td>"));
        assert!(!body.contains("<b>Bold</b>"));
    }
}
