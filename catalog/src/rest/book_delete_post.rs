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

//! Form submission to delete a book.

use crate::driver::Driver;
use crate::rest::funnel::ErrorPage;
use crate::rest::parse_book_id;
use axum::extract::{Path, State};
use axum::response::Redirect;
use log::info;

/// Page handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
) -> Result<Redirect, ErrorPage> {
    let id = parse_book_id(&id)?;
    driver.delete_book(id).await?;
    info!("Deleted book {}", id);
    Ok(Redirect::to("/books"))
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;
    use bookshelf_core::rest::testutils::*;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::POST, format!("/books/{}/delete", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let book = context.create_simple_book("Doomed", "Author").await;
        let other = context.create_simple_book("Survivor", "Author").await;

        OneShotBuilder::new(context.app(), route(&book.id().to_string()))
            .send_empty()
            .await
            .expect_redirect("/books");

        assert_eq!(None, context.get_book(*book.id()).await);
        assert_eq!(Some(other.clone()), context.get_book(*other.id()).await);
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;
        context.create_simple_book("Kept", "Author").await;

        OneShotBuilder::new(context.app(), route("2"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_html("<h1>Page Not Found</h1>")
            .await;

        assert_eq!(1, context.book_count().await);
    }

    #[tokio::test]
    async fn test_twice() {
        let context = TestContext::setup().await;
        let book = context.create_simple_book("Doomed", "Author").await;

        OneShotBuilder::new(context.app(), route(&book.id().to_string()))
            .send_empty()
            .await
            .expect_redirect("/books");
        OneShotBuilder::new(context.app(), route(&book.id().to_string()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_html("<h1>Page Not Found</h1>")
            .await;

        assert_eq!(0, context.book_count().await);
    }
}
