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

//! Form submission to update a book.

use crate::driver::Driver;
use crate::model::BookDraft;
use crate::rest::funnel::ErrorPage;
use crate::rest::{parse_book_id, views};
use axum::Form;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use bookshelf_core::driver::DriverError;
use bookshelf_core::rest::RestError;
use log::info;

/// Page handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    form: Result<Form<BookDraft>, FormRejection>,
) -> Result<Response, ErrorPage> {
    let id = parse_book_id(&id)?;
    let Form(draft) = form.map_err(|e| RestError::InvalidRequest(e.body_text()))?;

    match driver.update_book(id, &draft).await {
        Ok(_) => {
            info!("Updated book {}", id);
            Ok(Redirect::to("/books").into_response())
        }
        Err(DriverError::Validation(errors)) => {
            Ok(views::update_book(id, &draft, Some(&errors)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use bookshelf_core::rest::testutils::*;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::POST, format!("/books/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let book = context.create_simple_book("Old title", "Old author").await;
        let other = context.create_simple_book("Untouched", "Someone").await;

        OneShotBuilder::new(context.app(), route(&book.id().to_string()))
            .send_form([
                ("title", "New title"),
                ("author", " New author "),
                ("genre", "Essay"),
                ("year", "2004"),
            ])
            .await
            .expect_redirect("/books");

        let exp_fields = BookFields::new(
            "New title",
            "New author",
            Some("Essay".to_owned()),
            Some(Year::from_i32(2004).unwrap()),
        )
        .unwrap();
        assert_eq!(Some(Book::new(*book.id(), exp_fields)), context.get_book(*book.id()).await);
        assert_eq!(Some(other.clone()), context.get_book(*other.id()).await);
    }

    #[tokio::test]
    async fn test_clear_optional_fields() {
        let context = TestContext::setup().await;
        let book = context
            .create_book(
                BookFields::new(
                    "Title",
                    "Author",
                    Some("Genre".to_owned()),
                    Some(Year::from_i32(1900).unwrap()),
                )
                .unwrap(),
            )
            .await;

        OneShotBuilder::new(context.app(), route(&book.id().to_string()))
            .send_form([("title", "Title"), ("author", "Author"), ("genre", " "), ("year", "")])
            .await
            .expect_redirect("/books");

        let stored = context.get_book(*book.id()).await.unwrap();
        assert_eq!(&None, stored.fields().genre());
        assert_eq!(&None, stored.fields().year());
    }

    #[tokio::test]
    async fn test_validation_errors_keep_input() {
        let context = TestContext::setup().await;
        let book = context.create_simple_book("Old title", "Old author").await;

        let body = OneShotBuilder::new(context.app(), route(&book.id().to_string()))
            .send_form([("title", "New <title>"), ("author", ""), ("year", "19.5")])
            .await
            .expect_html("<h1>Update Book</h1>")
            .await;
        assert!(body.contains(&format!("action=\"/books/{}\"", book.id())));
        assert!(body.contains("<li data-field=\"author\">"));
        assert!(body.contains("<li data-field=\"year\">"));
        assert!(!body.contains("<li data-field=\"title\">"));
        assert!(body.contains("value=\"New &lt;title&gt;\""));
        assert!(body.contains("value=\"19.5\""));

        assert_eq!(Some(book.clone()), context.get_book(*book.id()).await);
    }

    /// Submitting the edit form of a missing book is a 404 like the other `/books/:id` routes.
    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("7"))
            .send_form([("title", "T"), ("author", "A")])
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_html("<h1>Page Not Found</h1>")
            .await;

        assert_eq!(0, context.book_count().await);
    }

    #[tokio::test]
    async fn test_missing_with_invalid_input() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("7"))
            .send_form([("title", ""), ("author", "")])
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_html("<h1>Page Not Found</h1>")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("abc"))
            .send_form([("title", "T"), ("author", "A")])
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_html("<h1>Page Not Found</h1>")
            .await;

        assert_eq!(0, context.book_count().await);
    }
}
