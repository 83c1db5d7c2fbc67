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

//! Form submission to create a book.

use crate::driver::Driver;
use crate::model::BookDraft;
use crate::rest::funnel::ErrorPage;
use crate::rest::views;
use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::{IntoResponse, Redirect, Response};
use bookshelf_core::driver::DriverError;
use bookshelf_core::rest::RestError;
use log::info;

/// Page handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    form: Result<Form<BookDraft>, FormRejection>,
) -> Result<Response, ErrorPage> {
    let Form(draft) = form.map_err(|e| RestError::InvalidRequest(e.body_text()))?;

    match driver.create_book(&draft).await {
        Ok(book) => {
            info!("Created book {}", book.id());
            Ok(Redirect::to("/books").into_response())
        }
        Err(DriverError::Validation(errors)) => {
            Ok(views::new_book(&draft, Some(&errors)).into_response())
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

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/books/new".to_owned())
    }

    fn draft(title: &str, author: &str, genre: &str, year: &str) -> BookDraft {
        BookDraft {
            title: title.to_owned(),
            author: author.to_owned(),
            genre: genre.to_owned(),
            year: year.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_form(draft("  Dune ", "Frank Herbert", "", "1965"))
            .await
            .expect_redirect("/books");

        assert_eq!(1, context.book_count().await);
        let book = context.get_book(BookId::new(1).unwrap()).await.unwrap();
        let exp_fields =
            BookFields::new("Dune", "Frank Herbert", None, Some(Year::from_i32(1965).unwrap()))
                .unwrap();
        assert_eq!(&exp_fields, book.fields());
    }

    #[tokio::test]
    async fn test_missing_fields_default_to_empty() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_form([("title", "Only title"), ("author", "Someone")])
            .await
            .expect_redirect("/books");

        let book = context.get_book(BookId::new(1).unwrap()).await.unwrap();
        assert_eq!(&None, book.fields().genre());
        assert_eq!(&None, book.fields().year());
    }

    #[tokio::test]
    async fn test_validation_errors_keep_input() {
        let context = TestContext::setup().await;

        let body = OneShotBuilder::new(context.app(), route())
            .send_form(draft("", " ", "Horror & <Gore>", "12345"))
            .await
            .expect_html("<h1>New Book</h1>")
            .await;
        assert!(body.contains("Oops!"));
        assert!(body.contains(
            "<li data-field=\"title\">Please provide a value for &quot;Title&quot;</li>"
        ));
        assert!(body.contains(
            "<li data-field=\"author\">Please provide a value for &quot;Author&quot;</li>"
        ));
        assert!(body.contains("<li data-field=\"year\">"));
        assert!(body.contains("value=\"Horror &amp; &lt;Gore&gt;\""));
        assert!(body.contains("value=\"12345\""));

        assert_eq!(0, context.book_count().await);
    }

    #[tokio::test]
    async fn test_bad_form_encoding() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_text("title=foo")
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_html("<h1>Bad Request</h1>")
            .await;

        assert_eq!(0, context.book_count().await);
    }
}
