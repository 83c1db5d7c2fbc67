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

//! Page with the form to create a book.

use crate::model::BookDraft;
use crate::rest::views;
use axum::response::Html;

/// Page handler.
pub(crate) async fn handler() -> Html<String> {
    views::new_book(&BookDraft::default(), None)
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;
    use bookshelf_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/books/new".to_owned())
    }

    #[tokio::test]
    async fn test_empty_form() {
        let context = TestContext::setup().await;

        let body = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_html("<h1>New Book</h1>")
            .await;
        assert!(body.contains("action=\"/books/new\""));
        assert!(body.contains("name=\"title\" type=\"text\" id=\"title\" value=\"\""));
        assert!(!body.contains("Oops!"));
    }
}
