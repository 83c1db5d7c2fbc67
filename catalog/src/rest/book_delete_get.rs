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

//! Page to confirm the deletion of a book.

use crate::driver::Driver;
use crate::rest::funnel::ErrorPage;
use crate::rest::{parse_book_id, views};
use axum::extract::{Path, State};
use axum::response::Html;
use bookshelf_core::rest::RestError;

/// Page handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
) -> Result<Html<String>, ErrorPage> {
    let id = parse_book_id(&id)?;
    match driver.find_book(id).await? {
        Some(book) => Ok(views::delete_book(&book)),
        None => Err(RestError::NotFound(format!("Book {} not found", id)).into()),
    }
}
