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

//! Page to browse all books at once without pagination.

use crate::driver::Driver;
use crate::rest::funnel::ErrorPage;
use crate::rest::views;
use axum::extract::State;
use axum::response::Html;

/// Page handler.
pub(crate) async fn handler(State(driver): State<Driver>) -> Result<Html<String>, ErrorPage> {
    let books = driver.list_all().await?;
    Ok(views::index_all(&books))
}
