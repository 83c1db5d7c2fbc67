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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use bookshelf_core::db::{Db, Executor};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver, for direct access to the persisted state.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver against a fresh in-memory database.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(bookshelf_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Returns a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns a copy of the driver under test.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Stores a book with the given required properties and returns it.
    pub(crate) async fn create_book(&self, title: &str, author: &str) -> Book {
        let fields = BookFields::new(title, author, None, None).unwrap();
        let id = db::create_book(&mut self.ex().await, &fields).await.unwrap();
        Book::new(id, fields)
    }

    /// Counts all stored books.
    pub(crate) async fn book_count(&self) -> u64 {
        db::count_books(&mut self.ex().await, None).await.unwrap()
    }
}

/// Shorthand to create a draft from its raw fields.
pub(crate) fn draft(title: &str, author: &str, genre: &str, year: &str) -> BookDraft {
    BookDraft {
        title: title.to_owned(),
        author: author.to_owned(),
        genre: genre.to_owned(),
        year: year.to_owned(),
    }
}
