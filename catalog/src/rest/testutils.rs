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

//! Test utilities for the web interface.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use bookshelf_core::db::Db;
use std::sync::Arc;

pub(crate) struct TestContext {
    db: Arc<dyn Db + Send + Sync>,
    app: Router,
}

impl TestContext {
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(bookshelf_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        let app = app(driver);
        Self { db, app }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    pub(crate) async fn create_book(&self, fields: BookFields) -> Book {
        let id = db::create_book(&mut self.db.ex().await.unwrap(), &fields).await.unwrap();
        Book::new(id, fields)
    }

    pub(crate) async fn create_simple_book(&self, title: &str, author: &str) -> Book {
        self.create_book(BookFields::new(title, author, None, None).unwrap()).await
    }

    pub(crate) async fn book_count(&self) -> u64 {
        db::count_books(&mut self.db.ex().await.unwrap(), None).await.unwrap()
    }

    pub(crate) async fn get_book(&self, id: BookId) -> Option<Book> {
        db::get_book(&mut self.db.ex().await.unwrap(), id).await.unwrap()
    }
}
