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

//! Operations on one book.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use bookshelf_core::db::DbError;
use bookshelf_core::driver::{DriverError, DriverResult};

/// Builds the error returned when the book `id` does not exist.
fn not_found(id: BookId) -> DriverError {
    DriverError::NotFound(format!("Book {} not found", id))
}

impl Driver {
    /// Gets the book identified by `id`, if it exists.
    pub(crate) async fn find_book(self, id: BookId) -> DriverResult<Option<Book>> {
        let book = db::get_book(&mut self.db.ex().await?, id).await?;
        Ok(book)
    }

    /// Validates `draft` and, if valid, stores it as a new book.
    pub(crate) async fn create_book(self, draft: &BookDraft) -> DriverResult<Book> {
        let fields = draft.validate()?;
        let id = db::create_book(&mut self.db.ex().await?, &fields).await?;
        Ok(Book::new(id, fields))
    }

    /// Validates `draft` and, if valid, replaces the contents of the book identified by `id`.
    ///
    /// A missing book takes precedence over an invalid draft.
    pub(crate) async fn update_book(self, id: BookId, draft: &BookDraft) -> DriverResult<Book> {
        let mut tx = self.db.begin().await?;
        if db::get_book(tx.ex(), id).await?.is_none() {
            return Err(not_found(id));
        }
        let fields = draft.validate()?;
        db::update_book(tx.ex(), id, &fields).await?;
        tx.commit().await?;
        Ok(Book::new(id, fields))
    }

    /// Permanently deletes the book identified by `id`.
    pub(crate) async fn delete_book(self, id: BookId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        match db::delete_book(tx.ex(), id).await {
            Ok(()) => (),
            Err(DbError::NotFound) => return Err(not_found(id)),
            Err(e) => return Err(e.into()),
        }
        tx.commit().await?;
        Ok(())
    }
}
