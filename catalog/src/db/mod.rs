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

//! Database abstraction in terms of the operations needed by the catalog.
//!
//! Every operation dispatches to the backend-specific implementation based on the kind of
//! executor it receives.  Operations that return a slice of the listing take an optional
//! `SearchTerm` to restrict the rows to those that match it.

use crate::model::*;
use bookshelf_core::db::{DbResult, Executor};

mod postgres;
mod sqlite;

/// Creates the database schema if it does not exist yet.
pub(crate) async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::init_schema(ex).await,
        Executor::Sqlite(ex) => sqlite::init_schema(ex).await,
    }
}

/// Stores a new book with the given `fields` and returns its newly-assigned identifier.
pub(crate) async fn create_book(ex: &mut Executor, fields: &BookFields) -> DbResult<BookId> {
    match ex {
        Executor::Postgres(ex) => postgres::create_book(ex, fields).await,
        Executor::Sqlite(ex) => sqlite::create_book(ex, fields).await,
    }
}

/// Gets the book identified by `id`, if it exists.
pub(crate) async fn get_book(ex: &mut Executor, id: BookId) -> DbResult<Option<Book>> {
    match ex {
        Executor::Postgres(ex) => postgres::get_book(ex, id).await,
        Executor::Sqlite(ex) => sqlite::get_book(ex, id).await,
    }
}

/// Gets all books sorted by title.
pub(crate) async fn list_books(ex: &mut Executor) -> DbResult<Vec<Book>> {
    match ex {
        Executor::Postgres(ex) => postgres::list_books(ex).await,
        Executor::Sqlite(ex) => sqlite::list_books(ex).await,
    }
}

/// Counts all books that match `filter`, or all books if there is no filter.
pub(crate) async fn count_books(ex: &mut Executor, filter: Option<&SearchTerm>) -> DbResult<u64> {
    match ex {
        Executor::Postgres(ex) => postgres::count_books(ex, filter).await,
        Executor::Sqlite(ex) => sqlite::count_books(ex, filter).await,
    }
}

/// Gets up to `limit` books that match `filter` sorted by title, skipping the first `offset`.
pub(crate) async fn get_books_page(
    ex: &mut Executor,
    filter: Option<&SearchTerm>,
    offset: i64,
    limit: i64,
) -> DbResult<Vec<Book>> {
    match ex {
        Executor::Postgres(ex) => postgres::get_books_page(ex, filter, offset, limit).await,
        Executor::Sqlite(ex) => sqlite::get_books_page(ex, filter, offset, limit).await,
    }
}

/// Replaces the contents of the book identified by `id` with `fields`.
pub(crate) async fn update_book(
    ex: &mut Executor,
    id: BookId,
    fields: &BookFields,
) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::update_book(ex, id, fields).await,
        Executor::Sqlite(ex) => sqlite::update_book(ex, id, fields).await,
    }
}

/// Deletes the book identified by `id`.
pub(crate) async fn delete_book(ex: &mut Executor, id: BookId) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::delete_book(ex, id).await,
        Executor::Sqlite(ex) => sqlite::delete_book(ex, id).await,
    }
}
