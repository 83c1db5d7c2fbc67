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

//! Implementation of the database abstraction using SQLite.

use crate::model::*;
use bookshelf_core::db::sqlite::{SqliteExecutor, map_sqlx_error, run_schema};
use bookshelf_core::db::{DbError, DbResult};
use futures::TryStreamExt;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Schema to use to initialize the database.
const SCHEMA: &str = include_str!("sqlite.sql");

/// Condition that matches a search pattern against any of the searchable columns.
///
/// The pattern has to be bound once per column.  SQLite's `LOWER` only folds ASCII letters, so the
/// pattern must be folded with `str::to_ascii_lowercase` to agree with the columns.
const SEARCH_CONDITION: &str = "
    LOWER(title) LIKE ? ESCAPE '\\'
    OR LOWER(author) LIKE ? ESCAPE '\\'
    OR LOWER(genre) LIKE ? ESCAPE '\\'
    OR CAST(year AS TEXT) LIKE ? ESCAPE '\\'
";

impl TryFrom<SqliteRow> for Book {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(map_sqlx_error)?;
        let genre: Option<String> = row.try_get("genre").map_err(map_sqlx_error)?;
        let year: Option<i32> = row.try_get("year").map_err(map_sqlx_error)?;

        let year = year.map(Year::from_i32).transpose()?;
        Ok(Book::new(BookId::new(id)?, BookFields::new(title, author, genre, year)?))
    }
}

pub(super) async fn init_schema(ex: &mut SqliteExecutor) -> DbResult<()> {
    run_schema(ex, SCHEMA).await
}

pub(super) async fn create_book(ex: &mut SqliteExecutor, fields: &BookFields) -> DbResult<BookId> {
    let query_str = "INSERT INTO books (title, author, genre, year) VALUES (?, ?, ?, ?)";
    let done = sqlx::query(query_str)
        .bind(fields.title().as_str())
        .bind(fields.author().as_str())
        .bind(fields.genre().as_deref())
        .bind(fields.year().map(Year::as_i32))
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    Ok(BookId::new(done.last_insert_rowid())?)
}

pub(super) async fn get_book(ex: &mut SqliteExecutor, id: BookId) -> DbResult<Option<Book>> {
    let query_str = "SELECT id, title, author, genre, year FROM books WHERE id = ?";
    let maybe_row = sqlx::query(query_str)
        .bind(id.as_i64())
        .fetch_optional(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    maybe_row.map(Book::try_from).transpose()
}

pub(super) async fn list_books(ex: &mut SqliteExecutor) -> DbResult<Vec<Book>> {
    let query_str = "SELECT id, title, author, genre, year FROM books ORDER BY title, id";
    let mut rows = sqlx::query(query_str).fetch(ex.conn());

    let mut books = vec![];
    while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
        books.push(Book::try_from(row)?);
    }
    Ok(books)
}

pub(super) async fn count_books(
    ex: &mut SqliteExecutor,
    filter: Option<&SearchTerm>,
) -> DbResult<u64> {
    let count: i64 = match filter {
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM books")
                .fetch_one(ex.conn())
                .await
        }
        Some(term) => {
            let query_str = format!("SELECT COUNT(*) FROM books WHERE {}", SEARCH_CONDITION);
            let pattern = term.like_pattern().to_ascii_lowercase();
            sqlx::query_scalar(&query_str)
                .bind(pattern.as_str())
                .bind(pattern.as_str())
                .bind(pattern.as_str())
                .bind(pattern.as_str())
                .fetch_one(ex.conn())
                .await
        }
    }
    .map_err(map_sqlx_error)?;
    u64::try_from(count).map_err(|e| DbError::DataIntegrityError(e.to_string()))
}

pub(super) async fn get_books_page(
    ex: &mut SqliteExecutor,
    filter: Option<&SearchTerm>,
    offset: i64,
    limit: i64,
) -> DbResult<Vec<Book>> {
    let rows = match filter {
        None => {
            let query_str = "
                SELECT id, title, author, genre, year FROM books
                ORDER BY title, id
                LIMIT ? OFFSET ?
            ";
            sqlx::query(query_str).bind(limit).bind(offset).fetch_all(ex.conn()).await
        }
        Some(term) => {
            let query_str = format!(
                "
                SELECT id, title, author, genre, year FROM books
                WHERE {}
                ORDER BY title, id
                LIMIT ? OFFSET ?
                ",
                SEARCH_CONDITION
            );
            let pattern = term.like_pattern().to_ascii_lowercase();
            sqlx::query(&query_str)
                .bind(pattern.as_str())
                .bind(pattern.as_str())
                .bind(pattern.as_str())
                .bind(pattern.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(ex.conn())
                .await
        }
    }
    .map_err(map_sqlx_error)?;
    rows.into_iter().map(Book::try_from).collect()
}

pub(super) async fn update_book(
    ex: &mut SqliteExecutor,
    id: BookId,
    fields: &BookFields,
) -> DbResult<()> {
    let query_str = "UPDATE books SET title = ?, author = ?, genre = ?, year = ? WHERE id = ?";
    let done = sqlx::query(query_str)
        .bind(fields.title().as_str())
        .bind(fields.author().as_str())
        .bind(fields.genre().as_deref())
        .bind(fields.year().map(Year::as_i32))
        .bind(id.as_i64())
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    if done.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

pub(super) async fn delete_book(ex: &mut SqliteExecutor, id: BookId) -> DbResult<()> {
    let query_str = "DELETE FROM books WHERE id = ?";
    let done = sqlx::query(query_str)
        .bind(id.as_i64())
        .execute(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    if done.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
