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

//! Implementation of the database abstraction using PostgreSQL.

use crate::model::*;
use bookshelf_core::db::postgres::{PostgresExecutor, map_sqlx_error, run_schema};
use bookshelf_core::db::{DbError, DbResult};
use futures::TryStreamExt;
use sqlx::Row;
use sqlx::postgres::PgRow;

/// Schema to use to initialize the database.
const SCHEMA: &str = include_str!("postgres.sql");

/// Condition that matches the search pattern bound to `$1` against any of the searchable columns.
const SEARCH_CONDITION: &str = "
    title ILIKE $1 ESCAPE '\\'
    OR author ILIKE $1 ESCAPE '\\'
    OR genre ILIKE $1 ESCAPE '\\'
    OR CAST(year AS TEXT) ILIKE $1 ESCAPE '\\'
";

impl TryFrom<PgRow> for Book {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(map_sqlx_error)?;
        let genre: Option<String> = row.try_get("genre").map_err(map_sqlx_error)?;
        let year: Option<i32> = row.try_get("year").map_err(map_sqlx_error)?;

        let year = year.map(Year::from_i32).transpose()?;
        Ok(Book::new(BookId::new(id)?, BookFields::new(title, author, genre, year)?))
    }
}

pub(super) async fn init_schema(ex: &mut PostgresExecutor) -> DbResult<()> {
    run_schema(ex, SCHEMA).await
}

pub(super) async fn create_book(
    ex: &mut PostgresExecutor,
    fields: &BookFields,
) -> DbResult<BookId> {
    let query_str = "
        INSERT INTO books (title, author, genre, year)
        VALUES ($1, $2, $3, $4)
        RETURNING id
    ";
    let id: i64 = sqlx::query_scalar(query_str)
        .bind(fields.title().as_str())
        .bind(fields.author().as_str())
        .bind(fields.genre().as_deref())
        .bind(fields.year().map(Year::as_i32))
        .fetch_one(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    Ok(BookId::new(id)?)
}

pub(super) async fn get_book(ex: &mut PostgresExecutor, id: BookId) -> DbResult<Option<Book>> {
    let query_str = "SELECT id, title, author, genre, year FROM books WHERE id = $1";
    let maybe_row = sqlx::query(query_str)
        .bind(id.as_i64())
        .fetch_optional(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    maybe_row.map(Book::try_from).transpose()
}

pub(super) async fn list_books(ex: &mut PostgresExecutor) -> DbResult<Vec<Book>> {
    let query_str = "SELECT id, title, author, genre, year FROM books ORDER BY title, id";
    let mut rows = sqlx::query(query_str).fetch(ex.conn());

    let mut books = vec![];
    while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
        books.push(Book::try_from(row)?);
    }
    Ok(books)
}

pub(super) async fn count_books(
    ex: &mut PostgresExecutor,
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
            sqlx::query_scalar(&query_str)
                .bind(term.like_pattern())
                .fetch_one(ex.conn())
                .await
        }
    }
    .map_err(map_sqlx_error)?;
    u64::try_from(count).map_err(|e| DbError::DataIntegrityError(e.to_string()))
}

pub(super) async fn get_books_page(
    ex: &mut PostgresExecutor,
    filter: Option<&SearchTerm>,
    offset: i64,
    limit: i64,
) -> DbResult<Vec<Book>> {
    let rows = match filter {
        None => {
            let query_str = "
                SELECT id, title, author, genre, year FROM books
                ORDER BY title, id
                LIMIT $1 OFFSET $2
            ";
            sqlx::query(query_str).bind(limit).bind(offset).fetch_all(ex.conn()).await
        }
        Some(term) => {
            let query_str = format!(
                "
                SELECT id, title, author, genre, year FROM books
                WHERE {}
                ORDER BY title, id
                LIMIT $2 OFFSET $3
                ",
                SEARCH_CONDITION
            );
            sqlx::query(&query_str)
                .bind(term.like_pattern())
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
    ex: &mut PostgresExecutor,
    id: BookId,
    fields: &BookFields,
) -> DbResult<()> {
    let query_str = "UPDATE books SET title = $1, author = $2, genre = $3, year = $4 WHERE id = $5";
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

pub(super) async fn delete_book(ex: &mut PostgresExecutor, id: BookId) -> DbResult<()> {
    let query_str = "DELETE FROM books WHERE id = $1";
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
