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

//! High-level data types.

use bookshelf_core::model::{FieldErrors, ModelError, ModelResult};
use derive_getters::Getters;
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Number of books shown in every page of a listing.
pub(crate) const PAGE_SIZE: u32 = 5;

/// Identifier of a book, as assigned by the database at creation time.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct BookId(i64);

impl BookId {
    /// Creates a book identifier from a raw database value.
    pub(crate) fn new(id: i64) -> ModelResult<Self> {
        if id < 1 {
            return Err(ModelError(format!("Book id must be positive but got {}", id)));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as an `i64` for database binding.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

impl FromStr for BookId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(id) => BookId::new(id),
            Err(e) => Err(ModelError(format!("Invalid book id '{}': {}", s, e))),
        }
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Publication year of a book.  Years are limited to four digits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Year(u16);

impl Year {
    /// Largest year that can be represented.
    const MAX: u16 = 9999;

    /// Creates a year from an `i32` with range validation.
    pub(crate) fn from_i32(year: i32) -> ModelResult<Self> {
        match u16::try_from(year) {
            Ok(year) if year <= Self::MAX => Ok(Self(year)),
            _ => Err(ModelError(format!("Year {} cannot be represented", year))),
        }
    }

    /// Returns the year as an `i32` for database binding.
    pub(crate) fn as_i32(self) -> i32 {
        i32::from(self.0)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The validated contents of a book, without its identifier.
///
/// Values of this type always have a non-empty title and author, so holding one is proof that the
/// book can be persisted.
#[derive(Clone, Debug, Eq, Getters, PartialEq)]
pub(crate) struct BookFields {
    /// Title of the book.
    title: String,

    /// Author of the book.
    author: String,

    /// Genre of the book, if known.
    genre: Option<String>,

    /// Publication year of the book, if known.
    year: Option<Year>,
}

impl BookFields {
    /// Creates a new set of book fields, ensuring that the required ones are present.
    pub(crate) fn new<T: Into<String>, A: Into<String>>(
        title: T,
        author: A,
        genre: Option<String>,
        year: Option<Year>,
    ) -> ModelResult<Self> {
        let title = title.into();
        let author = author.into();
        if title.trim().is_empty() {
            return Err(ModelError("Book title cannot be empty".to_owned()));
        }
        if author.trim().is_empty() {
            return Err(ModelError("Book author cannot be empty".to_owned()));
        }
        Ok(Self { title, author, genre, year })
    }
}

/// A book stored in the catalog.
#[derive(Clone, Debug, Eq, Getters, PartialEq)]
pub(crate) struct Book {
    /// Identifier of the book.
    id: BookId,

    /// Contents of the book.
    fields: BookFields,
}

impl Book {
    /// Creates a new book from its parts.
    pub(crate) fn new(id: BookId, fields: BookFields) -> Self {
        Self { id, fields }
    }
}

/// Raw contents of a book form as submitted by the user.
///
/// Drafts hold whatever the user typed so that a rejected form can be shown again with the same
/// values.  Fields missing from the submission are treated as empty.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[cfg_attr(test, derive(Serialize))]
#[serde(default)]
pub(crate) struct BookDraft {
    /// Title as typed by the user.
    pub(crate) title: String,

    /// Author as typed by the user.
    pub(crate) author: String,

    /// Genre as typed by the user.
    pub(crate) genre: String,

    /// Year as typed by the user.
    pub(crate) year: String,
}

impl BookDraft {
    /// Checks the draft and converts it to a set of book fields.
    ///
    /// Every invalid field is reported, not just the first one, so that the form can flag all of
    /// them at once.
    pub(crate) fn validate(&self) -> Result<BookFields, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("title", "Please provide a value for \"Title\"");
        }

        let author = self.author.trim();
        if author.is_empty() {
            errors.push("author", "Please provide a value for \"Author\"");
        }

        let genre = self.genre.trim();
        let genre = if genre.is_empty() { None } else { Some(genre.to_owned()) };

        let year = match parse_year(&self.year) {
            Ok(year) => year,
            Err(e) => {
                errors.push("year", e);
                None
            }
        };

        errors.into_result(BookFields {
            title: title.to_owned(),
            author: author.to_owned(),
            genre,
            year,
        })
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        let fields = book.fields();
        Self {
            title: fields.title().clone(),
            author: fields.author().clone(),
            genre: fields.genre().clone().unwrap_or_default(),
            year: fields.year().map(|y| y.to_string()).unwrap_or_default(),
        }
    }
}

/// Parses a year as typed in a form, where an empty value means that the year is unknown.
fn parse_year(raw: &str) -> Result<Option<Year>, &'static str> {
    const MESSAGE: &str = "\"Year\" must be a number of up to four digits";

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if raw.len() > 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MESSAGE);
    }
    match raw.parse::<i32>() {
        Ok(year) => Year::from_i32(year).map(Some).map_err(|_| MESSAGE),
        Err(_) => Err(MESSAGE),
    }
}

/// A 1-based page number in a listing of books.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PageRequest(u32);

impl PageRequest {
    /// Interprets the `page` query parameter.  Anything that is not a positive number selects the
    /// first page.
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|page| *page >= 1)
            .map(PageRequest)
            .unwrap_or(PageRequest(1))
    }

    /// Returns the page number.
    pub(crate) fn number(self) -> u32 {
        self.0
    }

    /// Returns the number of rows to skip to reach this page.
    pub(crate) fn offset(self) -> i64 {
        (i64::from(self.0) - 1) * i64::from(PAGE_SIZE)
    }

    /// Returns the maximum number of rows in this page.
    pub(crate) fn limit(self) -> i64 {
        i64::from(PAGE_SIZE)
    }
}

/// Computes how many pages are needed to show `total` books.
pub(crate) fn num_pages(total: u64) -> u64 {
    total.div_ceil(u64::from(PAGE_SIZE))
}

/// A non-empty search term to match against the title, author, genre and year of books.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SearchTerm(String);

impl SearchTerm {
    /// Interprets the `searchValue` query parameter.  Blank values mean that there is no search.
    pub(crate) fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        if raw.is_empty() { None } else { Some(SearchTerm(raw.to_owned())) }
    }

    /// Returns the term as typed by the user, minus surrounding whitespace.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a `LIKE` pattern that matches the term anywhere in a value.
    ///
    /// The pattern keeps the casing of the term, so each backend folds it in the same way as it
    /// folds the columns.  The pattern uses `\` as its escape character so that wildcards in the
    /// term match literally.
    pub(crate) fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if matches!(ch, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

/// A slice of a listing of books along with the size of the whole listing.
#[derive(Debug, Getters)]
pub(crate) struct BookPage {
    /// Number of books in the whole listing.
    total: u64,

    /// Books in this page, sorted by title.
    books: Vec<Book>,
}

impl BookPage {
    /// Creates a new page.
    pub(crate) fn new(total: u64, books: Vec<Book>) -> Self {
        Self { total, books }
    }

    /// Returns the number of pages needed to show the whole listing.
    pub(crate) fn num_pages(&self) -> u64 {
        num_pages(self.total)
    }
}
