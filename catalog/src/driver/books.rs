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

//! Operations on the collection of books.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use bookshelf_core::driver::DriverResult;

impl Driver {
    /// Gets all books sorted by title.
    pub(crate) async fn list_all(self) -> DriverResult<Vec<Book>> {
        let books = db::list_books(&mut self.db.ex().await?).await?;
        Ok(books)
    }

    /// Gets one `page` of the listing of all books sorted by title.
    pub(crate) async fn find_page(self, page: PageRequest) -> DriverResult<BookPage> {
        self.get_page(None, page).await
    }

    /// Gets one `page` of the listing of books that match `term` sorted by title.
    pub(crate) async fn search_page(
        self,
        term: &SearchTerm,
        page: PageRequest,
    ) -> DriverResult<BookPage> {
        self.get_page(Some(term), page).await
    }

    /// Gets one `page` of the listing of books that match the optional `filter`.
    ///
    /// The count and the page are queried in the same transaction so that they are consistent
    /// with each other.
    async fn get_page(
        self,
        filter: Option<&SearchTerm>,
        page: PageRequest,
    ) -> DriverResult<BookPage> {
        let mut tx = self.db.begin().await?;
        let total = db::count_books(tx.ex(), filter).await?;
        let books = db::get_books_page(tx.ex(), filter, page.offset(), page.limit()).await?;
        tx.commit().await?;
        Ok(BookPage::new(total, books))
    }
}
