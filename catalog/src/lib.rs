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

//! Web application to manage the catalog of a small library.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use bookshelf_core::db::Db;
use bookshelf_core::db::postgres::PostgresDb;
use log::{info, warn};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

pub mod config;
use config::DatabaseOptions;
mod db;
mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;
use rest::app;

/// Opens the database described by `opts` and prepares its schema.
pub async fn connect(opts: DatabaseOptions) -> Result<Arc<dyn Db + Send + Sync>, String> {
    let db: Arc<dyn Db + Send + Sync> = match opts {
        DatabaseOptions::Postgres(opts) => {
            info!("Using PostgreSQL database {} at {}:{}", opts.database, opts.host, opts.port);
            Arc::new(PostgresDb::connect(opts).map_err(|e| e.to_string())?)
        }
        DatabaseOptions::Sqlite(path) => {
            info!("Using SQLite database {}", path);
            Arc::new(bookshelf_core::db::sqlite::connect(&path).await.map_err(|e| e.to_string())?)
        }
    };

    let result = match db.ex().await {
        Ok(mut ex) => db::init_schema(&mut ex).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        db.close().await;
        return Err(format!("Failed to initialize database schema: {}", e));
    }
    Ok(db)
}

/// Waits until the process is asked to terminate.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for the termination signal: {}", e);
    }
    info!("Shutting down");
}

/// Serves the application on `bind_addr` backed by `db` until the process is interrupted.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let driver = Driver::new(db.clone());
    let app = app(driver);

    let bind_addr = bind_addr.into();
    let result = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(listener) => {
            info!("Listening on {}", bind_addr);
            axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await
        }
        Err(e) => Err(e),
    };

    db.close().await;
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_sqlite_initializes_schema() {
        let db = connect(DatabaseOptions::Sqlite(":memory:".to_owned())).await.unwrap();
        assert_eq!(0, db::count_books(&mut db.ex().await.unwrap(), None).await.unwrap());
        db.close().await;
    }
}
