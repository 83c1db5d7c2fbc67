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

//! Runtime configuration of the server.

use bookshelf_core::db::postgres::PostgresOptions;
use bookshelf_core::env::get_optional_var;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Prefix of the variables that configure the connection to the production PostgreSQL database.
const PGSQL_PREFIX: &str = "PGSQL_PROD";

/// Default port to listen on.
const DEFAULT_PORT: u16 = 3000;

/// Default path to the SQLite database.
const DEFAULT_SQLITE_PATH: &str = "bookshelf.db";

/// Options to connect to the database that backs the catalog.
#[derive(Debug)]
pub enum DatabaseOptions {
    /// Connect to a PostgreSQL server.
    Postgres(PostgresOptions),

    /// Open a SQLite database file, creating it if it does not exist.
    Sqlite(String),
}

/// Options to start the server.
#[derive(Debug)]
pub struct ServerOptions {
    /// Address to bind the server to.
    pub bind_address: IpAddr,

    /// Port to listen on.
    pub port: u16,

    /// Database to use for persistence.
    pub database: DatabaseOptions,
}

impl ServerOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_BIND_ADDRESS`, `<prefix>_PORT`,
    /// `<prefix>_DATABASE` and `<prefix>_SQLITE_PATH`.  PostgreSQL connection details come from
    /// the `PGSQL_PROD_*` variables.
    pub fn from_env(prefix: &str) -> Result<ServerOptions, String> {
        let database = match get_optional_var::<String>(prefix, "DATABASE")?.as_deref() {
            None | Some("postgres") => {
                DatabaseOptions::Postgres(PostgresOptions::from_env(PGSQL_PREFIX)?)
            }
            Some("sqlite") => DatabaseOptions::Sqlite(
                get_optional_var::<String>(prefix, "SQLITE_PATH")?
                    .unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_owned()),
            ),
            Some(other) => {
                return Err(format!(
                    "Invalid value in environment variable {}_DATABASE: unknown database {}",
                    prefix, other
                ));
            }
        };

        Ok(ServerOptions {
            bind_address: get_optional_var::<IpAddr>(prefix, "BIND_ADDRESS")?
                .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT),
            database,
        })
    }

    /// Returns the socket address to listen on.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}
