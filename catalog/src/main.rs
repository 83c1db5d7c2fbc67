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

//! Entry point to the catalog server.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use bookshelf_catalog::config::ServerOptions;
use bookshelf_catalog::{connect, serve};
use std::process::ExitCode;

/// Gathers the configuration, connects to the database and runs the server.
async fn run() -> Result<(), String> {
    let opts = ServerOptions::from_env("CATALOG")?;
    let bind_addr = opts.bind_addr();
    let db = connect(opts.database).await?;
    serve(bind_addr, db).await.map_err(|e| format!("Server failed: {}", e))
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("catalog: {}", e);
            ExitCode::FAILURE
        }
    }
}
