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

//! Terminal error handling for all pages.
//!
//! Failed requests end up here in one of three ways: the request did not match any route, a
//! handler returned an error, or a handler panicked.  All of them yield exactly one rendered
//! error page.

use crate::rest::views;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use bookshelf_core::driver::DriverError;
use bookshelf_core::rest::RestError;
use log::{error, info, warn};
use std::any::Any;

/// Message shown to the user when a page does not exist.
pub(crate) const NOT_FOUND_MESSAGE: &str =
    "Oops! It looks like the page you're looking for does not exist.";

/// Message shown to the user when the server fails unexpectedly.
pub(crate) const SERVER_ERROR_MESSAGE: &str =
    "Oops! It looks like something went wrong on the server.";

/// A failed request that renders as an HTML error page.
#[derive(Debug)]
pub(crate) struct ErrorPage(RestError);

impl From<RestError> for ErrorPage {
    fn from(e: RestError) -> Self {
        Self(e)
    }
}

impl From<DriverError> for ErrorPage {
    fn from(e: DriverError) -> Self {
        Self(RestError::from(e))
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let status = self.0.status();
        match self.0 {
            RestError::NotFound(detail) => {
                info!("Not found: {}", detail);
                (status, views::not_found(NOT_FOUND_MESSAGE)).into_response()
            }
            RestError::InvalidRequest(detail) => {
                warn!("Invalid request: {}", detail);
                (status, views::error("Bad Request", &detail)).into_response()
            }
            RestError::InternalError(detail) => {
                error!("Internal error: {}", detail);
                (status, views::error("Server Error", SERVER_ERROR_MESSAGE)).into_response()
            }
        }
    }
}

/// Handler for requests that do not match any route.
pub(crate) async fn not_found(uri: Uri) -> ErrorPage {
    ErrorPage(RestError::NotFound(format!("No route for {}", uri.path())))
}

/// Renders the response for a handler that panicked with `payload`.
pub(crate) fn panic_page(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "unknown panic payload".to_owned()
    };
    ErrorPage(RestError::InternalError(format!("Handler panicked: {}", detail))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::with_funnel;
    use axum::Router;
    use axum::http;
    use axum::routing::get;
    use bookshelf_core::db::DbError;
    use bookshelf_core::rest::testutils::*;

    /// Builds an app whose handlers fail in all possible ways.
    fn app() -> Router {
        async fn backend_error() -> Result<&'static str, ErrorPage> {
            Err(DriverError::from(DbError::BackendError("secret detail".to_owned())).into())
        }

        async fn missing() -> Result<&'static str, ErrorPage> {
            Err(DriverError::from(DbError::NotFound).into())
        }

        async fn invalid() -> Result<&'static str, ErrorPage> {
            Err(RestError::InvalidRequest("Bad <input>".to_owned()).into())
        }

        async fn boom() -> &'static str {
            panic!("secret panic");
        }

        with_funnel(
            Router::new()
                .route("/backend-error", get(backend_error))
                .route("/missing", get(missing))
                .route("/invalid", get(invalid))
                .route("/boom", get(boom)),
        )
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let body = OneShotBuilder::new(app(), (http::Method::GET, "/this/does/not/exist"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_html("<h1>Page Not Found</h1>")
            .await;
        assert!(body.contains(
            "Oops! It looks like the page you&#39;re looking for does not exist."
        ));
    }

    #[tokio::test]
    async fn test_not_found_error() {
        OneShotBuilder::new(app(), (http::Method::GET, "/missing"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_html("page you&#39;re looking for does not exist")
            .await;
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let body = OneShotBuilder::new(app(), (http::Method::GET, "/backend-error"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_html("Oops! It looks like something went wrong on the server.")
            .await;
        assert!(!body.contains("secret detail"));
    }

    #[tokio::test]
    async fn test_invalid_request() {
        OneShotBuilder::new(app(), (http::Method::GET, "/invalid"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_html("<h1>Bad Request</h1>(.|\n)*Bad &lt;input&gt;")
            .await;
    }

    #[tokio::test]
    async fn test_panic() {
        let body = OneShotBuilder::new(app(), (http::Method::GET, "/boom"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_html("<h1>Server Error</h1>")
            .await;
        assert!(body.contains(SERVER_ERROR_MESSAGE));
        assert!(!body.contains("secret panic"));
    }
}
