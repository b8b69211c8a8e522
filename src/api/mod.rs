//! HTTP surface of the service.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | POST | `/authors` | 201 + author |
//! | GET | `/authors/:id` | 200 + author |
//! | PUT | `/authors/:id` | 200 + author |
//! | PATCH | `/authors/:id` | 200 + author |
//! | DELETE | `/authors/:id` | 200, empty body |
//! | GET | `/authors` | 200 + authors, 404 when there are none |

pub mod authors;
mod error;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub use error::{Error, ErrorBody};

use crate::traits::AuthorStore;

/// State shared by every handler.
#[derive(Clone)]
pub struct Service {
    queries: Arc<dyn AuthorStore>,
}

impl Service {
    pub fn new(queries: Arc<dyn AuthorStore>) -> Self {
        Self { queries }
    }

    pub fn register_handlers(self) -> Router {
        Router::new()
            .route("/authors", get(authors::list).post(authors::create))
            .route(
                "/authors/:id",
                get(authors::get)
                    .put(authors::full_update)
                    .patch(authors::partial_update)
                    .delete(authors::delete),
            )
            .with_state(self)
    }
}

/// The complete application: routes plus request logging and panic recovery.
pub fn router(queries: Arc<dyn AuthorStore>) -> Router {
    Service::new(queries)
        .register_handlers()
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}
