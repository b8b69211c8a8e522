#![allow(dead_code)]

use std::{collections::BTreeMap, sync::Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use microservice::{
    database::{Error, Result},
    traits::AuthorStore,
    types::author::{Author, CreateAuthorParams, PartialUpdateAuthorParams, UpdateAuthorParams},
};

/// In-process stand-in for the postgres queries.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    rows:    BTreeMap<i64, Author>,
}

impl MemoryStore {
    pub fn rows(&self) -> Vec<Author> {
        self.state.lock().unwrap().rows.values().cloned().collect()
    }
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn create_author(&self, params: CreateAuthorParams) -> Result<Author> {
        let mut state = self.state.lock().unwrap();
        state.last_id += 1;
        let author = Author {
            id:   state.last_id,
            name: params.name,
            bio:  params.bio,
        };
        state.rows.insert(author.id, author.clone());
        Ok(author)
    }

    async fn get_author(&self, id: i64) -> Result<Author> {
        let state = self.state.lock().unwrap();
        state.rows.get(&id).cloned().ok_or(Error::NotFound)
    }

    async fn update_author(&self, params: UpdateAuthorParams) -> Result<Author> {
        let mut state = self.state.lock().unwrap();
        let row = state.rows.get_mut(&params.id).ok_or(Error::NotFound)?;
        row.name = params.name;
        row.bio = params.bio;
        Ok(row.clone())
    }

    async fn partial_update_author(&self, params: PartialUpdateAuthorParams) -> Result<Author> {
        let mut state = self.state.lock().unwrap();
        let row = state.rows.get_mut(&params.id).ok_or(Error::NotFound)?;
        *row = params.apply(row);
        Ok(row.clone())
    }

    async fn delete_author(&self, id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.rows.remove(&id).map(|_| ()).ok_or(Error::NotFound)
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        let mut authors = self.rows();
        authors.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(authors)
    }

    async fn truncate_authors(&self) -> Result<()> {
        *self.state.lock().unwrap() = MemoryState::default();
        Ok(())
    }
}

/// A store whose database is never reachable.
pub struct UnreachableStore;

fn unreachable() -> Error {
    Error::Unavailable(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl AuthorStore for UnreachableStore {
    async fn create_author(&self, _: CreateAuthorParams) -> Result<Author> {
        Err(unreachable())
    }

    async fn get_author(&self, _: i64) -> Result<Author> {
        Err(unreachable())
    }

    async fn update_author(&self, _: UpdateAuthorParams) -> Result<Author> {
        Err(unreachable())
    }

    async fn partial_update_author(&self, _: PartialUpdateAuthorParams) -> Result<Author> {
        Err(unreachable())
    }

    async fn delete_author(&self, _: i64) -> Result<()> {
        Err(unreachable())
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        Err(unreachable())
    }

    async fn truncate_authors(&self) -> Result<()> {
        Err(unreachable())
    }
}

/// A store that panics on reads, to exercise panic recovery.
pub struct PanickingStore;

#[async_trait]
impl AuthorStore for PanickingStore {
    async fn create_author(&self, _: CreateAuthorParams) -> Result<Author> {
        Err(unreachable())
    }

    async fn get_author(&self, id: i64) -> Result<Author> {
        panic!("corrupt row {id}");
    }

    async fn update_author(&self, _: UpdateAuthorParams) -> Result<Author> {
        Err(unreachable())
    }

    async fn partial_update_author(&self, _: PartialUpdateAuthorParams) -> Result<Author> {
        Err(unreachable())
    }

    async fn delete_author(&self, _: i64) -> Result<()> {
        Err(unreachable())
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        Ok(vec![])
    }

    async fn truncate_authors(&self) -> Result<()> {
        Ok(())
    }
}

pub struct Response {
    pub status: StatusCode,
    pub body:   Vec<u8>,
}

impl Response {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    Response {
        status,
        body: body.to_vec(),
    }
}
