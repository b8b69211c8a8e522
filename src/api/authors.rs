use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Error, Service};
use crate::types::author::{
    Author, CreateAuthorParams, FieldUpdate, PartialUpdateAuthorParams, UpdateAuthorParams,
};

/// Longest accepted `name`, in characters.
pub const NAME_MAX_LENGTH: usize = 32;

/// An author as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAuthor {
    #[serde(rename = "ID")]
    pub id:   i64,
    pub name: String,
    pub bio:  String,
}

impl From<Author> for ApiAuthor {
    fn from(author: Author) -> Self {
        Self {
            id:   author.id,
            name: author.name,
            bio:  author.bio,
        }
    }
}

/// Body of `POST /authors` and `PUT /authors/:id`. Any `ID` sent is ignored.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AuthorRequest {
    pub name: Option<String>,
    pub bio:  Option<String>,
}

impl AuthorRequest {
    /// Both fields must be present and non-empty; `name` is length-limited.
    pub fn validate(self) -> Result<(String, String), Error> {
        let name = required("name", self.name)?;
        check_max_length("name", &name)?;
        let bio = required("bio", self.bio)?;
        Ok((name, bio))
    }
}

/// Body of `PATCH /authors/:id`. Omitted or null fields are left unchanged.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PartialAuthorRequest {
    pub name: Option<String>,
    pub bio:  Option<String>,
}

impl PartialAuthorRequest {
    pub fn validate(self) -> Result<(FieldUpdate<String>, FieldUpdate<String>), Error> {
        if let Some(name) = &self.name {
            check_max_length("name", name)?;
        }
        Ok((self.name.into(), self.bio.into()))
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, Error> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Validation(format!("{field} is required"))),
    }
}

fn check_max_length(field: &str, value: &str) -> Result<(), Error> {
    if value.chars().count() > NAME_MAX_LENGTH {
        return Err(Error::Validation(format!(
            "{field} exceeds max length of {NAME_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

/// POST /authors
pub async fn create(
    State(service): State<Service>,
    body: Result<Json<AuthorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiAuthor>), Error> {
    let Json(request) = body?;
    let (name, bio) = request.validate()?;

    let author = service
        .queries
        .create_author(CreateAuthorParams { name, bio })
        .await?;

    info!("Created author {}.", author.id);
    Ok((StatusCode::CREATED, Json(author.into())))
}

/// GET /authors/:id
pub async fn get(
    State(service): State<Service>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiAuthor>, Error> {
    let Path(id) = id?;

    let author = service.queries.get_author(id).await?;

    Ok(Json(author.into()))
}

/// PUT /authors/:id
pub async fn full_update(
    State(service): State<Service>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<AuthorRequest>, JsonRejection>,
) -> Result<Json<ApiAuthor>, Error> {
    let Path(id) = id?;
    let Json(request) = body?;
    let (name, bio) = request.validate()?;

    let author = service
        .queries
        .update_author(UpdateAuthorParams { id, name, bio })
        .await?;

    Ok(Json(author.into()))
}

/// PATCH /authors/:id
pub async fn partial_update(
    State(service): State<Service>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PartialAuthorRequest>, JsonRejection>,
) -> Result<Json<ApiAuthor>, Error> {
    let Path(id) = id?;
    let Json(request) = body?;
    let (name, bio) = request.validate()?;

    let author = service
        .queries
        .partial_update_author(PartialUpdateAuthorParams { id, name, bio })
        .await?;

    Ok(Json(author.into()))
}

/// DELETE /authors/:id
pub async fn delete(
    State(service): State<Service>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, Error> {
    let Path(id) = id?;

    service.queries.delete_author(id).await?;

    info!("Deleted author {id}.");
    Ok(StatusCode::OK)
}

/// GET /authors
///
/// An empty table is reported as 404 rather than an empty list.
pub async fn list(State(service): State<Service>) -> Result<Json<Vec<ApiAuthor>>, Error> {
    let authors = service.queries.list_authors().await?;

    if authors.is_empty() {
        return Err(Error::NotFound("no authors found".into()));
    }

    Ok(Json(authors.into_iter().map(ApiAuthor::from).collect()))
}
