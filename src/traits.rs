use async_trait::async_trait;

use crate::{
    database::Result,
    types::author::{Author, CreateAuthorParams, PartialUpdateAuthorParams, UpdateAuthorParams},
};

/// Persistence operations on the `authors` table.
///
/// Every method runs exactly one statement. Operations addressing a single row
/// fail with [`Error::NotFound`](crate::database::Error::NotFound) when no row
/// has the given id; anything else the backend reports is
/// [`Error::Unavailable`](crate::database::Error::Unavailable).
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// Insert a row and return it with its generated id.
    async fn create_author(&self, params: CreateAuthorParams) -> Result<Author>;

    async fn get_author(&self, id: i64) -> Result<Author>;

    /// Replace both `name` and `bio`.
    async fn update_author(&self, params: UpdateAuthorParams) -> Result<Author>;

    /// Replace only the fields set in `params`.
    async fn partial_update_author(&self, params: PartialUpdateAuthorParams) -> Result<Author>;

    async fn delete_author(&self, id: i64) -> Result<()>;

    /// All rows ordered by name. An empty table yields an empty vector.
    async fn list_authors(&self) -> Result<Vec<Author>>;

    /// Remove every row and reset the id sequence. Only used to isolate tests.
    async fn truncate_authors(&self) -> Result<()>;
}
