use async_trait::async_trait;
use sqlx::PgPool;

use super::{Error, Result};
use crate::{
    traits::AuthorStore,
    types::author::{Author, CreateAuthorParams, PartialUpdateAuthorParams, UpdateAuthorParams},
};

const TABLE_NAME: &str = "authors";

/// [`AuthorStore`] backed by a Postgres pool.
#[derive(Debug, Clone)]
pub struct Queries {
    pool: PgPool,
}

impl Queries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_table(&self) -> Result<()> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {TABLE_NAME} (
                id   BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                bio  TEXT NOT NULL
            );"#
        ))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AuthorStore for Queries {
    async fn create_author(&self, params: CreateAuthorParams) -> Result<Author> {
        Ok(sqlx::query_as::<_, Author>(&format!(
            r#"
            INSERT INTO {TABLE_NAME} ( name, bio )
            VALUES ( $1, $2 )
            RETURNING id, name, bio;
            "#
        ))
        .bind(params.name)
        .bind(params.bio)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_author(&self, id: i64) -> Result<Author> {
        Ok(sqlx::query_as::<_, Author>(&format!(
            r#"
            SELECT id, name, bio FROM {TABLE_NAME}
            WHERE id = $1;
            "#
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_author(&self, params: UpdateAuthorParams) -> Result<Author> {
        Ok(sqlx::query_as::<_, Author>(&format!(
            r#"
            UPDATE {TABLE_NAME}
            SET
                name = $2,
                bio = $3
            WHERE
                id = $1
            RETURNING id, name, bio;
            "#
        ))
        .bind(params.id)
        .bind(params.name)
        .bind(params.bio)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn partial_update_author(&self, params: PartialUpdateAuthorParams) -> Result<Author> {
        let update_name = params.name.is_set();
        let update_bio = params.bio.is_set();
        Ok(sqlx::query_as::<_, Author>(&format!(
            r#"
            UPDATE {TABLE_NAME}
            SET
                name = CASE WHEN $2::boolean THEN $3::text ELSE name END,
                bio = CASE WHEN $4::boolean THEN $5::text ELSE bio END
            WHERE
                id = $1
            RETURNING id, name, bio;
            "#
        ))
        .bind(params.id)
        .bind(update_name)
        .bind(params.name.value())
        .bind(update_bio)
        .bind(params.bio.value())
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete_author(&self, id: i64) -> Result<()> {
        let result = sqlx::query(&format!(
            r#"
            DELETE FROM {TABLE_NAME}
            WHERE id = $1;
            "#
        ))
        .bind(id)
        .execute(&self.pool)
        .await?;
        match result.rows_affected() {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        Ok(sqlx::query_as::<_, Author>(&format!(
            r#"
            SELECT id, name, bio FROM {TABLE_NAME}
            ORDER BY name, id;
            "#
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn truncate_authors(&self) -> Result<()> {
        sqlx::query(&format!("TRUNCATE {TABLE_NAME} RESTART IDENTITY;"))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
