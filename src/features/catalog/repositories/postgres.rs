use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::CatalogRepository;
use crate::core::database::is_foreign_key_violation;
use crate::core::error::{AppError, Result};
use crate::features::catalog::models::CatalogEntity;

pub struct PgCatalogRepository<T> {
    pool: PgPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T: CatalogEntity> PgCatalogRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn insert_sql() -> String {
        let placeholders: Vec<String> = (2..=T::COLUMNS.len() + 1)
            .map(|i| format!("${}", i))
            .collect();
        format!(
            "INSERT INTO {} (id, {}) VALUES ($1, {}) RETURNING *",
            T::KIND.table(),
            T::COLUMNS.join(", "),
            placeholders.join(", ")
        )
    }

    fn update_sql() -> String {
        let assignments: Vec<String> = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ${}", column, i + 1))
            .collect();
        format!(
            "UPDATE {} SET {}, updated_at = NOW() WHERE id = ${} RETURNING *",
            T::KIND.table(),
            assignments.join(", "),
            T::COLUMNS.len() + 1
        )
    }
}

fn db_error(action: &str, table: &str, e: sqlx::Error) -> AppError {
    tracing::error!("Failed to {} {}: {:?}", action, table, e);
    AppError::Database(e)
}

#[async_trait]
impl<T: CatalogEntity> CatalogRepository<T> for PgCatalogRepository<T> {
    async fn insert(&self, input: T::Input) -> Result<T> {
        let sql = Self::insert_sql();
        let query = sqlx::query_as::<_, T>(&sql).bind(Uuid::now_v7());

        T::bind_input(query, &input)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("insert into", T::KIND.table(), e))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", T::KIND.table());

        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("get from", T::KIND.table(), e))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<T>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("SELECT * FROM {} WHERE id = ANY($1)", T::KIND.table());

        sqlx::query_as::<_, T>(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("batch get from", T::KIND.table(), e))
    }

    async fn list(&self) -> Result<Vec<T>> {
        let sql = format!("SELECT * FROM {} ORDER BY created_at, id", T::KIND.table());

        sqlx::query_as::<_, T>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list", T::KIND.table(), e))
    }

    async fn update(&self, id: Uuid, input: T::Input) -> Result<Option<T>> {
        let sql = Self::update_sql();
        let query = sqlx::query_as::<_, T>(&sql);

        T::bind_input(query, &input)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("update", T::KIND.table(), e))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::KIND.table());

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict(format!(
                        "{} '{}' is still used by a tour package",
                        T::KIND.label(),
                        id
                    ))
                } else {
                    db_error("delete from", T::KIND.table(), e)
                }
            })?;

        Ok(result.rows_affected() > 0)
    }
}
