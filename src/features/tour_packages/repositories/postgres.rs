use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::TourPackageRepository;
use crate::core::database::is_foreign_key_violation;
use crate::core::error::{AppError, Result};
use crate::features::catalog::models::CatalogKind;
use crate::features::tour_packages::models::{
    NewTourPackage, Schedule, TourPackage, TourPackageFilter,
};
use crate::shared::validation::FieldErrors;

const COLUMNS: &str = "id, nama, deskripsi, durasi, includes, excludes, jadwal, status, harga, \
                       destination_id, hotel_id, armada_id, consume_id, kategori_id, \
                       created_at, updated_at";

#[derive(Debug, FromRow)]
struct TourPackageRow {
    id: Uuid,
    nama: String,
    deskripsi: String,
    durasi: String,
    includes: Vec<String>,
    excludes: Vec<String>,
    jadwal: Json<Vec<Schedule>>,
    status: String,
    harga: i64,
    destination_id: Uuid,
    hotel_id: Uuid,
    armada_id: Uuid,
    consume_id: Uuid,
    kategori_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TourPackageRow> for TourPackage {
    type Error = AppError;

    fn try_from(row: TourPackageRow) -> Result<Self> {
        let status = row.status.parse().map_err(AppError::Internal)?;

        Ok(TourPackage {
            id: row.id,
            nama: row.nama,
            deskripsi: row.deskripsi,
            durasi: row.durasi,
            include: row.includes,
            exclude: row.excludes,
            jadwal: row.jadwal.0,
            status,
            harga: row.harga,
            destination_id: row.destination_id,
            hotel_id: row.hotel_id,
            armada_id: row.armada_id,
            consume_id: row.consume_id,
            kategori_id: row.kategori_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PgTourPackageRepository {
    pool: PgPool,
}

impl PgTourPackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(action: &str, e: sqlx::Error) -> AppError {
    tracing::error!("Failed to {} tour package: {:?}", action, e);
    AppError::Database(e)
}

/// Package fields keyed by the column holding each reference
const REFERENCE_COLUMNS: [(&str, &str); 5] = [
    ("destination_id", "destination"),
    ("hotel_id", "hotel"),
    ("armada_id", "armada"),
    ("consume_id", "consume"),
    ("kategori_id", "kategori"),
];

/// Field error for a reference whose row vanished after it was verified.
/// Postgres names the constraint `tour_packages_<column>_fkey`.
fn missing_reference_errors(constraint: Option<&str>) -> FieldErrors {
    let field = constraint
        .and_then(|name| {
            REFERENCE_COLUMNS
                .iter()
                .find(|(column, _)| name.contains(column))
                .map(|(_, field)| *field)
        })
        .unwrap_or("__all__");

    let mut errors = FieldErrors::new();
    errors.insert(
        field.to_string(),
        vec!["referenced entry no longer exists".to_string()],
    );
    errors
}

fn write_error(action: &str, e: sqlx::Error) -> AppError {
    if is_foreign_key_violation(&e) {
        let constraint = e.as_database_error().and_then(|db| db.constraint());
        tracing::warn!("Tour package {} hit a missing reference: {:?}", action, constraint);
        return AppError::InvalidFields(missing_reference_errors(constraint));
    }
    db_error(action, e)
}

fn insert_sql() -> String {
    format!(
        "INSERT INTO tour_packages (id, nama, deskripsi, durasi, includes, excludes, jadwal, \
         status, harga, destination_id, hotel_id, armada_id, consume_id, kategori_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
         RETURNING {}",
        COLUMNS
    )
}

fn list_sql() -> String {
    format!(
        "SELECT {} FROM tour_packages \
         WHERE ($1::TEXT IS NULL OR status = $1) \
         AND ($2::UUID IS NULL OR kategori_id = $2) \
         ORDER BY created_at DESC, id DESC",
        COLUMNS
    )
}

fn update_sql() -> String {
    format!(
        "UPDATE tour_packages SET nama = $1, deskripsi = $2, durasi = $3, includes = $4, \
         excludes = $5, jadwal = $6, status = $7, harga = $8, destination_id = $9, \
         hotel_id = $10, armada_id = $11, consume_id = $12, kategori_id = $13, \
         updated_at = NOW() WHERE id = $14 RETURNING {}",
        COLUMNS
    )
}

#[async_trait]
impl TourPackageRepository for PgTourPackageRepository {
    async fn insert(&self, package: NewTourPackage) -> Result<TourPackage> {
        let sql = insert_sql();

        let row = sqlx::query_as::<_, TourPackageRow>(&sql)
            .bind(Uuid::now_v7())
            .bind(package.nama)
            .bind(package.deskripsi)
            .bind(package.durasi)
            .bind(package.include)
            .bind(package.exclude)
            .bind(Json(package.jadwal))
            .bind(package.status.as_str())
            .bind(package.harga)
            .bind(package.destination_id)
            .bind(package.hotel_id)
            .bind(package.armada_id)
            .bind(package.consume_id)
            .bind(package.kategori_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| write_error("insert", e))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TourPackage>> {
        let sql = format!("SELECT {} FROM tour_packages WHERE id = $1", COLUMNS);

        let row = sqlx::query_as::<_, TourPackageRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("get", e))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list(&self, filter: &TourPackageFilter) -> Result<Vec<TourPackage>> {
        let sql = list_sql();

        let rows = sqlx::query_as::<_, TourPackageRow>(&sql)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.kategori)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list", e))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update(&self, id: Uuid, package: NewTourPackage) -> Result<Option<TourPackage>> {
        let sql = update_sql();

        let row = sqlx::query_as::<_, TourPackageRow>(&sql)
            .bind(package.nama)
            .bind(package.deskripsi)
            .bind(package.durasi)
            .bind(package.include)
            .bind(package.exclude)
            .bind(Json(package.jadwal))
            .bind(package.status.as_str())
            .bind(package.harga)
            .bind(package.destination_id)
            .bind(package.hotel_id)
            .bind(package.armada_id)
            .bind(package.consume_id)
            .bind(package.kategori_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error("update", e))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tour_packages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_referencing(&self, kind: CatalogKind, id: Uuid) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM tour_packages WHERE {} = $1",
            kind.package_column()
        );

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count references to", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_sql_binds_every_column() {
        let sql = insert_sql();
        assert!(sql.starts_with("INSERT INTO tour_packages (id, nama, deskripsi"));
        assert!(sql.contains("VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"));
        assert!(!sql.contains("$15"));
        assert!(sql.ends_with(&format!("RETURNING {}", COLUMNS)));
    }

    #[test]
    fn test_list_sql_filters_are_optional() {
        let sql = list_sql();
        assert!(sql.contains("($1::TEXT IS NULL OR status = $1)"));
        assert!(sql.contains("($2::UUID IS NULL OR kategori_id = $2)"));
        assert!(sql.ends_with("ORDER BY created_at DESC, id DESC"));
    }

    #[test]
    fn test_update_sql_binds_id_last() {
        let sql = update_sql();
        assert!(sql.starts_with("UPDATE tour_packages SET nama = $1, deskripsi = $2"));
        assert!(sql.contains("kategori_id = $13, updated_at = NOW() WHERE id = $14 RETURNING"));
        assert!(!sql.contains("$15"));
    }

    #[test]
    fn test_missing_reference_maps_constraint_to_field() {
        let errors = missing_reference_errors(Some("tour_packages_consume_id_fkey"));
        assert_eq!(
            errors.get("consume"),
            Some(&vec!["referenced entry no longer exists".to_string()])
        );

        let errors = missing_reference_errors(Some("tour_packages_kategori_id_fkey"));
        assert!(errors.contains_key("kategori"));

        let errors = missing_reference_errors(None);
        assert!(errors.contains_key("__all__"));
    }
}
