use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgArguments, query::QueryAs, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{CatalogEntity, CatalogKind};
use crate::features::catalog::dtos::PackageCategoryInput;
use crate::shared::reference::Identified;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageCategory {
    pub id: Uuid,
    pub nama: String,
    pub deskripsi: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identified for PackageCategory {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl CatalogEntity for PackageCategory {
    type Input = PackageCategoryInput;

    const KIND: CatalogKind = CatalogKind::PackageCategory;
    const COLUMNS: &'static [&'static str] = &["nama", "deskripsi"];

    fn bind_input<'q>(
        query: QueryAs<'q, Postgres, Self, PgArguments>,
        input: &PackageCategoryInput,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(input.nama.trim().to_string())
            .bind(input.deskripsi.clone())
    }

    fn from_input(id: Uuid, input: PackageCategoryInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            nama: input.nama.trim().to_string(),
            deskripsi: input.deskripsi,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_input(&mut self, input: PackageCategoryInput, now: DateTime<Utc>) {
        self.nama = input.nama.trim().to_string();
        self.deskripsi = input.deskripsi;
        self.updated_at = now;
    }
}
