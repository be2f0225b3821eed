use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgArguments, query::QueryAs, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{CatalogEntity, CatalogKind};
use crate::features::catalog::dtos::ConsumptionInput;
use crate::shared::reference::Identified;

/// Meal/catering plan offered with a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Consumption {
    pub id: Uuid,
    pub nama: String,
    pub deskripsi: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identified for Consumption {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl CatalogEntity for Consumption {
    type Input = ConsumptionInput;

    const KIND: CatalogKind = CatalogKind::Consumption;
    const COLUMNS: &'static [&'static str] = &["nama", "deskripsi"];

    fn bind_input<'q>(
        query: QueryAs<'q, Postgres, Self, PgArguments>,
        input: &ConsumptionInput,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(input.nama.trim().to_string())
            .bind(input.deskripsi.clone())
    }

    fn from_input(id: Uuid, input: ConsumptionInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            nama: input.nama.trim().to_string(),
            deskripsi: input.deskripsi,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_input(&mut self, input: ConsumptionInput, now: DateTime<Utc>) {
        self.nama = input.nama.trim().to_string();
        self.deskripsi = input.deskripsi;
        self.updated_at = now;
    }
}
