use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgArguments, query::QueryAs, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{CatalogEntity, CatalogKind};
use crate::features::catalog::dtos::ArmadaInput;
use crate::shared::reference::Identified;

/// Fleet vehicle (bus, minibus, boat) used to carry a tour group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Armada {
    pub id: Uuid,
    pub nama: String,
    /// Seats available
    pub kapasitas: i32,
    pub deskripsi: Option<String>,
    pub foto: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identified for Armada {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl CatalogEntity for Armada {
    type Input = ArmadaInput;

    const KIND: CatalogKind = CatalogKind::Armada;
    const COLUMNS: &'static [&'static str] = &["nama", "kapasitas", "deskripsi", "foto"];

    fn bind_input<'q>(
        query: QueryAs<'q, Postgres, Self, PgArguments>,
        input: &ArmadaInput,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(input.nama.trim().to_string())
            .bind(input.kapasitas)
            .bind(input.deskripsi.clone())
            .bind(input.foto.clone())
    }

    fn from_input(id: Uuid, input: ArmadaInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            nama: input.nama.trim().to_string(),
            kapasitas: input.kapasitas,
            deskripsi: input.deskripsi,
            foto: input.foto,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_input(&mut self, input: ArmadaInput, now: DateTime<Utc>) {
        self.nama = input.nama.trim().to_string();
        self.kapasitas = input.kapasitas;
        self.deskripsi = input.deskripsi;
        self.foto = input.foto;
        self.updated_at = now;
    }
}
