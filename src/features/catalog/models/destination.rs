use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgArguments, query::QueryAs, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{CatalogEntity, CatalogKind};
use crate::features::catalog::dtos::DestinationInput;
use crate::shared::reference::Identified;

/// Tourist destination (e.g. "Kuta, Bali")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: Uuid,
    pub nama: String,
    pub lokasi: String,
    pub deskripsi: String,
    pub foto: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identified for Destination {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl CatalogEntity for Destination {
    type Input = DestinationInput;

    const KIND: CatalogKind = CatalogKind::Destination;
    const COLUMNS: &'static [&'static str] = &["nama", "lokasi", "deskripsi", "foto"];

    fn bind_input<'q>(
        query: QueryAs<'q, Postgres, Self, PgArguments>,
        input: &DestinationInput,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(input.nama.trim().to_string())
            .bind(input.lokasi.trim().to_string())
            .bind(input.deskripsi.clone())
            .bind(input.foto.clone())
    }

    fn from_input(id: Uuid, input: DestinationInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            nama: input.nama.trim().to_string(),
            lokasi: input.lokasi.trim().to_string(),
            deskripsi: input.deskripsi,
            foto: input.foto,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_input(&mut self, input: DestinationInput, now: DateTime<Utc>) {
        self.nama = input.nama.trim().to_string();
        self.lokasi = input.lokasi.trim().to_string();
        self.deskripsi = input.deskripsi;
        self.foto = input.foto;
        self.updated_at = now;
    }
}
