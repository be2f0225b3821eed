use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgArguments, query::QueryAs, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{CatalogEntity, CatalogKind};
use crate::features::catalog::dtos::HotelInput;
use crate::shared::reference::Identified;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Uuid,
    pub nama: String,
    pub alamat: String,
    /// Star rating, 1 to 5
    pub bintang: i16,
    pub deskripsi: Option<String>,
    pub foto: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identified for Hotel {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl CatalogEntity for Hotel {
    type Input = HotelInput;

    const KIND: CatalogKind = CatalogKind::Hotel;
    const COLUMNS: &'static [&'static str] = &["nama", "alamat", "bintang", "deskripsi", "foto"];

    fn bind_input<'q>(
        query: QueryAs<'q, Postgres, Self, PgArguments>,
        input: &HotelInput,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(input.nama.trim().to_string())
            .bind(input.alamat.clone())
            .bind(input.bintang)
            .bind(input.deskripsi.clone())
            .bind(input.foto.clone())
    }

    fn from_input(id: Uuid, input: HotelInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            nama: input.nama.trim().to_string(),
            alamat: input.alamat,
            bintang: input.bintang,
            deskripsi: input.deskripsi,
            foto: input.foto,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_input(&mut self, input: HotelInput, now: DateTime<Utc>) {
        self.nama = input.nama.trim().to_string();
        self.alamat = input.alamat;
        self.bintang = input.bintang;
        self.deskripsi = input.deskripsi;
        self.foto = input.foto;
        self.updated_at = now;
    }
}
