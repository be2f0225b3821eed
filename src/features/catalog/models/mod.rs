mod armada;
mod consumption;
mod destination;
mod hotel;
mod package_category;

pub use armada::Armada;
pub use consumption::Consumption;
pub use destination::Destination;
pub use hotel::Hotel;
pub use package_category::PackageCategory;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, Postgres,
};
use uuid::Uuid;
use validator::Validate;

use crate::shared::reference::Identified;

/// The catalog entity kinds a tour package can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Destination,
    Hotel,
    Armada,
    Consumption,
    PackageCategory,
}

impl CatalogKind {
    pub fn table(self) -> &'static str {
        match self {
            CatalogKind::Destination => "destinations",
            CatalogKind::Hotel => "hotels",
            CatalogKind::Armada => "armadas",
            CatalogKind::Consumption => "consumptions",
            CatalogKind::PackageCategory => "package_categories",
        }
    }

    /// URL segment under `/api`
    pub fn path_segment(self) -> &'static str {
        match self {
            CatalogKind::PackageCategory => "package-categories",
            other => other.table(),
        }
    }

    /// Column on `tour_packages` holding a reference of this kind
    pub fn package_column(self) -> &'static str {
        match self {
            CatalogKind::Destination => "destination_id",
            CatalogKind::Hotel => "hotel_id",
            CatalogKind::Armada => "armada_id",
            CatalogKind::Consumption => "consume_id",
            CatalogKind::PackageCategory => "kategori_id",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Destination => "Destination",
            CatalogKind::Hotel => "Hotel",
            CatalogKind::Armada => "Armada",
            CatalogKind::Consumption => "Consumption",
            CatalogKind::PackageCategory => "Package category",
        }
    }
}

/// A catalog entity stored in its own table.
///
/// `COLUMNS` lists the writable columns in the order `bind_input` binds them;
/// `id` and the timestamps are managed by the repository.
pub trait CatalogEntity:
    Identified
    + for<'r> FromRow<'r, PgRow>
    + Serialize
    + DeserializeOwned
    + Clone
    + Send
    + Sync
    + Unpin
    + 'static
{
    type Input: Validate + Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    const KIND: CatalogKind;
    const COLUMNS: &'static [&'static str];

    fn bind_input<'q>(
        query: QueryAs<'q, Postgres, Self, PgArguments>,
        input: &Self::Input,
    ) -> QueryAs<'q, Postgres, Self, PgArguments>;

    /// Build a fresh entity without a database round trip
    fn from_input(id: Uuid, input: Self::Input, now: DateTime<Utc>) -> Self;

    /// Replace every writable field with `input`
    fn apply_input(&mut self, input: Self::Input, now: DateTime<Utc>);
}
