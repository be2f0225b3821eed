use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Schedule;
use crate::features::catalog::models::CatalogKind;

/// Lifecycle status of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    #[default]
    Available,
    Booked,
    InProgress,
    Completed,
    Cancelled,
}

impl PackageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageStatus::Available => "available",
            PackageStatus::Booked => "booked",
            PackageStatus::InProgress => "in_progress",
            PackageStatus::Completed => "completed",
            PackageStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(PackageStatus::Available),
            "booked" => Ok(PackageStatus::Booked),
            "in_progress" => Ok(PackageStatus::InProgress),
            "completed" => Ok(PackageStatus::Completed),
            "cancelled" => Ok(PackageStatus::Cancelled),
            other => Err(format!("unknown package status '{}'", other)),
        }
    }
}

/// Stored tour package. References are kept as bare ids.
#[derive(Debug, Clone, PartialEq)]
pub struct TourPackage {
    pub id: Uuid,
    pub nama: String,
    pub deskripsi: String,
    pub durasi: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub jadwal: Vec<Schedule>,
    pub status: PackageStatus,
    pub harga: i64,
    pub destination_id: Uuid,
    pub hotel_id: Uuid,
    pub armada_id: Uuid,
    pub consume_id: Uuid,
    pub kategori_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TourPackage {
    /// Open for sale with at least one open departure
    pub fn is_bookable(&self) -> bool {
        self.status == PackageStatus::Available && self.jadwal.iter().any(Schedule::is_available)
    }

    /// Id this package holds for `kind`, if any
    pub fn reference(&self, kind: CatalogKind) -> Option<Uuid> {
        match kind {
            CatalogKind::Destination => Some(self.destination_id),
            CatalogKind::Hotel => Some(self.hotel_id),
            CatalogKind::Armada => Some(self.armada_id),
            CatalogKind::Consumption => Some(self.consume_id),
            CatalogKind::PackageCategory => self.kategori_id,
        }
    }

    pub(crate) fn from_new(id: Uuid, package: NewTourPackage, now: DateTime<Utc>) -> Self {
        Self {
            id,
            nama: package.nama,
            deskripsi: package.deskripsi,
            durasi: package.durasi,
            include: package.include,
            exclude: package.exclude,
            jadwal: package.jadwal,
            status: package.status,
            harga: package.harga,
            destination_id: package.destination_id,
            hotel_id: package.hotel_id,
            armada_id: package.armada_id,
            consume_id: package.consume_id,
            kategori_id: package.kategori_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated write record handed to the repository
#[derive(Debug, Clone, PartialEq)]
pub struct NewTourPackage {
    pub nama: String,
    pub deskripsi: String,
    pub durasi: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub jadwal: Vec<Schedule>,
    pub status: PackageStatus,
    pub harga: i64,
    pub destination_id: Uuid,
    pub hotel_id: Uuid,
    pub armada_id: Uuid,
    pub consume_id: Uuid,
    pub kategori_id: Option<Uuid>,
}

/// List filters; `None` matches everything
#[derive(Debug, Clone, Default)]
pub struct TourPackageFilter {
    pub status: Option<PackageStatus>,
    pub kategori: Option<Uuid>,
}

impl TourPackageFilter {
    pub fn matches(&self, package: &TourPackage) -> bool {
        self.status.is_none_or(|s| s == package.status)
            && self.kategori.is_none_or(|k| package.kategori_id == Some(k))
    }
}
