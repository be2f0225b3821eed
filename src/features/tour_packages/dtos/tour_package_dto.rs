use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::catalog::models::{Armada, Consumption, Destination, Hotel, PackageCategory};
use crate::features::tour_packages::models::{
    NewTourPackage, PackageStatus, Schedule, TourPackage,
};
use crate::shared::reference::Reference;
use crate::shared::validation::{validate_not_blank, validate_not_nil};

/// Write contract for a tour package. References are bare ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTourPackageDto {
    #[validate(custom(function = "validate_not_blank"))]
    pub nama: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub deskripsi: String,
    /// Free text, e.g. "3 Hari 2 Malam"
    #[validate(custom(function = "validate_not_blank"))]
    pub durasi: String,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub jadwal: Vec<Schedule>,
    /// Defaults to `available`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PackageStatus>,
    /// Price in Rupiah
    #[validate(range(min = 0, message = "harga must not be negative"))]
    pub harga: i64,
    #[validate(custom(function = "validate_not_nil"))]
    pub destination: Uuid,
    #[validate(custom(function = "validate_not_nil"))]
    pub hotel: Uuid,
    #[validate(custom(function = "validate_not_nil"))]
    pub armada: Uuid,
    #[validate(custom(function = "validate_not_nil"))]
    pub consume: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kategori: Option<Uuid>,
}

impl From<&TourPackage> for CreateTourPackageDto {
    fn from(package: &TourPackage) -> Self {
        Self {
            nama: package.nama.clone(),
            deskripsi: package.deskripsi.clone(),
            durasi: package.durasi.clone(),
            include: package.include.clone(),
            exclude: package.exclude.clone(),
            jadwal: package.jadwal.clone(),
            status: Some(package.status),
            harga: package.harga,
            destination: package.destination_id,
            hotel: package.hotel_id,
            armada: package.armada_id,
            consume: package.consume_id,
            kategori: package.kategori_id,
        }
    }
}

impl From<CreateTourPackageDto> for NewTourPackage {
    fn from(dto: CreateTourPackageDto) -> Self {
        Self {
            nama: dto.nama,
            deskripsi: dto.deskripsi,
            durasi: dto.durasi,
            include: dto.include,
            exclude: dto.exclude,
            jadwal: dto.jadwal,
            status: dto.status.unwrap_or_default(),
            harga: dto.harga,
            destination_id: dto.destination,
            hotel_id: dto.hotel,
            armada_id: dto.armada,
            consume_id: dto.consume,
            kategori_id: dto.kategori,
        }
    }
}

/// Partial write. Absent fields keep their stored value; `kategori: null`
/// clears the category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTourPackageDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durasi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jadwal: Option<Vec<Schedule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PackageStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harga: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armada: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consume: Option<Uuid>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub kategori: Option<Option<Uuid>>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`)
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateTourPackageDto {
    /// Overlay the present fields onto `base`
    pub fn merge_into(self, mut base: CreateTourPackageDto) -> CreateTourPackageDto {
        if let Some(nama) = self.nama {
            base.nama = nama;
        }
        if let Some(deskripsi) = self.deskripsi {
            base.deskripsi = deskripsi;
        }
        if let Some(durasi) = self.durasi {
            base.durasi = durasi;
        }
        if let Some(include) = self.include {
            base.include = include;
        }
        if let Some(exclude) = self.exclude {
            base.exclude = exclude;
        }
        if let Some(jadwal) = self.jadwal {
            base.jadwal = jadwal;
        }
        if let Some(status) = self.status {
            base.status = Some(status);
        }
        if let Some(harga) = self.harga {
            base.harga = harga;
        }
        if let Some(destination) = self.destination {
            base.destination = destination;
        }
        if let Some(hotel) = self.hotel {
            base.hotel = hotel;
        }
        if let Some(armada) = self.armada {
            base.armada = armada;
        }
        if let Some(consume) = self.consume {
            base.consume = consume;
        }
        if let Some(kategori) = self.kategori {
            base.kategori = kategori;
        }
        base
    }
}

impl From<CreateTourPackageDto> for UpdateTourPackageDto {
    /// Full replacement: every field present, `kategori` explicitly set or cleared
    fn from(dto: CreateTourPackageDto) -> Self {
        Self {
            nama: Some(dto.nama),
            deskripsi: Some(dto.deskripsi),
            durasi: Some(dto.durasi),
            include: Some(dto.include),
            exclude: Some(dto.exclude),
            jadwal: Some(dto.jadwal),
            status: dto.status,
            harga: Some(dto.harga),
            destination: Some(dto.destination),
            hotel: Some(dto.hotel),
            armada: Some(dto.armada),
            consume: Some(dto.consume),
            kategori: Some(dto.kategori),
        }
    }
}

/// Read contract. References come back resolved unless `populate=false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourPackageResponseDto {
    pub id: Uuid,
    pub nama: String,
    pub deskripsi: String,
    pub durasi: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub jadwal: Vec<Schedule>,
    pub status: PackageStatus,
    pub harga: i64,
    /// Destination id or the resolved destination
    #[schema(value_type = Object)]
    pub destination: Reference<Destination>,
    #[schema(value_type = Object)]
    pub hotel: Reference<Hotel>,
    #[schema(value_type = Object)]
    pub armada: Reference<Armada>,
    #[schema(value_type = Object)]
    pub consume: Reference<Consumption>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub kategori: Option<Reference<PackageCategory>>,
    /// Status is `available` and at least one schedule entry is open
    pub bookable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entities found for a package's references; `None` leaves the bare id
#[derive(Debug, Default)]
pub struct ResolvedReferences {
    pub destination: Option<Destination>,
    pub hotel: Option<Hotel>,
    pub armada: Option<Armada>,
    pub consume: Option<Consumption>,
    pub kategori: Option<PackageCategory>,
}

impl TourPackageResponseDto {
    pub fn from_package(package: TourPackage, refs: ResolvedReferences) -> Self {
        let bookable = package.is_bookable();
        Self {
            id: package.id,
            nama: package.nama,
            deskripsi: package.deskripsi,
            durasi: package.durasi,
            include: package.include,
            exclude: package.exclude,
            jadwal: package.jadwal,
            status: package.status,
            harga: package.harga,
            destination: Reference::resolve_with(package.destination_id, |_| refs.destination),
            hotel: Reference::resolve_with(package.hotel_id, |_| refs.hotel),
            armada: Reference::resolve_with(package.armada_id, |_| refs.armada),
            consume: Reference::resolve_with(package.consume_id, |_| refs.consume),
            kategori: package
                .kategori_id
                .map(|id| Reference::resolve_with(id, |_| refs.kategori)),
            bookable,
            created_at: package.created_at,
            updated_at: package.updated_at,
        }
    }

    /// Write payload carrying this package's current values (either reference shape)
    pub fn to_write(&self) -> CreateTourPackageDto {
        CreateTourPackageDto {
            nama: self.nama.clone(),
            deskripsi: self.deskripsi.clone(),
            durasi: self.durasi.clone(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            jadwal: self.jadwal.clone(),
            status: Some(self.status),
            harga: self.harga,
            destination: self.destination.id(),
            hotel: self.hotel.id(),
            armada: self.armada.id(),
            consume: self.consume.id(),
            kategori: self.kategori.as_ref().map(Reference::id),
        }
    }
}

fn default_populate() -> bool {
    true
}

/// Query parameters for listing packages
#[derive(Debug, Clone, Deserialize)]
pub struct ListTourPackagesQuery {
    pub status: Option<PackageStatus>,
    pub kategori: Option<Uuid>,
    #[serde(default = "default_populate")]
    pub populate: bool,
}

/// Query parameters for reading one package
#[derive(Debug, Clone, Deserialize)]
pub struct GetTourPackageQuery {
    #[serde(default = "default_populate")]
    pub populate: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::collect_field_errors;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "nama": "Bali Adventure",
            "deskripsi": "Explore the beauty of Bali",
            "durasi": "3 days",
            "include": ["Hotel", "Transport"],
            "exclude": ["Flights"],
            "jadwal": [
                { "startDate": "2023-08-01", "endDate": "2023-08-03", "status": "available" }
            ],
            "harga": 1500000,
            "destination": Uuid::now_v7(),
            "hotel": Uuid::now_v7(),
            "armada": Uuid::now_v7(),
            "consume": Uuid::now_v7()
        })
    }

    #[test]
    fn test_valid_payload() {
        let dto: CreateTourPackageDto = serde_json::from_value(payload()).unwrap();

        assert!(dto.validate().is_ok());
        assert_eq!(dto.status, None);
        assert_eq!(NewTourPackage::from(dto).status, PackageStatus::Available);
    }

    #[test]
    fn test_arrays_default_to_empty() {
        let mut value = payload();
        let object = value.as_object_mut().unwrap();
        object.remove("include");
        object.remove("exclude");
        object.remove("jadwal");

        let dto: CreateTourPackageDto = serde_json::from_value(value).unwrap();

        assert!(dto.include.is_empty());
        assert!(dto.jadwal.is_empty());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_field_errors_use_wire_paths() {
        let mut value = payload();
        value["nama"] = json!("  ");
        value["harga"] = json!(-1);
        value["hotel"] = json!(Uuid::nil());
        value["jadwal"] = json!([
            { "startDate": "2023-08-01", "endDate": "2023-08-03", "status": "available" },
            { "startDate": "2023-08-09", "endDate": "2023-08-03", "status": "available" }
        ]);

        let dto: CreateTourPackageDto = serde_json::from_value(value).unwrap();
        let fields = collect_field_errors(&dto.validate().unwrap_err());

        assert!(fields.contains_key("nama"));
        assert!(fields.contains_key("harga"));
        assert!(fields.contains_key("hotel"));
        assert_eq!(
            fields["jadwal[1]"],
            vec!["startDate must not be after endDate".to_string()]
        );
        assert!(!fields.contains_key("jadwal[0]"));
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let absent: UpdateTourPackageDto = serde_json::from_value(json!({ "harga": 10 })).unwrap();
        assert_eq!(absent.kategori, None);

        let cleared: UpdateTourPackageDto =
            serde_json::from_value(json!({ "kategori": null })).unwrap();
        assert_eq!(cleared.kategori, Some(None));
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let base: CreateTourPackageDto = serde_json::from_value(payload()).unwrap();
        let kategori = Uuid::now_v7();

        let merged = UpdateTourPackageDto {
            harga: Some(2_000_000),
            kategori: Some(Some(kategori)),
            ..Default::default()
        }
        .merge_into(base.clone());

        assert_eq!(merged.harga, 2_000_000);
        assert_eq!(merged.kategori, Some(kategori));
        assert_eq!(merged.nama, base.nama);
        assert_eq!(merged.jadwal, base.jadwal);
    }

    #[test]
    fn test_full_update_round_trips() {
        let base: CreateTourPackageDto = serde_json::from_value(payload()).unwrap();
        let other = CreateTourPackageDto {
            kategori: Some(Uuid::now_v7()),
            ..base.clone()
        };

        let merged = UpdateTourPackageDto::from(base.clone()).merge_into(other);

        assert_eq!(merged.kategori, None);
        assert_eq!(merged.nama, base.nama);
    }

    #[test]
    fn test_unpopulated_response_reports_ids() {
        let dto: CreateTourPackageDto = serde_json::from_value(payload()).unwrap();
        let package = TourPackage::from_new(Uuid::now_v7(), dto.clone().into(), Utc::now());

        let response =
            TourPackageResponseDto::from_package(package, ResolvedReferences::default());

        assert_eq!(response.destination, Reference::Id(dto.destination));
        assert!(response.kategori.is_none());
        assert!(response.bookable);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["hotel"], json!(dto.hotel));
        assert_eq!(json["status"], json!("available"));
    }

    #[test]
    fn test_to_write_preserves_reference_ids() {
        let dto: CreateTourPackageDto = serde_json::from_value(payload()).unwrap();
        let package = TourPackage::from_new(Uuid::now_v7(), dto.clone().into(), Utc::now());
        let response =
            TourPackageResponseDto::from_package(package, ResolvedReferences::default());

        let write = response.to_write();

        assert_eq!(write.destination, dto.destination);
        assert_eq!(write.consume, dto.consume);
        assert_eq!(write.status, Some(PackageStatus::Available));
    }
}
