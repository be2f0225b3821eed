//! Form state for creating and editing a tour package.
//!
//! The form keeps raw user input (dates and ids as typed). Submitting
//! validates it, converts it into the write payload, and drives the
//! controller through `Editing -> Submitting -> Success | Error`.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{ClientError, TourPackageApi};
use crate::features::tour_packages::dtos::{
    CreateTourPackageDto, TourPackageResponseDto, UpdateTourPackageDto,
};
use crate::features::tour_packages::models::{PackageStatus, Schedule, ScheduleStatus};
use crate::shared::validation::{collect_field_errors, validate_not_blank, FieldErrors, DATE_REGEX};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn message(code: &'static str, text: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(text));
    error
}

/// Reference selector value: required and a UUID
fn validate_reference(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(message("required", "a selection is required"));
    }
    Uuid::parse_str(value.trim())
        .map(|_| ())
        .map_err(|_| message("invalid_id", "must be a valid id"))
}

fn validate_schedule_status(value: &str) -> Result<(), ValidationError> {
    match value {
        "available" | "unavailable" => Ok(()),
        _ => Err(message(
            "invalid_status",
            "status must be available or unavailable",
        )),
    }
}

fn validate_schedule_window(schedule: &ScheduleForm) -> Result<(), ValidationError> {
    let (Ok(start), Ok(end)) = (
        NaiveDate::parse_from_str(&schedule.start_date, DATE_FORMAT),
        NaiveDate::parse_from_str(&schedule.end_date, DATE_FORMAT),
    ) else {
        return Err(message("invalid_date", "not a calendar date"));
    };

    if start > end {
        return Err(message("date_order", "startDate must not be after endDate"));
    }
    Ok(())
}

/// One schedule row as typed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_schedule_window"))]
pub struct ScheduleForm {
    #[validate(regex(path = *DATE_REGEX, message = "use YYYY-MM-DD"))]
    pub start_date: String,
    #[validate(regex(path = *DATE_REGEX, message = "use YYYY-MM-DD"))]
    pub end_date: String,
    #[validate(custom(function = "validate_schedule_status"))]
    pub status: String,
}

impl ScheduleForm {
    pub fn new(start_date: &str, end_date: &str, status: &str) -> Self {
        Self {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            status: status.to_string(),
        }
    }

    fn to_schedule(&self) -> Option<Schedule> {
        Some(Schedule {
            start_date: NaiveDate::parse_from_str(&self.start_date, DATE_FORMAT).ok()?,
            end_date: NaiveDate::parse_from_str(&self.end_date, DATE_FORMAT).ok()?,
            status: match self.status.as_str() {
                "available" => ScheduleStatus::Available,
                "unavailable" => ScheduleStatus::Unavailable,
                _ => return None,
            },
        })
    }
}

impl From<&Schedule> for ScheduleForm {
    fn from(schedule: &Schedule) -> Self {
        Self {
            start_date: schedule.start_date.format(DATE_FORMAT).to_string(),
            end_date: schedule.end_date.format(DATE_FORMAT).to_string(),
            status: match schedule.status {
                ScheduleStatus::Available => "available".to_string(),
                ScheduleStatus::Unavailable => "unavailable".to_string(),
            },
        }
    }
}

/// Package form as typed. Field names match the write payload so field
/// errors line up with the server's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TourPackageForm {
    #[validate(custom(function = "validate_not_blank"))]
    pub nama: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub deskripsi: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub durasi: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    #[validate(nested)]
    pub jadwal: Vec<ScheduleForm>,
    pub status: Option<PackageStatus>,
    #[validate(range(min = 0, message = "harga must not be negative"))]
    pub harga: i64,
    #[validate(custom(function = "validate_reference"))]
    pub destination: String,
    #[validate(custom(function = "validate_reference"))]
    pub hotel: String,
    #[validate(custom(function = "validate_reference"))]
    pub armada: String,
    #[validate(custom(function = "validate_reference"))]
    pub consume: String,
    /// Empty means no category
    #[validate(custom(function = "validate_reference"))]
    pub kategori: Option<String>,
}

impl TourPackageForm {
    /// Pre-fill from a package read in either reference shape
    pub fn from_package(package: &TourPackageResponseDto) -> Self {
        let write = package.to_write();
        Self {
            nama: write.nama,
            deskripsi: write.deskripsi,
            durasi: write.durasi,
            include: write.include,
            exclude: write.exclude,
            jadwal: write.jadwal.iter().map(ScheduleForm::from).collect(),
            status: write.status,
            harga: write.harga,
            destination: write.destination.to_string(),
            hotel: write.hotel.to_string(),
            armada: write.armada.to_string(),
            consume: write.consume.to_string(),
            kategori: write.kategori.map(|id| id.to_string()),
        }
    }

    /// Validate and build the write payload
    pub fn to_payload(&self) -> Result<CreateTourPackageDto, FieldErrors> {
        let mut form = self.clone();
        form.kategori = form.kategori.filter(|k| !k.trim().is_empty());
        form.validate().map_err(|e| collect_field_errors(&e))?;

        let mut errors = FieldErrors::new();
        let mut id = |field: &str, value: &str| {
            Uuid::parse_str(value.trim()).unwrap_or_else(|_| {
                errors
                    .entry(field.to_string())
                    .or_default()
                    .push("must be a valid id".to_string());
                Uuid::nil()
            })
        };
        let destination = id("destination", &form.destination);
        let hotel = id("hotel", &form.hotel);
        let armada = id("armada", &form.armada);
        let consume = id("consume", &form.consume);
        let kategori = form.kategori.as_deref().map(|k| id("kategori", k));

        let mut jadwal = Vec::with_capacity(form.jadwal.len());
        for (index, row) in form.jadwal.iter().enumerate() {
            match row.to_schedule() {
                Some(schedule) => jadwal.push(schedule),
                None => errors
                    .entry(format!("jadwal[{}]", index))
                    .or_default()
                    .push("not a valid schedule".to_string()),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateTourPackageDto {
            nama: form.nama,
            deskripsi: form.deskripsi,
            durasi: form.durasi,
            include: form.include,
            exclude: form.exclude,
            jadwal,
            status: form.status,
            harga: form.harga,
            destination,
            hotel,
            armada,
            consume,
            kategori,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

/// Why the last submit did not succeed
#[derive(Debug, Clone, PartialEq)]
pub enum FormFailure {
    /// Client-side validation; nothing was sent
    Invalid(FieldErrors),
    /// The server answered with an error
    Rejected {
        message: String,
        field_errors: FieldErrors,
    },
    /// The request did not complete
    Transport(String),
}

impl From<ClientError> for FormFailure {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Api {
                message,
                field_errors,
                ..
            } => FormFailure::Rejected {
                message,
                field_errors,
            },
            other => FormFailure::Transport(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Editing,
    Submitting,
    Success(Box<TourPackageResponseDto>),
    Error(FormFailure),
}

/// Drives one form against a [`TourPackageApi`]
pub struct TourPackageFormController<A> {
    api: A,
    mode: FormMode,
    form: TourPackageForm,
    state: FormState,
}

impl<A: TourPackageApi> TourPackageFormController<A> {
    /// Empty form that creates a new package
    pub fn create(api: A) -> Self {
        Self {
            api,
            mode: FormMode::Create,
            form: TourPackageForm::default(),
            state: FormState::Editing,
        }
    }

    /// Form pre-filled from `package`; submitting sends a full update
    pub fn edit_existing(api: A, package: &TourPackageResponseDto) -> Self {
        Self {
            api,
            mode: FormMode::Edit(package.id),
            form: TourPackageForm::from_package(package),
            state: FormState::Editing,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn form(&self) -> &TourPackageForm {
        &self.form
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Change fields; any edit returns the controller to `Editing`
    pub fn edit<F: FnOnce(&mut TourPackageForm)>(&mut self, change: F) {
        change(&mut self.form);
        self.state = FormState::Editing;
    }

    /// Validate and send. Every outcome lands in [`state`](Self::state).
    ///
    /// After a successful create the controller switches to editing the new
    /// package, so submitting again updates instead of duplicating.
    pub async fn submit(&mut self) -> &FormState {
        let payload = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(field_errors) => {
                self.state = FormState::Error(FormFailure::Invalid(field_errors));
                return &self.state;
            }
        };

        self.state = FormState::Submitting;
        let result = match self.mode {
            FormMode::Create => self.api.create(&payload).await,
            FormMode::Edit(id) => self.api.update(id, &UpdateTourPackageDto::from(payload)).await,
        };

        self.state = match result {
            Ok(package) => {
                self.mode = FormMode::Edit(package.id);
                FormState::Success(Box::new(package))
            }
            Err(error) => {
                tracing::debug!("Tour package form submit failed: {}", error);
                FormState::Error(error.into())
            }
        };
        &self.state
    }
}
