//! Typed client for the tour-package API and the form workflow built on it.
//!
//! ```ignore
//! let session = Session::from_env()?;
//! let client = TourPackageClient::new(session);
//! let mut form = TourPackageFormController::create(client);
//! form.edit(|f| f.nama = "Bali Adventure".into());
//! form.submit().await;
//! ```

mod form;
mod session;
mod tour_package_client;

pub use form::{
    FormFailure, FormMode, FormState, ScheduleForm, TourPackageForm, TourPackageFormController,
};
pub use session::Session;
pub use tour_package_client::{ClientError, TourPackageApi, TourPackageClient};
