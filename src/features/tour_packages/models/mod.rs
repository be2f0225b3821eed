mod schedule;
mod tour_package;

pub use schedule::{Schedule, ScheduleStatus};
pub use tour_package::{NewTourPackage, PackageStatus, TourPackage, TourPackageFilter};
