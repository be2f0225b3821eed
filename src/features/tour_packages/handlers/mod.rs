mod tour_package_handler;

pub use tour_package_handler::*;
