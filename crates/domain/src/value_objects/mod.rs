//! Value Objects - Immutable, identity-less domain primitives

mod bus_id;
mod company_id;
mod fare;
mod pan;
mod route;
mod stop_id;
mod tap_direction;
mod tap_id;
mod trip_status;

pub use bus_id::BusId;
pub use company_id::CompanyId;
pub use fare::{FARE_SCALE, Fare};
pub use pan::Pan;
pub use route::Route;
pub use stop_id::StopId;
pub use tap_direction::TapDirection;
pub use tap_id::TapId;
pub use trip_status::TripStatus;
