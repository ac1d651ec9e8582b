//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod tap_source_port;
mod trip_sink_port;

#[cfg(test)]
pub use tap_source_port::MockTapSourcePort;
pub use tap_source_port::TapSourcePort;
#[cfg(test)]
pub use trip_sink_port::MockTripSinkPort;
pub use trip_sink_port::TripSinkPort;
