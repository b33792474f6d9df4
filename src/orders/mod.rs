//! Orders operations — parameter models, payload construction, handlers.

pub mod handlers;
pub mod params;
pub mod payload;

pub use params::{CaptureOrderParameters, CreateOrderParameters, OrderIdParameters, OrderIntent, OrderItem};
