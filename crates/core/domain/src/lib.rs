pub mod data;

pub use data::{Measurement, Sensor};
