//! Accelerator diagnostics core.
//!
//! Holds the device selection policy, the runtime probe capability the
//! diagnostics are written against, the console report helpers and the
//! Figment-backed settings loader.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod report;
pub mod select;
pub mod traits;
pub mod types;

pub use select::select_device;
pub use types::{Availability, DeviceKind, DeviceSelection, Precision, Summary};
