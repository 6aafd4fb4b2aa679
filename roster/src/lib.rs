//! Employee directory and compensation history services.
//!
//! [`EmployeeService`] owns employee records and the reporting-structure
//! computation; [`CompensationService`] owns the append-only compensation
//! history. Both sit on the shared record store in [`store`].

pub mod compensation;
pub mod employee;
pub mod error;
pub mod model;
pub mod store;

pub use compensation::CompensationService;
pub use employee::EmployeeService;
pub use error::{Error, Result};
