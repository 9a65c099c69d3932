//! Vehicle financing and affordability toolkit.
//!
//! [`financing`] holds the pure calculation engine, [`catalog`] loads the
//! vehicles it ranks, and the remaining modules carry the configuration,
//! logging and error plumbing shared with the HTTP service.

pub mod catalog;
pub mod config;
pub mod error;
pub mod financing;
pub mod telemetry;
