//! Class schedule extraction for registration system pages.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use scc_classes_rs::prelude::*;
//! ```
//!
//! This re-exports the data model ([`ClassEntry`](models::ClassEntry),
//! [`ScheduleEntry`](models::ScheduleEntry), ...), the HTML entry points and the
//! error types.

pub mod error;
pub mod fields;
pub mod html;
pub mod models;
pub mod prelude;
pub mod serializer;

pub use error::{Error, Result};
