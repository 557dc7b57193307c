//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```
//! use scc_classes_rs::prelude::*;
//!
//! let entries: Vec<ClassEntry> = parse_with("", &ParseOptions { year: 2024 }).unwrap();
//! assert!(entries.is_empty());
//! ```

// Error types
pub use crate::error::{Error, Result};

// Data models
pub use crate::models::{
    Capacity, ClassEntry, ClassType, DateRange, DayOfWeek, FilterableClassEntry, Interval,
    ScheduleEntry, ScheduleTime,
};

// Extraction
pub use crate::html::{parse, parse_with, ParseOptions};

// Persistence
pub use crate::serializer::{deserialize, serialize, serialize_pretty};
