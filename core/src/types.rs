//! Shared primitive types used across the reporting core.

/// Calendar year of a warehouse row.
pub type Year = i64;

/// Quarter of the year, 1 through 4.
pub type Quarter = i64;

/// Name of a state or union territory as it appears in the warehouse.
pub type StateName = String;
