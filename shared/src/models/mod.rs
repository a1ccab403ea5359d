//! Data models
//!
//! Records as they live in the shared hierarchical store. Field names are
//! camelCase on the wire; numeric fields are decoded leniently because the
//! console writes them from free-form inputs.

pub mod delivery_partner;
pub mod financial_settings;
pub mod restaurant;

// Re-exports
pub use delivery_partner::*;
pub use financial_settings::*;
pub use restaurant::*;
