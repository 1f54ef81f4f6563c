//! Permission synthesis (deterministic resource generation)

pub mod permission_builder;

pub use permission_builder::{build_permission, synthesize};
