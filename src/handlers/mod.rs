//! HTTP handlers, written once and instantiated per resource.

pub mod resource;

pub use resource::{create, delete, list, read, update};
