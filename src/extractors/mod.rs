pub mod json;

pub use json::{parse_body, BodyBytes, JsonBody};
