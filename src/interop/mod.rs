//! Interoperability with other schema formats.
//!
//! Codecs, named shapes and the registry can all be exported as JSON Schema
//! (draft 2020-12) for documentation and client generation.

pub mod json_schema;

pub use json_schema::{ToJsonSchema, DRAFT_2020_12};
