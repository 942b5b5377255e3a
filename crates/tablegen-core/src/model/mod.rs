//! Runtime data model definitions.
//!
//! These are the *runtime representations* of schema-level concepts, as
//! opposed to the typed schema IR the generator works on. Generated
//! `models.rs` files build one static `EntityModel` per table out of them, and
//! the read service and ingestion job use those statics to bind record fields
//! to storage columns.
//!
//! In general:
//! - the schema document defines *what exists*
//! - `model` defines *what the persistence layer sees*
pub mod entity;
pub mod field;
pub mod index;
