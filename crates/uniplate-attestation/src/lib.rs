//! # uniplate-attestation
//!
//! Grade certificates for uniplate: a [`TableLoader`] that reads grade
//! sheets and a [`Templater`] that switches the two-page certificate
//! layout on and off.
//!
//! [`TableLoader`]: uniplate_data::TableLoader
//! [`Templater`]: uniplate_engine::Templater

pub mod date;
pub mod loader;
pub mod templater;

pub use date::{format_birth_date, infer_year};
pub use loader::{format_mark, AttestationTableLoader, FIELD_PREFIX, MARK_GROUP, MARK_SENTINEL};
pub use templater::{AttestationTemplater, BIG_Z_MARKER, FIRST_PAGE_MARKS, SECOND_PAGE_SLOTS};
