//! Canonical data model and text normalization
//!
//! This module defines the product record every site adapter produces and the
//! normalization helpers that turn heterogeneous site markup into that
//! canonical form: ISBN validation, release-date canonicalization, and
//! franchise-title cleanup.

mod normalize;
mod record;

pub use normalize::{clean_franchise_title, format_release_date, is_valid_isbn};
pub use record::{FranchiseMap, ProductKind, ProductRecord};
