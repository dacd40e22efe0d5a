//! Domain logic for turning structured image-prompt fields into the exact
//! prompt text each generation platform expects.
//!
//! Everything in this crate is pure: no networking, no storage, no ambient
//! state. Callers pass the structure, platform and language explicitly.

pub mod assembly;
pub mod catalog;
pub mod error;
pub mod extraction;
pub mod instructions;
pub mod platform;
pub mod sanitize;
pub mod structure;
pub mod style;
pub mod types;
pub mod validation;
