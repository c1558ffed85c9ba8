//! Roastery Core - Shared seller types.
//!
//! This crate provides the types shared by every Roastery component:
//! - `registry` - Persistent seller registry (JSON-file backed)
//! - `cli` - Operator tooling for inspecting and editing the registry
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no file
//! access, no async runtime. This keeps it lightweight and allows it to be
//! used anywhere, including from HTTP handlers that only need the record shape.
//!
//! # Modules
//!
//! - [`types`] - Seller records, patches, type-safe IDs, subscription tags,
//!   and the derived brand color palette

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
