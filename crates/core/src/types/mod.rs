//! Core types for Roastery.
//!
//! This module provides type-safe wrappers for the seller domain.

pub mod color;
pub mod id;
pub mod seller;
pub mod status;

pub use color::{BrandColor, brand_color};
pub use id::*;
pub use seller::{SellerPatch, SellerRecord, SocialMedia, TeamMember, normalize_company_name};
pub use status::*;
