//! Core types for Jabuticaba.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod image;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use image::ImagePath;
pub use price::{Price, PriceError, PriceParseError};
pub use status::*;
