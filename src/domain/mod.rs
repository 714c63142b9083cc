//! Domain models for adbundle
//!
//! This module contains pure domain objects representing core business entities:
//! the raw output of the external converter, the normalized bundle derived from
//! it, and the dimensions a bundle wants to be previewed at.

pub mod bundle;
pub mod conversion;
pub mod dimensions;

pub use bundle::{Bundle, ImagePayload};
pub use conversion::{ConversionItem, ConversionResult};
pub use dimensions::RenderDimensions;
