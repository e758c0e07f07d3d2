#![warn(missing_docs)]

//! Error types for the geometry library.
//!
//! This module defines error types that can occur when building world bounds
//! and bounding boxes.

use core::fmt;

/// Errors that can occur when constructing geometry values.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Error for invalid world dimensions.
    /// This variant is returned when a world is given zero tiles along an axis.
    InvalidDimensions(&'static str),
    /// Error for invalid tile size.
    /// This variant is returned when a tile width or height is not positive.
    InvalidTileSize(&'static str),
    /// Error for a yaw that is not a multiple of 90 degrees.
    NonCardinalYaw(&'static str),
}

impl core::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidDimensions(msg) => write!(f, "Invalid world dimensions: {}", msg),
            GeometryError::InvalidTileSize(msg) => write!(f, "Invalid tile size: {}", msg),
            GeometryError::NonCardinalYaw(msg) => write!(f, "Non-cardinal yaw: {}", msg),
        }
    }
}

impl core::error::Error for GeometryError {}
