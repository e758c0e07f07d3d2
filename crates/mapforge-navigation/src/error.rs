//! This module defines the error types used by the `mapforge-navigation` crate.

#![warn(missing_docs)]

use mapforge_geometry::GeometryError;

/// Error type for navigation operations.
///
/// This enum encapsulates all possible errors that can occur while building
/// or editing a tile grid, such as invalid dimensions or out-of-bounds access.
/// Failed path searches are not errors: they produce an empty path.
#[derive(Debug, PartialEq)]
pub enum NavigationError {
    /// Error for invalid tile size.
    /// This variant is returned when a tile width or height is not positive.
    InvalidTileSize(&'static str),
    /// Error for invalid grid dimensions.
    /// This variant is returned when grid width or height is zero or too large.
    InvalidDimensions(&'static str),
    /// Error for out-of-bounds access.
    /// This variant is returned when attempting to access tiles outside the grid.
    OutOfBounds(&'static str),
    /// Error for invalid world coordinates.
    /// This variant is returned when world coordinates are outside the grid bounds.
    InvalidWorldCoordinates(&'static str),
    /// Error for an unreadable ASCII layout.
    /// This variant is returned when a layout row has the wrong length or an unknown symbol.
    InvalidLayout(&'static str),
    /// Error raised by the geometry layer.
    Geometry(GeometryError),
}

impl core::fmt::Display for NavigationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NavigationError::InvalidTileSize(msg) => write!(f, "Invalid tile size: {}", msg),
            NavigationError::InvalidDimensions(msg) => write!(f, "Invalid grid dimensions: {}", msg),
            NavigationError::OutOfBounds(msg) => write!(f, "Grid access out of bounds: {}", msg),
            NavigationError::InvalidWorldCoordinates(msg) => {
                write!(f, "Invalid world coordinates: {}", msg)
            }
            NavigationError::InvalidLayout(msg) => write!(f, "Invalid grid layout: {}", msg),
            NavigationError::Geometry(e) => write!(f, "Geometry error: {}", e),
        }
    }
}

impl core::error::Error for NavigationError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            NavigationError::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for NavigationError {
    fn from(e: GeometryError) -> Self {
        NavigationError::Geometry(e)
    }
}
