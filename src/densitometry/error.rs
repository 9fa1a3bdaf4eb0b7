//! Densitometry error types

use thiserror::Error;

/// Errors that can occur during lane-profile extraction and peak analysis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DensitometryError {
    /// The supplied region of interest has zero area
    #[error("ROI has zero area ({rows} rows x {cols} columns)")]
    EmptyRoi { rows: usize, cols: usize },

    /// An intensity value is negative or not finite
    #[error("invalid intensity {value} at row {row}, column {col}")]
    InvalidIntensity { row: usize, col: usize, value: f64 },

    /// A peak refers to a position outside the profile
    #[error("peak position {position} outside profile of length {len}")]
    PositionOutOfBounds { position: usize, len: usize },
}
