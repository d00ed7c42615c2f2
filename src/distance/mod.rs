//! Distance matrix.
//!
//! Provides a dense Euclidean distance matrix for routing problems.

mod matrix;

pub use matrix::DistanceMatrix;
