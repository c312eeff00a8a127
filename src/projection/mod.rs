//! Forward-looking value projections for charting

mod series;

pub use series::{ProjectionPoint, ProjectionSeries};
