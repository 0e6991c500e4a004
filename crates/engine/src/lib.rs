//! Impact decomposition engine — attributes a revenue change between two
//! timeframes to the underlying KPI movements.

pub mod decomposition;

pub use decomposition::{compute, revenue};
