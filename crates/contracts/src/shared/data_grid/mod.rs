pub mod cell;
pub mod options;
pub mod row;
pub mod sorting;

pub use cell::*;
pub use options::*;
pub use row::*;
pub use sorting::*;
