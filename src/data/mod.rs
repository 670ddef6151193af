pub mod dataset;
pub mod palette;
