pub mod scene;
pub mod svg;
