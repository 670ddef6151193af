pub mod controller;
pub mod input;
