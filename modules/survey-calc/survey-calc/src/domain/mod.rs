pub mod angle;
pub mod error;
pub mod geometry;
pub mod service;
