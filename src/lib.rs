pub mod app;
pub mod core;
pub mod features;
pub mod model;
pub mod records;
pub mod service;
pub mod source;
