//! Application module

pub mod cli;
pub mod config;
pub mod display;
pub mod startup;

#[cfg(test)]
mod tests;
