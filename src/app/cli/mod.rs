//! Command line interface

mod args;

pub use args::{Args, Command, OutputFormat};

#[cfg(test)]
mod tests;
