// src/schema/mod.rs

pub mod sections;
pub mod types;

pub use sections::*;
pub use types::*;
