pub mod catalog;
pub mod cli;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod normalize;
pub mod record;
pub mod selection;
pub mod stats;
pub mod view;

pub use error::{LapviewError, Result};
