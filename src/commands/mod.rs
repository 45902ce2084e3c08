//! Command implementations for lapview CLI

mod explore;
mod misc;

pub use explore::*;
pub use misc::*;
