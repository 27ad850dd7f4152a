//! Domain models for the Fruit Quality Analysis service

mod analysis;
mod fruit;

pub use analysis::*;
pub use fruit::*;
