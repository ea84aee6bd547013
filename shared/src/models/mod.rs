//! Domain models for the Peanut Maturity Calculator

mod batch;
mod cultivar;
mod maturity;
mod sample;

pub use batch::*;
pub use cultivar::*;
pub use maturity::*;
pub use sample::*;
