//! Multivariate linear regression fitted by batch gradient descent.
//!
//! A CSV table is loaded into a [`RowMajorMatrix`], split into features and a target column,
//! then [`LinearModel::build`] runs the descent until every update is smaller than
//! [`GDParams::max_step`] or [`GDParams::max_iterations`] is reached.

extern crate csv;
extern crate itertools;
extern crate rayon;
#[macro_use]
extern crate serde_derive;

mod data;
mod error;
mod linear;
mod losses;
mod math;
mod matrix;
mod report;

pub use crate::data::*;
pub use crate::error::*;
pub use crate::linear::*;
pub use crate::losses::*;
pub use crate::math::*;
pub use crate::matrix::*;
pub use crate::report::*;

pub static DEFAULT_LEARNING_RATE: f64 = 1.0E-5;
pub static DEFAULT_MAX_STEP: f64 = 1.0E-6;
pub static DEFAULT_MAX_ITERATIONS: usize = 1_000_000;
