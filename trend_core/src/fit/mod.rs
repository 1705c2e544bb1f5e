pub mod fitter;
pub mod optimizer;
pub mod pivot;
