pub mod estimator;
pub mod filter;
pub mod kernel;
pub mod window;
