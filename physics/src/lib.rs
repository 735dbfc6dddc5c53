pub mod error;
pub mod math;
pub mod problem;
pub mod shapes;
