pub mod decimal_format;
pub mod decimal_math;

pub use decimal_format::*;
pub use decimal_math::*;
