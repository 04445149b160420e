mod patterns;

pub use patterns::*;
