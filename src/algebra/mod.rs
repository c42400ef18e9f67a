pub mod calculus;
pub mod function;
