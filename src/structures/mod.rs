pub mod points;
pub mod poly;
pub mod term;
