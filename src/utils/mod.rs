pub mod staging;
pub mod validation;
