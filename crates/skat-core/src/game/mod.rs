pub mod driver;
pub mod serialization;
pub mod strategy;
