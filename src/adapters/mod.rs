pub mod generator;
pub mod semantic;
