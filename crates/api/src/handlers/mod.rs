pub mod assembly;
pub mod catalog;
pub mod env;
pub mod generate;
