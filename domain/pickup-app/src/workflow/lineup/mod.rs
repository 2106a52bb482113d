pub mod generate;
pub mod get;
