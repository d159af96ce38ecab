pub mod attributes;
pub mod dynamodb;
pub mod memory;
pub mod store;
