pub mod outcome;
pub mod person;
pub mod validate;
