pub mod consts;
pub mod http;
pub mod model;
pub mod persistence;
pub mod service;
