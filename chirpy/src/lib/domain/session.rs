pub mod errors;
pub mod guard;
pub mod lifecycle;
pub mod manager;
pub mod models;
pub mod ports;
