pub mod attendance;
pub mod common;
pub mod employees;
pub mod health;
pub mod inventory;
pub mod kss;
pub mod sales;
