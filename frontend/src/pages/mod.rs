pub mod attendance;
pub mod employees;
pub mod home;
pub mod inventory;
pub mod kss;
pub mod sales;
