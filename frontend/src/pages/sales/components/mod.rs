pub mod customers;
pub mod forms;
pub mod orders;
pub mod tiles;
