pub mod batches;
pub mod forms;
pub mod products;
pub mod stock;
pub mod suppliers;
pub mod tiles;
