pub mod assignments;
pub mod forms;
pub mod lessons;
pub mod overview;
pub mod quiz;
