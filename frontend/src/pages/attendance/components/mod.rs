pub mod calendar;
pub mod filters;
pub mod form;
pub mod records;
pub mod summary;
