pub mod attendance;
pub mod common;
pub mod employee;
pub mod inventory;
pub mod kss;
pub mod repository;
pub mod sales;
pub mod transaction;

pub use attendance::{AttendanceFilters, AttendanceRepository};
pub use employee::{EmployeeFilters, EmployeeRepository};
pub use inventory::{BatchRepository, ComponentRepository, ProductRepository, SupplierRepository};
pub use kss::{
    AssignmentFilters, KssAssignmentRepository, KssLessonRepository, KssModuleRepository,
    KssQuestionRepository,
};
pub use repository::Repository;
pub use sales::{CustomerRepository, OrderFilters, OrderRepository};
