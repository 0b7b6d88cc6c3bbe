#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::{
        attendance::AttendanceListQuery,
        employees::EmployeeListQuery,
        health::HealthStatus,
        inventory::BatchListQuery,
        kss::AssignmentListQuery,
        sales::OrderListQuery,
    },
    models::{
        attendance::{AttendancePayload, AttendanceRecord, StatusInput},
        employee::{Employee, EmployeePayload, EmployeeRole, EmployeeStatus},
        inventory::{
            Batch, BatchDetail, BatchItem, BatchItemPayload, BatchPayload, BatchStatus,
            BatchStatusPayload, BomLine, BomLinePayload, Component, ComponentPayload, Product,
            ProductDetail, ProductPayload, ReplaceBomPayload, Supplier, SupplierPayload,
        },
        kss::{
            AssignmentStatus, CreateAssignmentPayload, KssAssignment, KssLesson,
            KssLessonPayload, KssModule, KssModulePayload, KssQuestion, KssQuestionPayload,
            QuizAnswer, QuizResult, SubmitQuizPayload, UpdateAssignmentPayload,
        },
        sales::{
            Customer, CustomerPayload, Order, OrderDetail, OrderItem, OrderItemPayload,
            OrderPayload, OrderStatus, OrderStatusPayload, OrderTotals,
        },
    },
};
use utoipa::{Modify, OpenApi};

const ENVELOPE_NOTE: &str = "Every JSON response is wrapped as \
`{\"status\": \"success\" | \"error\", \"data\": <body>, \"message\": <text>}`. \
The response bodies below describe `data`. Errors carry `data: null` and a `code`.";

#[derive(OpenApi)]
#[openapi(
    paths(
        health_doc,
        list_employees_doc,
        create_employee_doc,
        get_employee_doc,
        update_employee_doc,
        delete_employee_doc,
        list_attendance_doc,
        create_attendance_doc,
        update_attendance_doc,
        delete_attendance_doc,
        export_attendance_doc,
        list_modules_doc,
        create_module_doc,
        get_module_doc,
        update_module_doc,
        delete_module_doc,
        list_lessons_doc,
        create_lesson_doc,
        update_lesson_doc,
        delete_lesson_doc,
        list_questions_doc,
        create_question_doc,
        delete_question_doc,
        submit_quiz_doc,
        list_assignments_doc,
        create_assignment_doc,
        update_assignment_doc,
        delete_assignment_doc,
        list_suppliers_doc,
        create_supplier_doc,
        supplier_detail_doc,
        update_supplier_doc,
        delete_supplier_doc,
        list_components_doc,
        create_component_doc,
        component_detail_doc,
        update_component_doc,
        delete_component_doc,
        list_products_doc,
        create_product_doc,
        product_detail_doc,
        update_product_doc,
        delete_product_doc,
        list_product_components_doc,
        replace_product_components_doc,
        list_batches_doc,
        create_batch_doc,
        batch_detail_doc,
        update_batch_doc,
        delete_batch_doc,
        update_batch_status_doc,
        list_customers_doc,
        create_customer_doc,
        customer_detail_doc,
        update_customer_doc,
        delete_customer_doc,
        list_orders_doc,
        create_order_doc,
        order_detail_doc,
        update_order_doc,
        delete_order_doc,
        update_order_status_doc
    ),
    components(
        schemas(
            HealthStatus,
            // hr
            Employee,
            EmployeePayload,
            EmployeeRole,
            EmployeeStatus,
            AttendanceRecord,
            AttendancePayload,
            StatusInput,
            // kss
            KssModule,
            KssModulePayload,
            KssLesson,
            KssLessonPayload,
            KssQuestion,
            KssQuestionPayload,
            KssAssignment,
            AssignmentStatus,
            CreateAssignmentPayload,
            UpdateAssignmentPayload,
            QuizAnswer,
            SubmitQuizPayload,
            QuizResult,
            // inventory
            Supplier,
            SupplierPayload,
            Component,
            ComponentPayload,
            Product,
            ProductPayload,
            ProductDetail,
            BomLine,
            BomLinePayload,
            ReplaceBomPayload,
            Batch,
            BatchItem,
            BatchItemPayload,
            BatchPayload,
            BatchStatus,
            BatchStatusPayload,
            BatchDetail,
            // sales
            Customer,
            CustomerPayload,
            Order,
            OrderItem,
            OrderItemPayload,
            OrderPayload,
            OrderStatus,
            OrderStatusPayload,
            OrderTotals,
            OrderDetail
        )
    ),
    modifiers(&EnvelopeDescription),
    tags(
        (name = "System", description = "Health and documentation"),
        (name = "HR", description = "Employees and attendance"),
        (name = "KSS", description = "Training modules, lessons, quizzes and assignments"),
        (name = "Inventory", description = "Suppliers, components, products and batches"),
        (name = "Sales", description = "Customers and orders")
    )
)]
pub struct ApiDoc;

struct EnvelopeDescription;

impl Modify for EnvelopeDescription {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = "Back-office API".to_string();
        openapi.info.description = Some(ENVELOPE_NOTE.to_string());
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[utoipa::path(get, path = "/api/health", responses((status = 200, body = HealthStatus)), tag = "System")]
fn health_doc() {}

// ---------------------------------------------------------------------------
// HR
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeListQuery),
    responses((status = 200, body = [Employee]), (status = 400, description = "Invalid filter")),
    tag = "HR"
)]
fn list_employees_doc() {}

#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeePayload,
    responses(
        (status = 201, body = Employee),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Duplicate employee code or email")
    ),
    tag = "HR"
)]
fn create_employee_doc() {}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Employee id")),
    responses((status = 200, body = Employee), (status = 404, description = "Not found")),
    tag = "HR"
)]
fn get_employee_doc() {}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Employee id")),
    request_body = EmployeePayload,
    responses((status = 200, body = Employee), (status = 404, description = "Not found")),
    tag = "HR"
)]
fn update_employee_doc() {}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Employee id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not found")),
    tag = "HR"
)]
fn delete_employee_doc() {}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceListQuery),
    responses((status = 200, body = [AttendanceRecord])),
    tag = "HR"
)]
fn list_attendance_doc() {}

#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendancePayload,
    responses((status = 201, body = AttendanceRecord), (status = 400, description = "Validation failed")),
    tag = "HR"
)]
fn create_attendance_doc() {}

#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(("id" = String, Path, description = "Attendance record id")),
    request_body = AttendancePayload,
    responses((status = 200, body = AttendanceRecord), (status = 404, description = "Not found")),
    tag = "HR"
)]
fn update_attendance_doc() {}

#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(("id" = String, Path, description = "Attendance record id")),
    responses((status = 200, description = "Deleted")),
    tag = "HR"
)]
fn delete_attendance_doc() {}

#[utoipa::path(
    get,
    path = "/api/attendance/export",
    params(AttendanceListQuery),
    responses((status = 200, description = "CSV document", content_type = "text/csv")),
    tag = "HR"
)]
fn export_attendance_doc() {}

// ---------------------------------------------------------------------------
// KSS
// ---------------------------------------------------------------------------

#[utoipa::path(get, path = "/api/kss/modules", responses((status = 200, body = [KssModule])), tag = "KSS")]
fn list_modules_doc() {}

#[utoipa::path(
    post,
    path = "/api/kss/modules",
    request_body = KssModulePayload,
    responses((status = 201, body = KssModule)),
    tag = "KSS"
)]
fn create_module_doc() {}

#[utoipa::path(
    get,
    path = "/api/kss/modules/{id}",
    params(("id" = String, Path, description = "Module id")),
    responses((status = 200, body = KssModule), (status = 404, description = "Not found")),
    tag = "KSS"
)]
fn get_module_doc() {}

#[utoipa::path(
    put,
    path = "/api/kss/modules/{id}",
    params(("id" = String, Path, description = "Module id")),
    request_body = KssModulePayload,
    responses((status = 200, body = KssModule)),
    tag = "KSS"
)]
fn update_module_doc() {}

#[utoipa::path(
    delete,
    path = "/api/kss/modules/{id}",
    params(("id" = String, Path, description = "Module id")),
    responses((status = 200, description = "Deleted with its lessons and assignments")),
    tag = "KSS"
)]
fn delete_module_doc() {}

#[utoipa::path(
    get,
    path = "/api/kss/modules/{id}/lessons",
    params(("id" = String, Path, description = "Module id")),
    responses((status = 200, body = [KssLesson])),
    tag = "KSS"
)]
fn list_lessons_doc() {}

#[utoipa::path(
    post,
    path = "/api/kss/modules/{id}/lessons",
    params(("id" = String, Path, description = "Module id")),
    request_body = KssLessonPayload,
    responses((status = 201, body = KssLesson)),
    tag = "KSS"
)]
fn create_lesson_doc() {}

#[utoipa::path(
    put,
    path = "/api/kss/lessons/{id}",
    params(("id" = String, Path, description = "Lesson id")),
    request_body = KssLessonPayload,
    responses((status = 200, body = KssLesson)),
    tag = "KSS"
)]
fn update_lesson_doc() {}

#[utoipa::path(
    delete,
    path = "/api/kss/lessons/{id}",
    params(("id" = String, Path, description = "Lesson id")),
    responses((status = 200, description = "Deleted")),
    tag = "KSS"
)]
fn delete_lesson_doc() {}

#[utoipa::path(
    get,
    path = "/api/kss/lessons/{id}/questions",
    params(("id" = String, Path, description = "Lesson id")),
    responses((status = 200, body = [KssQuestion])),
    tag = "KSS"
)]
fn list_questions_doc() {}

#[utoipa::path(
    post,
    path = "/api/kss/lessons/{id}/questions",
    params(("id" = String, Path, description = "Lesson id")),
    request_body = KssQuestionPayload,
    responses((status = 201, body = KssQuestion)),
    tag = "KSS"
)]
fn create_question_doc() {}

#[utoipa::path(
    delete,
    path = "/api/kss/questions/{id}",
    params(("id" = String, Path, description = "Question id")),
    responses((status = 200, description = "Deleted")),
    tag = "KSS"
)]
fn delete_question_doc() {}

#[utoipa::path(
    post,
    path = "/api/kss/lessons/{id}/submit",
    params(("id" = String, Path, description = "Lesson id")),
    request_body = SubmitQuizPayload,
    responses(
        (status = 200, body = QuizResult),
        (status = 400, description = "Assignment belongs to another module")
    ),
    tag = "KSS"
)]
fn submit_quiz_doc() {}

#[utoipa::path(
    get,
    path = "/api/kss/assignments",
    params(AssignmentListQuery),
    responses((status = 200, body = [KssAssignment])),
    tag = "KSS"
)]
fn list_assignments_doc() {}

#[utoipa::path(
    post,
    path = "/api/kss/assignments",
    request_body = CreateAssignmentPayload,
    responses((status = 201, body = KssAssignment), (status = 409, description = "Already assigned")),
    tag = "KSS"
)]
fn create_assignment_doc() {}

#[utoipa::path(
    put,
    path = "/api/kss/assignments/{id}",
    params(("id" = String, Path, description = "Assignment id")),
    request_body = UpdateAssignmentPayload,
    responses((status = 200, body = KssAssignment)),
    tag = "KSS"
)]
fn update_assignment_doc() {}

#[utoipa::path(
    delete,
    path = "/api/kss/assignments/{id}",
    params(("id" = String, Path, description = "Assignment id")),
    responses((status = 200, description = "Deleted")),
    tag = "KSS"
)]
fn delete_assignment_doc() {}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

#[utoipa::path(get, path = "/api/inventory/suppliers", responses((status = 200, body = [Supplier])), tag = "Inventory")]
fn list_suppliers_doc() {}

#[utoipa::path(
    post,
    path = "/api/inventory/suppliers",
    request_body = SupplierPayload,
    responses((status = 201, body = Supplier)),
    tag = "Inventory"
)]
fn create_supplier_doc() {}

#[utoipa::path(
    get,
    path = "/api/inventory/suppliers/{id}",
    params(("id" = String, Path, description = "Supplier id")),
    responses((status = 200, body = Supplier)),
    tag = "Inventory"
)]
fn supplier_detail_doc() {}

#[utoipa::path(
    put,
    path = "/api/inventory/suppliers/{id}",
    params(("id" = String, Path, description = "Supplier id")),
    request_body = SupplierPayload,
    responses((status = 200, body = Supplier)),
    tag = "Inventory"
)]
fn update_supplier_doc() {}

#[utoipa::path(
    delete,
    path = "/api/inventory/suppliers/{id}",
    params(("id" = String, Path, description = "Supplier id")),
    responses((status = 200, description = "Deleted"), (status = 409, description = "Still referenced")),
    tag = "Inventory"
)]
fn delete_supplier_doc() {}

#[utoipa::path(get, path = "/api/inventory/components", responses((status = 200, body = [Component])), tag = "Inventory")]
fn list_components_doc() {}

#[utoipa::path(
    post,
    path = "/api/inventory/components",
    request_body = ComponentPayload,
    responses((status = 201, body = Component), (status = 409, description = "Duplicate SKU")),
    tag = "Inventory"
)]
fn create_component_doc() {}

#[utoipa::path(
    get,
    path = "/api/inventory/components/{id}",
    params(("id" = String, Path, description = "Component id")),
    responses((status = 200, body = Component)),
    tag = "Inventory"
)]
fn component_detail_doc() {}

#[utoipa::path(
    put,
    path = "/api/inventory/components/{id}",
    params(("id" = String, Path, description = "Component id")),
    request_body = ComponentPayload,
    responses((status = 200, body = Component)),
    tag = "Inventory"
)]
fn update_component_doc() {}

#[utoipa::path(
    delete,
    path = "/api/inventory/components/{id}",
    params(("id" = String, Path, description = "Component id")),
    responses((status = 200, description = "Deleted"), (status = 409, description = "Used by a bill of materials")),
    tag = "Inventory"
)]
fn delete_component_doc() {}

#[utoipa::path(get, path = "/api/inventory/products", responses((status = 200, body = [Product])), tag = "Inventory")]
fn list_products_doc() {}

#[utoipa::path(
    post,
    path = "/api/inventory/products",
    request_body = ProductPayload,
    responses((status = 201, body = Product)),
    tag = "Inventory"
)]
fn create_product_doc() {}

#[utoipa::path(
    get,
    path = "/api/inventory/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses((status = 200, body = ProductDetail)),
    tag = "Inventory"
)]
fn product_detail_doc() {}

#[utoipa::path(
    put,
    path = "/api/inventory/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductPayload,
    responses((status = 200, body = Product)),
    tag = "Inventory"
)]
fn update_product_doc() {}

#[utoipa::path(
    delete,
    path = "/api/inventory/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses((status = 200, description = "Deleted")),
    tag = "Inventory"
)]
fn delete_product_doc() {}

#[utoipa::path(
    get,
    path = "/api/inventory/products/{id}/components",
    params(("id" = String, Path, description = "Product id")),
    responses((status = 200, body = [BomLine])),
    tag = "Inventory"
)]
fn list_product_components_doc() {}

#[utoipa::path(
    put,
    path = "/api/inventory/products/{id}/components",
    params(("id" = String, Path, description = "Product id")),
    request_body = ReplaceBomPayload,
    responses((status = 200, body = [BomLine])),
    tag = "Inventory"
)]
fn replace_product_components_doc() {}

#[utoipa::path(
    get,
    path = "/api/inventory/batches",
    params(BatchListQuery),
    responses((status = 200, body = [Batch])),
    tag = "Inventory"
)]
fn list_batches_doc() {}

#[utoipa::path(
    post,
    path = "/api/inventory/batches",
    request_body = BatchPayload,
    responses((status = 201, body = BatchDetail)),
    tag = "Inventory"
)]
fn create_batch_doc() {}

#[utoipa::path(
    get,
    path = "/api/inventory/batches/{id}",
    params(("id" = String, Path, description = "Batch id")),
    responses((status = 200, body = BatchDetail)),
    tag = "Inventory"
)]
fn batch_detail_doc() {}

#[utoipa::path(
    put,
    path = "/api/inventory/batches/{id}",
    params(("id" = String, Path, description = "Batch id")),
    request_body = BatchPayload,
    responses((status = 200, body = BatchDetail), (status = 409, description = "Batch completed")),
    tag = "Inventory"
)]
fn update_batch_doc() {}

#[utoipa::path(
    delete,
    path = "/api/inventory/batches/{id}",
    params(("id" = String, Path, description = "Batch id")),
    responses((status = 200, description = "Deleted"), (status = 409, description = "Batch completed")),
    tag = "Inventory"
)]
fn delete_batch_doc() {}

#[utoipa::path(
    put,
    path = "/api/inventory/batches/{id}/status",
    params(("id" = String, Path, description = "Batch id")),
    request_body = BatchStatusPayload,
    responses((status = 200, body = Batch), (status = 400, description = "Not a one-step forward move")),
    tag = "Inventory"
)]
fn update_batch_status_doc() {}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

#[utoipa::path(get, path = "/api/sales/customers", responses((status = 200, body = [Customer])), tag = "Sales")]
fn list_customers_doc() {}

#[utoipa::path(
    post,
    path = "/api/sales/customers",
    request_body = CustomerPayload,
    responses((status = 201, body = Customer)),
    tag = "Sales"
)]
fn create_customer_doc() {}

#[utoipa::path(
    get,
    path = "/api/sales/customers/{id}",
    params(("id" = String, Path, description = "Customer id")),
    responses((status = 200, body = Customer)),
    tag = "Sales"
)]
fn customer_detail_doc() {}

#[utoipa::path(
    put,
    path = "/api/sales/customers/{id}",
    params(("id" = String, Path, description = "Customer id")),
    request_body = CustomerPayload,
    responses((status = 200, body = Customer)),
    tag = "Sales"
)]
fn update_customer_doc() {}

#[utoipa::path(
    delete,
    path = "/api/sales/customers/{id}",
    params(("id" = String, Path, description = "Customer id")),
    responses((status = 200, description = "Deleted"), (status = 409, description = "Customer has orders")),
    tag = "Sales"
)]
fn delete_customer_doc() {}

#[utoipa::path(
    get,
    path = "/api/sales/orders",
    params(OrderListQuery),
    responses((status = 200, body = [OrderDetail])),
    tag = "Sales"
)]
fn list_orders_doc() {}

#[utoipa::path(
    post,
    path = "/api/sales/orders",
    request_body = OrderPayload,
    responses((status = 201, body = OrderDetail)),
    tag = "Sales"
)]
fn create_order_doc() {}

#[utoipa::path(
    get,
    path = "/api/sales/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses((status = 200, body = OrderDetail)),
    tag = "Sales"
)]
fn order_detail_doc() {}

#[utoipa::path(
    put,
    path = "/api/sales/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    request_body = OrderPayload,
    responses((status = 200, body = OrderDetail), (status = 409, description = "Order is no longer pending")),
    tag = "Sales"
)]
fn update_order_doc() {}

#[utoipa::path(
    delete,
    path = "/api/sales/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses((status = 200, description = "Deleted")),
    tag = "Sales"
)]
fn delete_order_doc() {}

#[utoipa::path(
    put,
    path = "/api/sales/orders/{id}/status",
    params(("id" = String, Path, description = "Order id")),
    request_body = OrderStatusPayload,
    responses((status = 200, body = OrderDetail), (status = 400, description = "Transition not allowed")),
    tag = "Sales"
)]
fn update_order_status_doc() {}
