#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod fixtures {
    use crate::api::{
        AttendanceRecord, Component, Customer, Employee, KssAssignment, KssLesson, Order,
        OrderItem, Product, StatusField, Supplier,
    };
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    pub fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    pub fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn employee(n: u128, name: &str, department: &str, status: &str) -> Employee {
        Employee {
            id: id(n),
            employee_code: format!("EMP-{:03}", n),
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: None,
            department: department.to_string(),
            position: "Staff".into(),
            role: "staff".into(),
            status: status.to_string(),
            hire_date: None,
            avatar_url: None,
            signature_url: None,
            created_at: stamp(),
            updated_at: stamp(),
        }
    }

    pub fn attendance(n: u128, employee: u128, on: NaiveDate, status: StatusField) -> AttendanceRecord {
        AttendanceRecord {
            id: id(n),
            employee_id: id(employee),
            date: on,
            check_in: None,
            check_out: None,
            status,
            note: None,
            created_at: stamp(),
        }
    }

    pub fn lesson(n: u128, module: u128, minutes: i32) -> KssLesson {
        KssLesson {
            id: id(n),
            module_id: id(module),
            title: format!("Lesson {}", n),
            content: None,
            position: n as i32,
            duration_minutes: minutes,
            created_at: stamp(),
        }
    }

    pub fn assignment(n: u128, module: u128, status: &str, completed: &[u128]) -> KssAssignment {
        KssAssignment {
            id: id(n),
            module_id: id(module),
            employee_id: id(900 + n),
            status: status.to_string(),
            completed_lesson_ids: completed.iter().map(|c| id(*c)).collect(),
            score: None,
            due_date: None,
            assigned_at: stamp(),
            completed_at: None,
        }
    }

    pub fn supplier(n: u128, name: &str) -> Supplier {
        Supplier {
            id: id(n),
            name: name.to_string(),
            contact_name: None,
            email: None,
            phone: None,
            address: None,
            created_at: stamp(),
        }
    }

    pub fn component(n: u128, sku: &str, stock: i32, reorder: i32, unit_cost: f64) -> Component {
        Component {
            id: id(n),
            sku: sku.to_string(),
            name: format!("Component {}", sku),
            unit: "pcs".into(),
            stock_quantity: stock,
            reorder_level: reorder,
            unit_cost,
            supplier_id: None,
            image_url: None,
            created_at: stamp(),
            updated_at: stamp(),
        }
    }

    pub fn product(n: u128, sku: &str, price: f64) -> Product {
        Product {
            id: id(n),
            sku: sku.to_string(),
            name: format!("Product {}", sku),
            description: None,
            price,
            image_url: None,
            created_at: stamp(),
            updated_at: stamp(),
        }
    }

    pub fn customer(n: u128, name: &str) -> Customer {
        Customer {
            id: id(n),
            name: name.to_string(),
            email: None,
            phone: None,
            company: None,
            address: None,
            created_at: stamp(),
        }
    }

    pub fn order(n: u128, customer: u128, status: &str, items: Vec<OrderItem>) -> Order {
        Order {
            id: id(n),
            order_number: format!("SO-20250304-{:06X}", n),
            customer_id: id(customer),
            order_date: date(2025, 3, 4),
            status: status.to_string(),
            discount_percent: 0.0,
            tax_percent: 0.0,
            notes: None,
            items,
            created_at: stamp(),
            updated_at: stamp(),
        }
    }

    pub fn item(product: u128, quantity: i32, unit_price: f64) -> OrderItem {
        OrderItem {
            product_id: id(product),
            quantity,
            unit_price,
        }
    }
}
