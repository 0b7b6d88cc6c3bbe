use std::collections::BTreeMap;

use crate::{
    api::{Employee, EmployeePayload, EMPLOYEE_ROLES, EMPLOYEE_STATUSES},
    utils::{
        table::{matches_search, Searchable},
        time::parse_date_input,
    },
};

impl Searchable for Employee {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.full_name.as_str(),
            self.email.as_str(),
            self.employee_code.as_str(),
        ]
    }
}

/// Search box plus the department and status selects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub search: String,
    pub department: String,
    pub status: String,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        if !self.department.is_empty() && employee.department != self.department {
            return false;
        }
        if !self.status.is_empty() && !employee.status.eq_ignore_ascii_case(&self.status) {
            return false;
        }
        matches_search(&employee.search_fields(), &self.search)
    }

    pub fn apply(&self, employees: &[Employee]) -> Vec<Employee> {
        employees
            .iter()
            .filter(|employee| self.matches(employee))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeTiles {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub by_department: Vec<(String, usize)>,
}

pub fn employee_tiles(employees: &[Employee]) -> EmployeeTiles {
    let active = employees.iter().filter(|e| e.is_active()).count();
    let mut departments: BTreeMap<String, usize> = BTreeMap::new();
    for employee in employees {
        let department = employee.department.trim();
        let key = if department.is_empty() {
            "Unassigned".to_string()
        } else {
            department.to_string()
        };
        *departments.entry(key).or_default() += 1;
    }
    EmployeeTiles {
        total: employees.len(),
        active,
        inactive: employees.len() - active,
        by_department: departments.into_iter().collect(),
    }
}

/// Distinct non-empty departments, sorted, for the filter select.
pub fn departments(employees: &[Employee]) -> Vec<String> {
    let mut names: Vec<String> = employees
        .iter()
        .map(|e| e.department.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFormState {
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub role: String,
    pub status: String,
    pub hire_date: String,
    pub avatar_url: String,
    pub signature_url: String,
}

impl Default for EmployeeFormState {
    fn default() -> Self {
        Self {
            employee_code: String::new(),
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            department: String::new(),
            position: String::new(),
            role: EMPLOYEE_ROLES[0].to_string(),
            status: EMPLOYEE_STATUSES[0].to_string(),
            hire_date: String::new(),
            avatar_url: String::new(),
            signature_url: String::new(),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl EmployeeFormState {
    pub fn from_employee(employee: &Employee) -> Self {
        let payload = EmployeePayload::from(employee);
        Self {
            employee_code: payload.employee_code,
            full_name: payload.full_name,
            email: payload.email,
            phone: payload.phone.unwrap_or_default(),
            department: payload.department,
            position: payload.position,
            role: payload.role,
            status: payload.status,
            hire_date: payload
                .hire_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            avatar_url: payload.avatar_url.unwrap_or_default(),
            signature_url: payload.signature_url.unwrap_or_default(),
        }
    }

    pub fn to_payload(&self) -> Result<EmployeePayload, String> {
        let required = [
            ("Employee code", &self.employee_code),
            ("Full name", &self.full_name),
            ("Email", &self.email),
            ("Department", &self.department),
            ("Position", &self.position),
        ];
        if let Some((label, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(format!("{} is required", label));
        }
        let email = self.email.trim();
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err("Email address is not valid".into());
        }
        if !EMPLOYEE_ROLES.contains(&self.role.as_str()) {
            return Err(format!("Unknown role {:?}", self.role));
        }
        if !EMPLOYEE_STATUSES.contains(&self.status.as_str()) {
            return Err(format!("Unknown status {:?}", self.status));
        }
        Ok(EmployeePayload {
            employee_code: self.employee_code.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            email: email.to_string(),
            phone: optional(&self.phone),
            department: self.department.trim().to_string(),
            position: self.position.trim().to_string(),
            role: self.role.clone(),
            status: self.status.clone(),
            hire_date: parse_date_input(&self.hire_date)?,
            avatar_url: optional(&self.avatar_url),
            signature_url: optional(&self.signature_url),
        })
    }
}
