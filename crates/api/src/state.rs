//! Shared handler state.

use std::sync::Arc;

use domain::{DepartmentRepository, EmployeeRepository};
use service::{DepartmentService, EmployeeService};

#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<EmployeeService>,
    pub departments: Arc<DepartmentService>,
}

impl AppState {
    /// Wire both services over the given repositories.
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        departments: Arc<dyn DepartmentRepository>,
    ) -> Self {
        Self {
            employees: Arc::new(EmployeeService::new(employees, departments.clone())),
            departments: Arc::new(DepartmentService::new(departments)),
        }
    }
}
