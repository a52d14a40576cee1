//! Employee use cases.
//!
//! `EmployeeService` owns the only cross-entity logic in the system:
//! 1. On create/update, an embedded department is resolved via get-or-create
//!    and its id replaces `department_id`.
//! 2. On every read path, employees that reference a department get it
//!    attached as `department`.

use std::collections::HashMap;
use std::sync::Arc;

use domain::{Department, DepartmentRepository, DomainResult, Employee, EmployeeRepository};
use tracing::{debug, instrument};

pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
    departments: Arc<dyn DepartmentRepository>,
}

impl EmployeeService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        departments: Arc<dyn DepartmentRepository>,
    ) -> Self {
        Self {
            employees,
            departments,
        }
    }

    #[instrument(skip(self, emp), fields(company_id = emp.company_id))]
    pub async fn create_employee(&self, mut emp: Employee) -> DomainResult<i32> {
        self.resolve_department(&mut emp).await?;

        let id = self
            .employees
            .create(&emp)
            .await
            .map_err(|e| e.context("failed to create employee"))?;
        debug!(employee_id = id, "employee created");
        Ok(id)
    }

    pub async fn get_employee(&self, id: i32) -> DomainResult<Employee> {
        let emp = self
            .employees
            .get_by_id(id)
            .await
            .map_err(|e| e.context("failed to get employee"))?;

        let mut hydrated = [emp];
        self.hydrate(&mut hydrated).await?;
        let [emp] = hydrated;
        Ok(emp)
    }

    /// Apply a partial update. Only non-empty fields of `emp` are written.
    #[instrument(skip(self, emp), fields(employee_id = emp.id))]
    pub async fn update_employee(&self, mut emp: Employee) -> DomainResult<()> {
        self.resolve_department(&mut emp).await?;

        self.employees
            .update(&emp)
            .await
            .map_err(|e| e.context("failed to update employee"))
    }

    pub async fn delete_employee(&self, id: i32) -> DomainResult<()> {
        self.employees
            .delete(id)
            .await
            .map_err(|e| e.context("failed to delete employee"))
    }

    pub async fn get_company_employees(&self, company_id: i32) -> DomainResult<Vec<Employee>> {
        let mut employees = self
            .employees
            .get_by_company(company_id)
            .await
            .map_err(|e| e.context("failed to get employees"))?;
        self.hydrate(&mut employees).await?;
        Ok(employees)
    }

    pub async fn get_department_employees(
        &self,
        company_id: i32,
        department_id: i32,
    ) -> DomainResult<Vec<Employee>> {
        let mut employees = self
            .employees
            .get_by_department(company_id, department_id)
            .await
            .map_err(|e| e.context("failed to get employees"))?;
        self.hydrate(&mut employees).await?;
        Ok(employees)
    }

    async fn resolve_department(&self, emp: &mut Employee) -> DomainResult<()> {
        if let Some(dept) = &emp.department {
            let id = self
                .departments
                .get_or_create(dept)
                .await
                .map_err(|e| e.context("failed to get or create department"))?;
            emp.department_id = Some(id);
        }
        Ok(())
    }

    /// Attach departments to every employee with a `department_id`.
    /// Each distinct department is fetched once per call.
    async fn hydrate(&self, employees: &mut [Employee]) -> DomainResult<()> {
        let mut seen: HashMap<i32, Department> = HashMap::new();

        for emp in employees.iter_mut() {
            let Some(dept_id) = emp.department_id else {
                continue;
            };

            let dept = match seen.get(&dept_id) {
                Some(dept) => dept.clone(),
                None => {
                    let dept = self
                        .departments
                        .get_by_id(dept_id)
                        .await
                        .map_err(|e| e.context("failed to get department"))?;
                    seen.insert(dept_id, dept.clone());
                    dept
                }
            };
            emp.department = Some(dept);
        }

        Ok(())
    }
}
