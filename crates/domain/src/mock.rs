//! In-memory repository doubles.
//!
//! They enforce the same uniqueness rules and return the same errors as the
//! Postgres repositories, and record every call so tests can assert on how
//! the service layer drove them.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{
    DEPARTMENT_NOT_FOUND, DEPARTMENT_PHONE_TAKEN, EMPLOYEE_NOT_FOUND,
    EMPLOYEE_PASSPORT_TAKEN, EMPLOYEE_PHONE_TAKEN, NO_FIELDS_TO_UPDATE,
};
use crate::{Department, DepartmentRepository, DomainError, DomainResult, Employee, EmployeeRepository};

/// One recorded repository call, e.g. `get_by_id(42)`.
pub type Call = String;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

#[derive(Default)]
struct DepartmentTable {
    rows: BTreeMap<i32, Department>,
    next_id: i32,
}

/// In-memory [`DepartmentRepository`].
#[derive(Default, Clone)]
pub struct InMemoryDepartmentRepository {
    table: Arc<Mutex<DepartmentTable>>,
    /// Error returned by every call when set.
    failure: Option<String>,
    /// All calls seen by this repository (in call order).
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl InMemoryDepartmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every call fails with `Internal(msg)`.
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            failure: Some(msg.into()),
            ..Self::default()
        }
    }

    /// Insert a row directly, bypassing get-or-create. Returns its id.
    pub fn seed(&self, mut dept: Department) -> i32 {
        let mut table = lock(&self.table);
        table.next_id += 1;
        dept.id = table.next_id;
        let id = dept.id;
        table.rows.insert(id, dept);
        id
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    /// Number of recorded calls whose name starts with `method`.
    pub fn call_count(&self, method: &str) -> usize {
        lock(&self.calls).iter().filter(|c| c.starts_with(method)).count()
    }

    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&self, call: String) -> DomainResult<()> {
        lock(&self.calls).push(call);
        match &self.failure {
            Some(msg) => Err(DomainError::Internal(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn get_or_create(&self, dept: &Department) -> DomainResult<i32> {
        self.record(format!("get_or_create({}, {})", dept.company_id, dept.name))?;

        let mut table = lock(&self.table);
        if let Some(existing) = table
            .rows
            .values()
            .find(|d| d.company_id == dept.company_id && d.name == dept.name)
        {
            return Ok(existing.id);
        }
        if table.rows.values().any(|d| d.phone == dept.phone) {
            return Err(DomainError::AlreadyExists(DEPARTMENT_PHONE_TAKEN.into()));
        }

        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(
            id,
            Department {
                id,
                ..dept.clone()
            },
        );
        Ok(id)
    }

    async fn get_by_id(&self, id: i32) -> DomainResult<Department> {
        self.record(format!("get_by_id({id})"))?;
        lock(&self.table)
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(DEPARTMENT_NOT_FOUND.into()))
    }
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

#[derive(Default)]
struct EmployeeTable {
    rows: BTreeMap<i32, Employee>,
    next_id: i32,
}

impl EmployeeTable {
    fn check_unique(&self, emp: &Employee, skip_id: i32) -> DomainResult<()> {
        let others = || self.rows.values().filter(move |e| e.id != skip_id);
        if !emp.phone.is_empty() && others().any(|e| e.phone == emp.phone) {
            return Err(DomainError::AlreadyExists(EMPLOYEE_PHONE_TAKEN.into()));
        }
        if !emp.passport_number.is_empty()
            && others().any(|e| e.passport_number == emp.passport_number)
        {
            return Err(DomainError::AlreadyExists(EMPLOYEE_PASSPORT_TAKEN.into()));
        }
        Ok(())
    }
}

/// In-memory [`EmployeeRepository`].
#[derive(Default, Clone)]
pub struct InMemoryEmployeeRepository {
    table: Arc<Mutex<EmployeeTable>>,
    failure: Option<String>,
    /// All calls seen by this repository (in call order).
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every call fails with `Internal(msg)`.
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            failure: Some(msg.into()),
            ..Self::default()
        }
    }

    /// Insert a row directly. The embedded department is dropped, as the
    /// real table would. Returns the new id.
    pub fn seed(&self, mut emp: Employee) -> i32 {
        let mut table = lock(&self.table);
        table.next_id += 1;
        emp.id = table.next_id;
        emp.department = None;
        let id = emp.id;
        table.rows.insert(id, emp);
        id
    }

    /// The stored row, without going through the recorded API.
    pub fn stored(&self, id: i32) -> Option<Employee> {
        lock(&self.table).rows.get(&id).cloned()
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        lock(&self.calls).iter().filter(|c| c.starts_with(method)).count()
    }

    fn record(&self, call: String) -> DomainResult<()> {
        lock(&self.calls).push(call);
        match &self.failure {
            Some(msg) => Err(DomainError::Internal(msg.clone())),
            None => Ok(()),
        }
    }

    fn select<F>(&self, filter: F) -> Vec<Employee>
    where
        F: Fn(&Employee) -> bool,
    {
        lock(&self.table)
            .rows
            .values()
            .filter(|e| filter(e))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn create(&self, emp: &Employee) -> DomainResult<i32> {
        self.record(format!("create({})", emp.phone))?;

        let mut table = lock(&self.table);
        table.check_unique(emp, 0)?;
        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(
            id,
            Employee {
                id,
                department: None,
                ..emp.clone()
            },
        );
        Ok(id)
    }

    async fn get_by_id(&self, id: i32) -> DomainResult<Employee> {
        self.record(format!("get_by_id({id})"))?;
        lock(&self.table)
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(EMPLOYEE_NOT_FOUND.into()))
    }

    async fn update(&self, emp: &Employee) -> DomainResult<()> {
        self.record(format!("update({})", emp.id))?;
        if !emp.has_updates() {
            return Err(DomainError::Validation(NO_FIELDS_TO_UPDATE.into()));
        }

        let mut table = lock(&self.table);
        table.check_unique(emp, emp.id)?;
        let row = table
            .rows
            .get_mut(&emp.id)
            .ok_or_else(|| DomainError::NotFound(EMPLOYEE_NOT_FOUND.into()))?;

        if !emp.name.is_empty() {
            row.name = emp.name.clone();
        }
        if !emp.surname.is_empty() {
            row.surname = emp.surname.clone();
        }
        if !emp.phone.is_empty() {
            row.phone = emp.phone.clone();
        }
        if emp.company_id != 0 {
            row.company_id = emp.company_id;
        }
        if emp.department_id.is_some() {
            row.department_id = emp.department_id;
        }
        if !emp.passport_type.is_empty() {
            row.passport_type = emp.passport_type.clone();
        }
        if !emp.passport_number.is_empty() {
            row.passport_number = emp.passport_number.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.record(format!("delete({id})"))?;
        lock(&self.table)
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(EMPLOYEE_NOT_FOUND.into()))
    }

    async fn get_by_company(&self, company_id: i32) -> DomainResult<Vec<Employee>> {
        self.record(format!("get_by_company({company_id})"))?;
        let rows = self.select(|e| e.company_id == company_id);
        if rows.is_empty() {
            return Err(DomainError::employees_not_found_for_company(company_id));
        }
        Ok(rows)
    }

    async fn get_by_department(
        &self,
        company_id: i32,
        department_id: i32,
    ) -> DomainResult<Vec<Employee>> {
        self.record(format!("get_by_department({company_id}, {department_id})"))?;
        let rows = self.select(|e| e.company_id == company_id && e.department_id == Some(department_id));
        if rows.is_empty() {
            return Err(DomainError::employees_not_found_for_department(
                company_id,
                department_id,
            ));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(phone: &str, passport: &str) -> Employee {
        Employee {
            name: "John".into(),
            surname: "Doe".into(),
            phone: phone.into(),
            company_id: 1,
            passport_type: "internal".into(),
            passport_number: passport.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent_on_natural_key() {
        let repo = InMemoryDepartmentRepository::new();
        let dept = Department {
            company_id: 1,
            name: "Eng".into(),
            phone: "+1".into(),
            ..Default::default()
        };

        let first = repo.get_or_create(&dept).await.unwrap();
        let second = repo.get_or_create(&dept).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.call_count("get_or_create"), 2);
    }

    #[tokio::test]
    async fn duplicate_phone_is_a_conflict() {
        let repo = InMemoryEmployeeRepository::new();
        repo.create(&employee("+7", "A1")).await.unwrap();

        let err = repo.create(&employee("+7", "B2")).await.unwrap_err();
        assert_eq!(err, DomainError::AlreadyExists(EMPLOYEE_PHONE_TAKEN.into()));
    }

    #[tokio::test]
    async fn failing_repository_records_then_fails() {
        let repo = InMemoryEmployeeRepository::failing("db error");
        let err = repo.delete(3).await.unwrap_err();

        assert_eq!(err, DomainError::Internal("db error".into()));
        assert_eq!(repo.calls(), vec!["delete(3)".to_string()]);
    }
}
