//! Department use cases.

use std::sync::Arc;

use domain::{Department, DepartmentRepository, DomainResult};
use tracing::{debug, instrument};

pub struct DepartmentService {
    repo: Arc<dyn DepartmentRepository>,
}

impl DepartmentService {
    pub fn new(repo: Arc<dyn DepartmentRepository>) -> Self {
        Self { repo }
    }

    /// Return the id of the department named `dept.name` in
    /// `dept.company_id`, creating it first when it does not exist.
    #[instrument(skip(self, dept), fields(company_id = dept.company_id, name = %dept.name))]
    pub async fn get_or_create(&self, dept: &Department) -> DomainResult<i32> {
        let id = self
            .repo
            .get_or_create(dept)
            .await
            .map_err(|e| e.context("failed to get or create department"))?;
        debug!(department_id = id, "department resolved");
        Ok(id)
    }

    pub async fn get_department(&self, id: i32) -> DomainResult<Department> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| e.context("failed to get department"))
    }
}
