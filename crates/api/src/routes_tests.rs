//! End-to-end HTTP tests: real router, real services, in-memory
//! repositories. Requests are driven with `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    routing::get,
    Router,
};
use domain::mock::{InMemoryDepartmentRepository, InMemoryEmployeeRepository};
use domain::{Department, Employee};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{routes, with_timeout, AppState};

struct TestApp {
    router: Router,
    employees: InMemoryEmployeeRepository,
    departments: InMemoryDepartmentRepository,
}

fn test_app_with(
    employees: InMemoryEmployeeRepository,
    departments: InMemoryDepartmentRepository,
) -> TestApp {
    let state = AppState::new(Arc::new(employees.clone()), Arc::new(departments.clone()));
    TestApp {
        router: routes(state),
        employees,
        departments,
    }
}

fn test_app() -> TestApp {
    test_app_with(
        InMemoryEmployeeRepository::new(),
        InMemoryDepartmentRepository::new(),
    )
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

fn john() -> Value {
    json!({
        "name": "John",
        "surname": "Doe",
        "phone": "+79998887766",
        "companyId": 1,
        "passportType": "internal",
        "passportNumber": "1234567890"
    })
}

fn seeded_john() -> Employee {
    serde_json::from_value(john()).unwrap()
}

// ============================================================
// POST /employees
// ============================================================

#[tokio::test]
async fn create_employee_returns_201_with_id() {
    let app = test_app();

    let (status, body) = app.send(Method::POST, "/employees", Some(john())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 1 }));
}

#[tokio::test]
async fn create_employee_with_department_links_it() {
    let app = test_app();
    let mut payload = john();
    payload["department"] = json!({ "companyId": 1, "name": "Eng", "phone": "+1" });

    let (status, body) = app.send(Method::POST, "/employees", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/employees/{}", body["id"]);
    let (status, emp) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(emp["departmentId"], json!(1));
    assert_eq!(
        emp["department"],
        json!({ "id": 1, "companyId": 1, "name": "Eng", "phone": "+1" })
    );
}

#[tokio::test]
async fn malformed_body_is_400() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/employees")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "Invalid request payload" }));
}

#[tokio::test]
async fn body_without_content_type_is_still_decoded() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/employees")
        .body(Body::from(john().to_string()))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "id": 1 }));
    assert_eq!(app.employees.stored(1).unwrap().name, "John");
}

#[tokio::test]
async fn missing_required_field_is_400() {
    let app = test_app();
    let mut payload = john();
    payload["passportNumber"] = json!("");

    let (status, body) = app.send(Method::POST, "/employees", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "employee passport number is required");
    assert!(app.employees.calls().is_empty());
}

#[tokio::test]
async fn duplicate_phone_is_409() {
    let app = test_app();
    app.send(Method::POST, "/employees", Some(john())).await;

    let mut second = john();
    second["passportNumber"] = json!("0000000000");
    let (status, body) = app.send(Method::POST, "/employees", Some(second)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "failed to create employee: employee with this phone number already exists"
    );
}

#[tokio::test]
async fn repository_failure_is_500() {
    let app = test_app_with(
        InMemoryEmployeeRepository::failing("connection refused"),
        InMemoryDepartmentRepository::new(),
    );

    let (status, body) = app.send(Method::POST, "/employees", Some(john())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "failed to create employee: connection refused");
}

// ============================================================
// GET / PUT / DELETE /employees/{id}
// ============================================================

#[tokio::test]
async fn get_employee_without_department_has_null_department() {
    let app = test_app();
    let id = app.employees.seed(seeded_john());

    let (status, body) = app.send(Method::GET, &format!("/employees/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "John");
    assert_eq!(body["departmentId"], Value::Null);
    assert_eq!(body["department"], Value::Null);
}

#[tokio::test]
async fn bad_id_is_400() {
    let app = test_app();

    let (status, body) = app.send(Method::GET, "/employees/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid employee ID" }));

    let (status, body) = app.send(Method::GET, "/departments/x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid department ID" }));
}

#[tokio::test]
async fn unknown_employee_is_404() {
    let app = test_app();
    let (status, body) = app.send(Method::GET, "/employees/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "failed to get employee: employee not found");
}

#[tokio::test]
async fn put_applies_partial_update() {
    let app = test_app();
    let id = app.employees.seed(seeded_john());

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/employees/{id}"),
            Some(json!({ "surname": "Smith", "id": 999 })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Employee updated successfully" }));
    let stored = app.employees.stored(id).unwrap();
    assert_eq!(stored.surname, "Smith");
    assert_eq!(stored.name, "John");
    assert_eq!(stored.phone, "+79998887766");
}

#[tokio::test]
async fn put_without_fields_is_400() {
    let app = test_app();
    let id = app.employees.seed(seeded_john());

    let (status, body) = app
        .send(Method::PUT, &format!("/employees/{id}"), Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "failed to update employee: no fields to update");
}

#[tokio::test]
async fn put_and_delete_unknown_employee_are_404() {
    let app = test_app();

    let (status, _) = app
        .send(Method::PUT, "/employees/7", Some(json!({ "name": "Ghost" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.send(Method::DELETE, "/employees/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "failed to delete employee: employee not found");
}

#[tokio::test]
async fn delete_employee_returns_message() {
    let app = test_app();
    let id = app.employees.seed(seeded_john());

    let (status, body) = app.send(Method::DELETE, &format!("/employees/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Employee deleted successfully" }));
    assert!(app.employees.stored(id).is_none());
}

// ============================================================
// listings
// ============================================================

#[tokio::test]
async fn company_listing_hydrates_departments() {
    let app = test_app();
    let dept_id = app.departments.seed(Department {
        company_id: 1,
        name: "Eng".into(),
        phone: "+1".into(),
        ..Default::default()
    });
    app.employees.seed(Employee {
        department_id: Some(dept_id),
        ..seeded_john()
    });
    app.employees.seed(Employee {
        phone: "+70000000000".into(),
        passport_number: "555".into(),
        ..seeded_john()
    });

    let (status, body) = app.send(Method::GET, "/companies/1/employees", None).await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["department"]["name"], "Eng");
    assert_eq!(list[1]["department"], Value::Null);

    let uri = format!("/companies/1/departments/{dept_id}/employees");
    let (status, body) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_listing_is_404_and_bad_ids_are_400() {
    let app = test_app();

    let (status, body) = app.send(Method::GET, "/companies/3/employees", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "failed to get employees: employees not found for company id 3"
    );

    let (status, body) = app.send(Method::GET, "/companies/x/employees", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid company ID");

    let (status, body) = app
        .send(Method::GET, "/companies/1/departments/y/employees", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid department ID");
}

// ============================================================
// departments
// ============================================================

#[tokio::test]
async fn posting_same_department_twice_returns_same_id() {
    let app = test_app();
    let dept = json!({ "companyId": 1, "name": "Eng", "phone": "+1" });

    let (status, first) = app.send(Method::POST, "/departments", Some(dept.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, second) = app.send(Method::POST, "/departments", Some(dept)).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(first, second);
    assert_eq!(app.departments.len(), 1);
}

#[tokio::test]
async fn department_phone_conflict_is_409() {
    let app = test_app();
    app.send(
        Method::POST,
        "/departments",
        Some(json!({ "companyId": 1, "name": "Eng", "phone": "+1" })),
    )
    .await;

    let (status, body) = app
        .send(
            Method::POST,
            "/departments",
            Some(json!({ "companyId": 1, "name": "Sales", "phone": "+1" })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "failed to get or create department: department with this phone number already exists"
    );
}

#[tokio::test]
async fn get_department_round_trips_and_unknown_is_404() {
    let app = test_app();
    let id = app.departments.seed(Department {
        company_id: 2,
        name: "HR".into(),
        phone: "+2".into(),
        ..Default::default()
    });

    let (status, body) = app.send(Method::GET, &format!("/departments/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "companyId": 2, "name": "HR", "phone": "+2" }));

    let (status, _) = app.send(Method::GET, "/departments/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn department_validation_is_400() {
    let app = test_app();
    let (status, body) = app
        .send(Method::POST, "/departments", Some(json!({ "companyId": 1, "phone": "+1" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "department name is required");
}

#[tokio::test]
async fn health_is_ok() {
    let app = test_app();
    let (status, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

// ============================================================
// Middleware
// ============================================================

#[tokio::test]
async fn slow_request_times_out_with_error_body() {
    let router = with_timeout(
        Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "done"
            }),
        ),
        Duration::from_millis(20),
    );
    let request = Request::builder().uri("/slow").body(Body::empty()).unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "request timed out" }));
}
