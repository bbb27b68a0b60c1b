//! Contacts API handlers.
//!
//! ```text
//! GET /contact/all
//! POST /contact {"full_name":"Jane Doe","email":"jane@example.com","phone":"555-0100","address":"1 High Street"}
//! GET /contact/42
//! PUT /contact/42 {"phone":"555-0199"}
//! DELETE /contact/42
//! ```
//!
//! Every mutation answers with the full refreshed collection so clients can
//! replace their local copy in one round trip.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::HttpState;
use crate::models::{
    ApiResult, Contact, ContactChanges, Error, ErrorBody, MissingFields, NewContact,
};
use crate::persistence::RepositoryError;

/// Creation request body for `POST /contact`.
///
/// Every field is required; presence is validated before storage is touched.
///
/// Example JSON:
/// `{"full_name":"Jane Doe","email":"jane@example.com","phone":"555-0100","address":"1 High Street"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateContactRequest {
    /// Display name for the new contact.
    #[schema(example = "Jane Doe")]
    pub full_name: Option<String>,
    /// Email address for the new contact.
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    /// Phone number for the new contact.
    #[schema(example = "555-0100")]
    pub phone: Option<String>,
    /// Postal address for the new contact.
    #[schema(example = "1 High Street")]
    pub address: Option<String>,
}

impl TryFrom<CreateContactRequest> for NewContact {
    type Error = MissingFields;

    fn try_from(value: CreateContactRequest) -> Result<Self, Self::Error> {
        match (value.full_name, value.email, value.phone, value.address) {
            (Some(full_name), Some(email), Some(phone), Some(address)) => Ok(Self {
                full_name,
                email,
                phone,
                address,
            }),
            (full_name, email, phone, address) => {
                let mut missing = Vec::new();
                if full_name.is_none() {
                    missing.push("full_name");
                }
                if email.is_none() {
                    missing.push("email");
                }
                if phone.is_none() {
                    missing.push("phone");
                }
                if address.is_none() {
                    missing.push("address");
                }
                Err(MissingFields(missing))
            }
        }
    }
}

/// List every contact in id order.
#[utoipa::path(
    get,
    path = "/contact/all",
    responses(
        (status = 200, description = "Every stored contact in id order", body = [Contact]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contact/all")]
pub async fn list_contacts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Contact>>> {
    let contacts = state.contacts.list().await.map_err(map_repository_error)?;
    Ok(web::Json(contacts))
}

/// Create a contact after validating that every field is present.
#[utoipa::path(
    post,
    path = "/contact",
    request_body = CreateContactRequest,
    responses(
        (status = 200, description = "Contact stored; refreshed collection returned", body = [Contact]),
        (status = 400, description = "Body absent or required fields missing", body = ErrorBody),
        (status = 409, description = "Name, email, or phone already in use", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contact")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    payload: web::Json<CreateContactRequest>,
) -> ApiResult<web::Json<Vec<Contact>>> {
    let new_contact = NewContact::try_from(payload.into_inner()).map_err(map_missing_fields)?;
    let created = state
        .contacts
        .insert(&new_contact)
        .await
        .map_err(map_repository_error)?;
    info!(contact_id = created.id, "contact created");
    let contacts = state.contacts.list().await.map_err(map_repository_error)?;
    Ok(web::Json(contacts))
}

/// Fetch a single contact by id.
#[utoipa::path(
    get,
    path = "/contact/{contact_id}",
    params(("contact_id" = i32, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Matching contact", body = Contact),
        (status = 404, description = "No contact matches the id", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contact/{contact_id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Contact>> {
    let contact_id = path.into_inner();
    let contact = state
        .contacts
        .find_by_id(contact_id)
        .await
        .map_err(map_repository_error)?;
    contact
        .map(web::Json)
        .ok_or_else(|| Error::not_found("contact not found"))
}

/// Apply a partial update to an existing contact.
///
/// Only the provided fields change; unknown keys are ignored and an empty
/// body is a no-op.
#[utoipa::path(
    put,
    path = "/contact/{contact_id}",
    params(("contact_id" = i32, Path, description = "Contact identifier")),
    request_body = ContactChanges,
    responses(
        (status = 200, description = "Contact updated; refreshed collection returned", body = [Contact]),
        (status = 400, description = "Body absent or malformed", body = ErrorBody),
        (status = 404, description = "No contact matches the id", body = ErrorBody),
        (status = 409, description = "Name, email, or phone already in use", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contact/{contact_id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<ContactChanges>,
) -> ApiResult<web::Json<Vec<Contact>>> {
    let contact_id = path.into_inner();
    let changes = payload.into_inner();
    let updated = state
        .contacts
        .update(contact_id, &changes)
        .await
        .map_err(map_repository_error)?;
    if updated.is_none() {
        return Err(Error::not_found("contact not found"));
    }
    info!(contact_id, "contact updated");
    let contacts = state.contacts.list().await.map_err(map_repository_error)?;
    Ok(web::Json(contacts))
}

/// Delete a contact permanently.
#[utoipa::path(
    delete,
    path = "/contact/{contact_id}",
    params(("contact_id" = i32, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact removed; refreshed collection returned", body = [Contact]),
        (status = 404, description = "No contact matches the id", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contact/{contact_id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<Contact>>> {
    let contact_id = path.into_inner();
    let deleted = state
        .contacts
        .delete(contact_id)
        .await
        .map_err(map_repository_error)?;
    if !deleted {
        return Err(Error::not_found("contact not found"));
    }
    info!(contact_id, "contact deleted");
    let contacts = state.contacts.list().await.map_err(map_repository_error)?;
    Ok(web::Json(contacts))
}

fn map_missing_fields(err: MissingFields) -> Error {
    Error::invalid_request(err.to_string())
}

fn map_repository_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Conflict { message } => Error::conflict(message),
        RepositoryError::Connection { message } | RepositoryError::Query { message } => {
            Error::storage_failure(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{json_error_handler, path_error_handler};
    use crate::persistence::ContactRepository;
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, web, App};
    use async_trait::async_trait;
    use rstest::rstest;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// In-memory repository enforcing the same uniqueness rules as the
    /// SQLite schema.
    struct StubContactRepository {
        state: Mutex<StubState>,
    }

    struct StubState {
        contacts: Vec<Contact>,
        next_id: i32,
    }

    impl StubContactRepository {
        fn new() -> Self {
            Self::with_contacts(Vec::new())
        }

        fn with_contacts(contacts: Vec<Contact>) -> Self {
            let next_id = contacts.iter().map(|contact| contact.id).max().unwrap_or(0) + 1;
            Self {
                state: Mutex::new(StubState { contacts, next_id }),
            }
        }
    }

    fn uniqueness_conflict(
        existing: &[Contact],
        skip_id: Option<i32>,
        full_name: &str,
        email: &str,
        phone: &str,
    ) -> Option<RepositoryError> {
        for contact in existing.iter().filter(|contact| Some(contact.id) != skip_id) {
            let field = if contact.full_name == full_name {
                Some("full_name")
            } else if contact.email == email {
                Some("email")
            } else if contact.phone == phone {
                Some("phone")
            } else {
                None
            };
            if let Some(field) = field {
                return Some(RepositoryError::conflict(format!(
                    "a contact with this {field} already exists"
                )));
            }
        }
        None
    }

    #[async_trait]
    impl ContactRepository for StubContactRepository {
        async fn list(&self) -> Result<Vec<Contact>, RepositoryError> {
            Ok(self.state.lock().expect("stub state").contacts.clone())
        }

        async fn insert(&self, contact: &NewContact) -> Result<Contact, RepositoryError> {
            let mut state = self.state.lock().expect("stub state");
            if let Some(conflict) = uniqueness_conflict(
                &state.contacts,
                None,
                &contact.full_name,
                &contact.email,
                &contact.phone,
            ) {
                return Err(conflict);
            }
            let created = Contact {
                id: state.next_id,
                full_name: contact.full_name.clone(),
                email: contact.email.clone(),
                phone: contact.phone.clone(),
                address: contact.address.clone(),
            };
            state.next_id += 1;
            state.contacts.push(created.clone());
            Ok(created)
        }

        async fn find_by_id(&self, contact_id: i32) -> Result<Option<Contact>, RepositoryError> {
            Ok(self
                .state
                .lock()
                .expect("stub state")
                .contacts
                .iter()
                .find(|contact| contact.id == contact_id)
                .cloned())
        }

        async fn update(
            &self,
            contact_id: i32,
            changes: &ContactChanges,
        ) -> Result<Option<Contact>, RepositoryError> {
            let mut state = self.state.lock().expect("stub state");
            let Some(position) = state
                .contacts
                .iter()
                .position(|contact| contact.id == contact_id)
            else {
                return Ok(None);
            };
            let mut candidate = state.contacts[position].clone();
            if let Some(full_name) = &changes.full_name {
                candidate.full_name = full_name.clone();
            }
            if let Some(email) = &changes.email {
                candidate.email = email.clone();
            }
            if let Some(phone) = &changes.phone {
                candidate.phone = phone.clone();
            }
            if let Some(address) = &changes.address {
                candidate.address = address.clone();
            }
            if let Some(conflict) = uniqueness_conflict(
                &state.contacts,
                Some(contact_id),
                &candidate.full_name,
                &candidate.email,
                &candidate.phone,
            ) {
                return Err(conflict);
            }
            state.contacts[position] = candidate.clone();
            Ok(Some(candidate))
        }

        async fn delete(&self, contact_id: i32) -> Result<bool, RepositoryError> {
            let mut state = self.state.lock().expect("stub state");
            let before = state.contacts.len();
            state.contacts.retain(|contact| contact.id != contact_id);
            Ok(state.contacts.len() < before)
        }
    }

    fn jane() -> Contact {
        Contact {
            id: 1,
            full_name: "Jane Doe".to_owned(),
            email: "jane@example.com".to_owned(),
            phone: "555-0100".to_owned(),
            address: "1 High Street".to_owned(),
        }
    }

    fn john() -> Contact {
        Contact {
            id: 2,
            full_name: "John Roe".to_owned(),
            email: "john@example.com".to_owned(),
            phone: "555-0101".to_owned(),
            address: "2 Low Street".to_owned(),
        }
    }

    fn test_app(
        repository: Arc<dyn ContactRepository>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::new(repository)))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .service(list_contacts)
            .service(create_contact)
            .service(get_contact)
            .service(update_contact)
            .service(delete_contact)
    }

    async fn read_json(response: actix_web::dev::ServiceResponse) -> Value {
        let body = actix_test::read_body(response).await;
        serde_json::from_slice(&body).expect("response JSON")
    }

    #[rstest]
    #[case(json!({}), &["full_name", "email", "phone", "address"])]
    #[case(
        json!({"email": "jane@example.com", "phone": "555-0100", "address": "1 High Street"}),
        &["full_name"]
    )]
    #[case(
        json!({"full_name": null, "email": "jane@example.com", "phone": "555-0100", "address": "1 High Street"}),
        &["full_name"]
    )]
    fn missing_fields_are_listed_in_declaration_order(
        #[case] body: Value,
        #[case] expected: &[&str],
    ) {
        let request: CreateContactRequest =
            serde_json::from_value(body).expect("valid request shape");
        let error = NewContact::try_from(request).expect_err("fields are missing");
        assert_eq!(error.0, expected);
    }

    #[test]
    fn complete_request_converts_to_new_contact() {
        let request = CreateContactRequest {
            full_name: Some("Jane Doe".to_owned()),
            email: Some("jane@example.com".to_owned()),
            phone: Some("555-0100".to_owned()),
            address: Some("1 High Street".to_owned()),
        };
        let new_contact = NewContact::try_from(request).expect("all fields present");
        assert_eq!(new_contact.full_name, "Jane Doe");
        assert_eq!(new_contact.address, "1 High Street");
    }

    #[actix_web::test]
    async fn create_returns_the_refreshed_collection() {
        let app = actix_test::init_service(test_app(Arc::new(StubContactRepository::new()))).await;

        let request = actix_test::TestRequest::post()
            .uri("/contact")
            .set_json(json!({
                "full_name": "Jane Doe",
                "email": "jane@example.com",
                "phone": "555-0100",
                "address": "1 High Street",
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let value = read_json(response).await;
        let collection = value.as_array().expect("collection array");
        assert_eq!(collection.len(), 1);
        let first = &collection[0];
        assert_eq!(first.get("id").and_then(Value::as_i64), Some(1));
        assert_eq!(
            first.get("full_name").and_then(Value::as_str),
            Some("Jane Doe")
        );
    }

    #[rstest]
    #[case(json!({"email": "jane@example.com", "phone": "555-0100", "address": "1 High Street"}), "full_name")]
    #[case(json!({"full_name": "Jane Doe", "email": "jane@example.com"}), "phone, address")]
    #[actix_web::test]
    async fn create_rejects_incomplete_bodies_without_storing(
        #[case] body: Value,
        #[case] expected_fragment: &str,
    ) {
        let app = actix_test::init_service(test_app(Arc::new(StubContactRepository::new()))).await;

        let request = actix_test::TestRequest::post()
            .uri("/contact")
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error = read_json(response).await;
        let message = error
            .get("error")
            .and_then(Value::as_str)
            .expect("error message");
        assert!(message.contains(expected_fragment), "got: {message}");
        assert_eq!(error.get("status_code").and_then(Value::as_u64), Some(400));

        let listing = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/contact/all")
                .to_request(),
        )
        .await;
        let collection = read_json(listing).await;
        assert_eq!(collection.as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn create_rejects_unparseable_bodies() {
        let app = actix_test::init_service(test_app(Arc::new(StubContactRepository::new()))).await;

        let request = actix_test::TestRequest::post()
            .uri("/contact")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error = read_json(response).await;
        let message = error
            .get("error")
            .and_then(Value::as_str)
            .expect("error message");
        assert!(message.starts_with("invalid request body"), "got: {message}");
    }

    #[actix_web::test]
    async fn create_conflicts_when_email_is_taken() {
        let repository = Arc::new(StubContactRepository::with_contacts(vec![jane()]));
        let app = actix_test::init_service(test_app(repository)).await;

        let request = actix_test::TestRequest::post()
            .uri("/contact")
            .set_json(json!({
                "full_name": "Janet Doe",
                "email": "jane@example.com",
                "phone": "555-0177",
                "address": "9 Side Street",
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let error = read_json(response).await;
        assert_eq!(
            error.get("error").and_then(Value::as_str),
            Some("a contact with this email already exists")
        );
        assert_eq!(error.get("status_code").and_then(Value::as_u64), Some(409));
    }

    #[actix_web::test]
    async fn get_returns_the_matching_contact() {
        let repository = Arc::new(StubContactRepository::with_contacts(vec![jane(), john()]));
        let app = actix_test::init_service(test_app(repository)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/contact/2").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let contact = read_json(response).await;
        assert_eq!(
            contact.get("full_name").and_then(Value::as_str),
            Some("John Roe")
        );
        assert_eq!(
            contact.get("address").and_then(Value::as_str),
            Some("2 Low Street")
        );
    }

    #[rstest]
    #[case("/contact/999")]
    #[case("/contact/abc")]
    #[actix_web::test]
    async fn get_unknown_or_malformed_ids_report_not_found(#[case] uri: &str) {
        let repository = Arc::new(StubContactRepository::with_contacts(vec![jane()]));
        let app = actix_test::init_service(test_app(repository)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(uri).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let error = read_json(response).await;
        assert_eq!(
            error.get("error").and_then(Value::as_str),
            Some("contact not found")
        );
        assert_eq!(error.get("status_code").and_then(Value::as_u64), Some(404));
    }

    #[actix_web::test]
    async fn update_changes_only_the_provided_fields() {
        let repository = Arc::new(StubContactRepository::with_contacts(vec![jane()]));
        let app = actix_test::init_service(test_app(repository)).await;

        let request = actix_test::TestRequest::put()
            .uri("/contact/1")
            .set_json(json!({"phone": "555-0199"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let collection = read_json(response).await;
        let first = &collection.as_array().expect("collection array")[0];
        assert_eq!(first.get("phone").and_then(Value::as_str), Some("555-0199"));
        assert_eq!(
            first.get("full_name").and_then(Value::as_str),
            Some("Jane Doe")
        );
        assert_eq!(
            first.get("email").and_then(Value::as_str),
            Some("jane@example.com")
        );
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"nickname": "JD"}))]
    #[actix_web::test]
    async fn update_treats_empty_or_unknown_keys_as_a_noop(#[case] body: Value) {
        let repository = Arc::new(StubContactRepository::with_contacts(vec![jane()]));
        let app = actix_test::init_service(test_app(repository)).await;

        let request = actix_test::TestRequest::put()
            .uri("/contact/1")
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let collection = read_json(response).await;
        let first = &collection.as_array().expect("collection array")[0];
        assert_eq!(first.get("phone").and_then(Value::as_str), Some("555-0100"));
    }

    #[actix_web::test]
    async fn update_unknown_id_reports_not_found() {
        let app = actix_test::init_service(test_app(Arc::new(StubContactRepository::new()))).await;

        let request = actix_test::TestRequest::put()
            .uri("/contact/41")
            .set_json(json!({"phone": "555-0199"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_conflicts_when_phone_is_taken() {
        let repository = Arc::new(StubContactRepository::with_contacts(vec![jane(), john()]));
        let app = actix_test::init_service(test_app(repository)).await;

        let request = actix_test::TestRequest::put()
            .uri("/contact/2")
            .set_json(json!({"phone": "555-0100"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let error = read_json(response).await;
        assert_eq!(
            error.get("error").and_then(Value::as_str),
            Some("a contact with this phone already exists")
        );
    }

    #[actix_web::test]
    async fn delete_removes_the_contact_from_the_collection() {
        let repository = Arc::new(StubContactRepository::with_contacts(vec![jane(), john()]));
        let app = actix_test::init_service(test_app(repository)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/contact/1")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let collection = read_json(response).await;
        let remaining = collection.as_array().expect("collection array");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].get("id").and_then(Value::as_i64), Some(2));
    }

    #[actix_web::test]
    async fn delete_unknown_id_reports_not_found() {
        let app = actix_test::init_service(test_app(Arc::new(StubContactRepository::new()))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/contact/41")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn storage_failures_are_redacted() {
        struct FailingRepository;

        #[async_trait]
        impl ContactRepository for FailingRepository {
            async fn list(&self) -> Result<Vec<Contact>, RepositoryError> {
                Err(RepositoryError::query("disk I/O error"))
            }

            async fn insert(&self, _contact: &NewContact) -> Result<Contact, RepositoryError> {
                Err(RepositoryError::query("disk I/O error"))
            }

            async fn find_by_id(
                &self,
                _contact_id: i32,
            ) -> Result<Option<Contact>, RepositoryError> {
                Err(RepositoryError::query("disk I/O error"))
            }

            async fn update(
                &self,
                _contact_id: i32,
                _changes: &ContactChanges,
            ) -> Result<Option<Contact>, RepositoryError> {
                Err(RepositoryError::query("disk I/O error"))
            }

            async fn delete(&self, _contact_id: i32) -> Result<bool, RepositoryError> {
                Err(RepositoryError::query("disk I/O error"))
            }
        }

        let app = actix_test::init_service(test_app(Arc::new(FailingRepository))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/contact/all")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let error = read_json(response).await;
        assert_eq!(
            error.get("error").and_then(Value::as_str),
            Some("storage failure")
        );
        assert_eq!(error.get("status_code").and_then(Value::as_u64), Some(500));
    }
}
