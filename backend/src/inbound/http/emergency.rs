//! Emergency contact management and the SOS trigger.

use actix_web::{HttpResponse, delete, get, post, web};
use safegas_types::Envelope;
use safegas_types::models::{EmergencyContact, NewEmergencyContact, SosReceipt};
use tracing::{info, warn};

use crate::domain::{DomainError, telemetry};

use super::bearer::BearerIdentity;
use super::error::ApiResult;
use super::state::AppState;

/// List the caller's emergency contacts.
#[utoipa::path(
    get,
    path = "/emergency/contacts/",
    responses(
        (status = 200, description = "Contact list", body = Envelope<Vec<EmergencyContact>>),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tags = ["emergency"],
    operation_id = "listEmergencyContacts"
)]
#[get("/emergency/contacts/")]
pub async fn list_contacts(
    identity: BearerIdentity,
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Envelope<Vec<EmergencyContact>>>> {
    let contacts = state.contacts.list(identity.email())?;
    Ok(web::Json(Envelope::ok(contacts)))
}

/// Add an emergency contact.
#[utoipa::path(
    post,
    path = "/emergency/contacts/",
    request_body = NewEmergencyContact,
    responses(
        (status = 201, description = "Contact stored", body = Envelope<EmergencyContact>),
        (status = 400, description = "Missing name or phone number"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tags = ["emergency"],
    operation_id = "addEmergencyContact"
)]
#[post("/emergency/contacts/")]
pub async fn add_contact(
    identity: BearerIdentity,
    state: web::Data<AppState>,
    payload: web::Json<NewEmergencyContact>,
) -> ApiResult<HttpResponse> {
    let new_contact = payload.into_inner();
    if new_contact.name.trim().is_empty() || new_contact.phone_number.trim().is_empty() {
        return Err(
            DomainError::invalid_request("Name and phone number are required.").into(),
        );
    }
    let contact = state.contacts.add(identity.email(), new_contact)?;
    info!(email = %identity.email(), contact_id = contact.id, "emergency contact added");
    Ok(HttpResponse::Created().json(Envelope::ok_with_message(
        contact,
        "Emergency contact added successfully",
    )))
}

/// Remove an emergency contact by id.
#[utoipa::path(
    delete,
    path = "/emergency/contacts/{id}/",
    params(("id" = u32, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact removed"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "No contact with that id"),
    ),
    tags = ["emergency"],
    operation_id = "deleteEmergencyContact"
)]
#[delete("/emergency/contacts/{id}/")]
pub async fn delete_contact(
    identity: BearerIdentity,
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> ApiResult<web::Json<Envelope<()>>> {
    let id = path.into_inner();
    state.contacts.delete(identity.email(), id)?;
    info!(email = %identity.email(), contact_id = id, "emergency contact removed");
    Ok(web::Json(safegas_types::envelope::acknowledged(
        "Emergency contact deleted successfully",
    )))
}

/// Trigger an SOS, notifying every stored contact.
#[utoipa::path(
    post,
    path = "/emergency/sos/",
    responses(
        (status = 200, description = "SOS triggered", body = Envelope<SosReceipt>),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tags = ["emergency"],
    operation_id = "triggerSos"
)]
#[post("/emergency/sos/")]
pub async fn trigger_sos(
    identity: BearerIdentity,
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Envelope<SosReceipt>>> {
    let contacts = state.contacts.list(identity.email())?;
    let receipt = telemetry::sos_receipt(u32::try_from(contacts.len()).unwrap_or(u32::MAX));
    warn!(
        email = %identity.email(),
        sos_id = receipt.sos_id,
        contacts_called = receipt.contacts_called,
        "SOS triggered"
    );
    Ok(web::Json(Envelope::ok_with_message(
        receipt,
        "SOS alert sent to all emergency contacts",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_support::{
        authed_delete, authed_get, authed_post, test_state_with_token,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    macro_rules! contacts_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .service(list_contacts)
                    .service(add_contact)
                    .service(delete_contact)
                    .service(trigger_sos),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn listing_returns_the_seeded_contacts() {
        let (state, token) = test_state_with_token();
        let app = contacts_app!(state);

        let response =
            test::call_service(&app, authed_get("/emergency/contacts/", &token).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        let contacts = body
            .pointer("/data")
            .and_then(Value::as_array)
            .expect("contacts array");
        assert_eq!(contacts.len(), 2);
        assert_eq!(
            contacts[0].pointer("/name").and_then(Value::as_str),
            Some("Emergency Services")
        );
        assert_eq!(
            contacts[0].pointer("/isPrimary").and_then(Value::as_bool),
            Some(true)
        );
    }

    #[actix_web::test]
    async fn added_contacts_show_up_and_can_be_deleted() {
        let (state, token) = test_state_with_token();
        let app = contacts_app!(state);

        let request = authed_post("/emergency/contacts/", &token)
            .set_json(serde_json::json!({
                "name": "Jane",
                "phoneNumber": "+15550001111"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(response).await;
        let id = body
            .pointer("/data/id")
            .and_then(Value::as_u64)
            .expect("assigned id");
        assert!(id >= 100);
        assert_eq!(
            body.pointer("/data/relationship").and_then(Value::as_str),
            Some("Emergency Contact")
        );

        let uri = format!("/emergency/contacts/{id}/");
        let response = test::call_service(&app, authed_delete(&uri, &token).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = test::call_service(&app, authed_delete(&uri, &token).to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn blank_contacts_are_rejected() {
        let (state, token) = test_state_with_token();
        let app = contacts_app!(state);

        let request = authed_post("/emergency/contacts/", &token)
            .set_json(serde_json::json!({ "name": "  ", "phoneNumber": "123" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn sos_counts_the_stored_contacts() {
        let (state, token) = test_state_with_token();
        let app = contacts_app!(state);

        let response =
            test::call_service(&app, authed_post("/emergency/sos/", &token).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(
            body.pointer("/data/contactsCalled").and_then(Value::as_u64),
            Some(2)
        );
        assert_eq!(
            body.pointer("/data/estimatedResponseTime")
                .and_then(Value::as_str),
            Some("5-10 minutes")
        );
    }
}
