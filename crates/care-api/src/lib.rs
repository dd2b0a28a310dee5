//! OpenCare HTTP API
//!
//! REST surface over the intake and scheduling services: patient
//! registration and lookup, the new-appointment context, the appointment
//! workflow, and the admin dashboard aggregation. OpenAPI docs are served
//! at `/docs`.

pub mod models;
pub mod routes;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use care_common::telemetry::{LogTelemetrySink, TelemetrySink};
use care_intake::infrastructure::{InMemoryFileStore, InMemoryPatientRepository};
use care_intake::RegistrationService;
use care_scheduling::infrastructure::{InMemoryAppointmentRepository, LogSmsNotifier};
use care_scheduling::AppointmentService;

pub use models::*;

/// Shared API state.
#[derive(Clone)]
pub struct ApiState {
    pub registration: Arc<RegistrationService>,
    pub appointments: Arc<AppointmentService>,
    pub telemetry: Arc<dyn TelemetrySink>,
}

impl ApiState {
    /// Fully in-memory wiring: the default for local runs and tests. Real
    /// deployments swap the ports behind the services.
    pub fn in_memory() -> Self {
        Self {
            registration: Arc::new(RegistrationService::new(
                Arc::new(InMemoryPatientRepository::new()),
                Arc::new(InMemoryFileStore::new()),
            )),
            appointments: Arc::new(AppointmentService::new(
                Arc::new(InMemoryAppointmentRepository::new()),
                Arc::new(LogSmsNotifier),
            )),
            telemetry: Arc::new(LogTelemetrySink),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "OpenCare API",
        version = "1.0.0",
        description = "Patient intake and appointment scheduling",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::patients::register_patient,
        routes::patients::get_patient,
        routes::patients::new_appointment_context,
        routes::appointments::create_appointment,
        routes::appointments::get_appointment,
        routes::appointments::update_appointment,
        routes::appointments::recent_appointments,
    ),
    components(
        schemas(
            ErrorResponse,
            RegisterPatientRequest, DocumentUpload, RegisteredResponse, PatientResponse,
            NewAppointmentContext, PhysicianOption,
            CreateAppointmentRequest, UpdateAppointmentRequest, AppointmentAction,
            AppointmentResponse, RecentAppointmentsResponse,
            routes::health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "patients", description = "Patient registration and lookup"),
        (name = "appointments", description = "Appointment workflow"),
        (name = "admin", description = "Admin dashboard")
    )
)]
pub struct ApiDoc;

/// Build the API router.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn api_routes() -> Router<Arc<ApiState>> {
    Router::new()
        .nest("/patients", routes::patients::router())
        .nest("/appointments", routes::appointments::router())
        .nest("/admin", routes::appointments::admin_router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use care_common::telemetry::TelemetryError;
    use care_scheduling::infrastructure::RecordingSmsNotifier;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingTelemetry {
        views: AtomicUsize,
    }

    #[async_trait]
    impl TelemetrySink for CountingTelemetry {
        async fn record_view(&self, _view: &str, _name: &str) -> Result<(), TelemetryError> {
            self.views.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct TestContext {
        server: TestServer,
        sms: Arc<RecordingSmsNotifier>,
        telemetry: Arc<CountingTelemetry>,
    }

    fn context() -> TestContext {
        let sms = Arc::new(RecordingSmsNotifier::new());
        let telemetry = Arc::new(CountingTelemetry::default());
        let state = ApiState {
            registration: Arc::new(RegistrationService::new(
                Arc::new(InMemoryPatientRepository::new()),
                Arc::new(InMemoryFileStore::new()),
            )),
            appointments: Arc::new(AppointmentService::new(
                Arc::new(InMemoryAppointmentRepository::new()),
                sms.clone(),
            )),
            telemetry: telemetry.clone(),
        };
        TestContext {
            server: TestServer::new(build_router(state)).expect("router"),
            sms,
            telemetry,
        }
    }

    fn register_body(user_id: &str) -> Value {
        json!({
            "userId": user_id,
            "name": "Ada Lovelace",
            "email": "ada@clinic.example",
            "phone": "5551234567",
            "birthDate": "1990-12-10",
            "gender": "female",
            "address": "14th Street, New York",
            "occupation": "Engineer",
            "emergencyContactName": "Charles Babbage",
            "emergencyContactNumber": "+18685799831",
            "primaryPhysician": "John Green",
            "insuranceProvider": "BlueCross",
            "insurancePolicyNumber": "ABC1234567",
            "allergies": "Peanuts",
            "treatmentConsent": true,
            "disclosureConsent": true,
            "privacyConsent": true
        })
    }

    async fn register(ctx: &TestContext, user_id: &str) {
        let response = ctx
            .server
            .post("/api/v1/patients")
            .json(&register_body(user_id))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn health_is_ok() {
        let ctx = context();
        let response = ctx.server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn register_redirects_to_new_appointment() {
        let ctx = context();
        let response = ctx
            .server
            .post("/api/v1/patients")
            .json(&register_body("user_1"))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["redirect"], "/patients/user_1/new-appointment");
    }

    #[tokio::test]
    async fn registered_patient_is_retrievable_with_normalized_phone() {
        let ctx = context();
        register(&ctx, "user_1").await;

        let response = ctx.server.get("/api/v1/patients/user_1").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"]["name"], "Ada Lovelace");
        // National input against the form's default country.
        assert_eq!(body["data"]["phone"], "+75551234567");
    }

    #[tokio::test]
    async fn unknown_patient_is_404() {
        let ctx = context();
        let response = ctx.server.get("/api/v1/patients/ghost").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn missing_consent_fails_validation_with_field_errors() {
        let ctx = context();
        let mut body = register_body("user_1");
        body["privacyConsent"] = json!(false);

        let response = ctx.server.post("/api/v1/patients").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["fields"]["privacyConsent"],
            "You must consent to privacy in order to proceed"
        );
    }

    #[tokio::test]
    async fn new_appointment_context_lists_physicians_and_emits_a_view_metric() {
        let ctx = context();
        register(&ctx, "user_1").await;

        let response = ctx.server.get("/api/v1/patients/user_1/new-appointment").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"]["patient"]["name"], "Ada Lovelace");
        assert!(body["data"]["physicians"].as_array().unwrap().len() > 1);

        // The metric task is detached; give it a beat to run.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ctx.telemetry.views.load(Ordering::SeqCst), 1);
    }

    fn appointment_body(user_id: &str, patient_id: &str) -> Value {
        json!({
            "userId": user_id,
            "patientId": patient_id,
            "physician": "John Green",
            "schedule": "2026-09-01T14:30:00Z",
            "reason": "Annual check-up",
            "note": "Prefer afternoons"
        })
    }

    #[tokio::test]
    async fn appointment_workflow_reaches_the_dashboard() {
        let ctx = context();
        register(&ctx, "user_1").await;

        let patient: Value = ctx.server.get("/api/v1/patients/user_1").await.json();
        let patient_id = patient["data"]["id"].as_str().unwrap().to_string();

        // Request.
        let created = ctx
            .server
            .post("/api/v1/appointments")
            .json(&appointment_body("user_1", &patient_id))
            .await;
        assert_eq!(created.status_code(), StatusCode::CREATED);
        let created: Value = created.json();
        assert_eq!(created["data"]["status"], "pending");
        let id = created["data"]["id"].as_str().unwrap().to_string();

        // Cancelling without a reason is rejected.
        let no_reason = ctx
            .server
            .patch(&format!("/api/v1/appointments/{id}"))
            .json(&json!({ "action": "cancel" }))
            .await;
        assert_eq!(no_reason.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        // Confirm.
        let confirmed = ctx
            .server
            .patch(&format!("/api/v1/appointments/{id}"))
            .json(&json!({ "action": "schedule" }))
            .await;
        assert_eq!(confirmed.status_code(), StatusCode::OK);
        let confirmed: Value = confirmed.json();
        assert_eq!(confirmed["data"]["status"], "scheduled");

        // The patient was notified once, for the confirmation.
        let sent = ctx.sms.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("confirmed"));

        // Dashboard counts.
        let recent: Value = ctx
            .server
            .get("/api/v1/admin/appointments/recent")
            .await
            .json();
        assert_eq!(recent["data"]["totalCount"], 1);
        assert_eq!(recent["data"]["scheduledCount"], 1);
        assert_eq!(recent["data"]["pendingCount"], 0);
        assert_eq!(recent["data"]["cancelledCount"], 0);
    }

    #[tokio::test]
    async fn invalid_appointment_request_is_422() {
        let ctx = context();
        let mut body = appointment_body("user_1", "patient_1");
        body["reason"] = json!("");

        let response = ctx.server.post("/api/v1/appointments").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert!(body["error"]["fields"].get("reason").is_some());
    }

    #[tokio::test]
    async fn sms_recipient_is_the_requesting_user() {
        let ctx = context();
        register(&ctx, "user_9").await;
        let patient: Value = ctx.server.get("/api/v1/patients/user_9").await.json();
        let patient_id = patient["data"]["id"].as_str().unwrap().to_string();

        let created: Value = ctx
            .server
            .post("/api/v1/appointments")
            .json(&appointment_body("user_9", &patient_id))
            .await
            .json();
        let id = created["data"]["id"].as_str().unwrap();

        ctx.server
            .patch(&format!("/api/v1/appointments/{id}"))
            .json(&json!({ "action": "cancel", "cancellationReason": "Double booked" }))
            .await
            .assert_status(StatusCode::OK);

        let sent = ctx.sms.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "user_9");
        assert!(sent[0].1.contains("Double booked"));
    }
}
