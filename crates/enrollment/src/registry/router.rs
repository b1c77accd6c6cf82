use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::domain::{Dependent, DependentDraft, DependentId, Enrollee, EnrolleeDraft, EnrolleeId};
use super::service::{EnrollmentError, EnrollmentService};
use super::store::{DependentStore, EnrolleeStore};

/// Router builder exposing the enrollee and dependent CRUD endpoints.
pub fn enrollment_router<E, D>(service: Arc<EnrollmentService<E, D>>) -> Router
where
    E: EnrolleeStore + 'static,
    D: DependentStore + 'static,
{
    Router::new()
        .route(
            "/enrollees",
            get(list_enrollees_handler::<E, D>).post(create_enrollee_handler::<E, D>),
        )
        .route(
            "/enrollees/:enrollee_id",
            get(fetch_enrollee_handler::<E, D>)
                .put(update_enrollee_handler::<E, D>)
                .delete(delete_enrollee_handler::<E, D>),
        )
        .route(
            "/enrollees/:enrollee_id/dependents",
            get(list_dependents_handler::<E, D>).post(create_dependent_handler::<E, D>),
        )
        .route(
            "/enrollees/:enrollee_id/dependents/:dependent_id",
            get(fetch_dependent_handler::<E, D>)
                .put(update_dependent_handler::<E, D>)
                .delete(delete_dependent_handler::<E, D>),
        )
        .with_state(service)
}

/// The one place where enrollment failures become HTTP responses: 404 with a
/// plain-text entity/id message, 400 with the field violation map, and 500
/// for store failures passed through from an adapter.
impl IntoResponse for EnrollmentError {
    fn into_response(self) -> Response {
        match self {
            EnrollmentError::EnrolleeNotFound(_) | EnrollmentError::DependentNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            EnrollmentError::Validation(violations) => {
                (StatusCode::BAD_REQUEST, Json(violations)).into_response()
            }
            EnrollmentError::Store(err) => {
                let body = Json(json!({ "error": err.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

fn created_at(location: String) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
}

fn empty_ok() -> Response {
    (StatusCode::OK, "").into_response()
}

pub(crate) async fn list_enrollees_handler<E, D>(
    State(service): State<Arc<EnrollmentService<E, D>>>,
) -> Result<Json<Vec<Enrollee>>, EnrollmentError>
where
    E: EnrolleeStore + 'static,
    D: DependentStore + 'static,
{
    service.list_enrollees().map(Json)
}

pub(crate) async fn fetch_enrollee_handler<E, D>(
    State(service): State<Arc<EnrollmentService<E, D>>>,
    Path(enrollee_id): Path<u64>,
) -> Result<Json<Enrollee>, EnrollmentError>
where
    E: EnrolleeStore + 'static,
    D: DependentStore + 'static,
{
    service.fetch_enrollee(EnrolleeId(enrollee_id)).map(Json)
}

pub(crate) async fn create_enrollee_handler<E, D>(
    State(service): State<Arc<EnrollmentService<E, D>>>,
    Json(draft): Json<EnrolleeDraft>,
) -> Result<Response, EnrollmentError>
where
    E: EnrolleeStore + 'static,
    D: DependentStore + 'static,
{
    let enrollee = service.create_enrollee(draft)?;
    Ok(created_at(format!("/enrollees/{}", enrollee.id)))
}

pub(crate) async fn update_enrollee_handler<E, D>(
    State(service): State<Arc<EnrollmentService<E, D>>>,
    Path(enrollee_id): Path<u64>,
    Json(draft): Json<EnrolleeDraft>,
) -> Result<Response, EnrollmentError>
where
    E: EnrolleeStore + 'static,
    D: DependentStore + 'static,
{
    service.update_enrollee(EnrolleeId(enrollee_id), draft)?;
    Ok(empty_ok())
}

pub(crate) async fn delete_enrollee_handler<E, D>(
    State(service): State<Arc<EnrollmentService<E, D>>>,
    Path(enrollee_id): Path<u64>,
) -> Result<Response, EnrollmentError>
where
    E: EnrolleeStore + 'static,
    D: DependentStore + 'static,
{
    service.delete_enrollee(EnrolleeId(enrollee_id))?;
    Ok(empty_ok())
}

pub(crate) async fn list_dependents_handler<E, D>(
    State(service): State<Arc<EnrollmentService<E, D>>>,
    Path(enrollee_id): Path<u64>,
) -> Result<Json<Vec<Dependent>>, EnrollmentError>
where
    E: EnrolleeStore + 'static,
    D: DependentStore + 'static,
{
    service.list_dependents(EnrolleeId(enrollee_id)).map(Json)
}

pub(crate) async fn fetch_dependent_handler<E, D>(
    State(service): State<Arc<EnrollmentService<E, D>>>,
    Path((enrollee_id, dependent_id)): Path<(u64, u64)>,
) -> Result<Json<Dependent>, EnrollmentError>
where
    E: EnrolleeStore + 'static,
    D: DependentStore + 'static,
{
    service
        .fetch_dependent(EnrolleeId(enrollee_id), DependentId(dependent_id))
        .map(Json)
}

pub(crate) async fn create_dependent_handler<E, D>(
    State(service): State<Arc<EnrollmentService<E, D>>>,
    Path(enrollee_id): Path<u64>,
    Json(draft): Json<DependentDraft>,
) -> Result<Response, EnrollmentError>
where
    E: EnrolleeStore + 'static,
    D: DependentStore + 'static,
{
    let owner = EnrolleeId(enrollee_id);
    let dependent = service.create_dependent(owner, draft)?;
    Ok(created_at(format!(
        "/enrollees/{owner}/dependents/{}",
        dependent.id
    )))
}

pub(crate) async fn update_dependent_handler<E, D>(
    State(service): State<Arc<EnrollmentService<E, D>>>,
    Path((enrollee_id, dependent_id)): Path<(u64, u64)>,
    Json(draft): Json<DependentDraft>,
) -> Result<Response, EnrollmentError>
where
    E: EnrolleeStore + 'static,
    D: DependentStore + 'static,
{
    service.update_dependent(
        EnrolleeId(enrollee_id),
        DependentId(dependent_id),
        draft,
    )?;
    Ok(empty_ok())
}

pub(crate) async fn delete_dependent_handler<E, D>(
    State(service): State<Arc<EnrollmentService<E, D>>>,
    Path((enrollee_id, dependent_id)): Path<(u64, u64)>,
) -> Result<Response, EnrollmentError>
where
    E: EnrolleeStore + 'static,
    D: DependentStore + 'static,
{
    service.delete_dependent(EnrolleeId(enrollee_id), DependentId(dependent_id))?;
    Ok(empty_ok())
}
