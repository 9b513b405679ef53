use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    AuthUser, JwtAuth, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware,
};
use std::sync::Arc;
use tracing::instrument;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::error::EventResult;
use crate::models::{CreateEvent, EventView, MessageResponse, OwnerRef, UpdateEvent};
use crate::repository::EventRepository;
use crate::service::EventService;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(list_events, create_event, get_event, update_event, delete_event),
    components(
        schemas(EventView, OwnerRef, CreateEvent, UpdateEvent, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Events", description = "Event management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Registers the `bearerAuth` scheme used by the mutating endpoints
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Create the events router
///
/// `GET /` and `GET /{id}` are public. `POST /`, `PUT /{id}` and
/// `DELETE /{id}` require a bearer token verified by `auth`.
pub fn router<R: EventRepository + 'static>(service: EventService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    let protected = Router::new()
        .route("/", post(create_event::<R>))
        .route("/{id}", put(update_event::<R>).delete(delete_event::<R>))
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware));

    // Public routes merge into the protected ones so their 405 fallback skips auth
    protected
        .merge(
            Router::new()
                .route("/", get(list_events::<R>))
                .route("/{id}", get(get_event::<R>)),
        )
        .with_state(shared_service)
}

/// List all events
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    responses(
        (status = 200, description = "List of events", body = Vec<EventView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(service))]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> EventResult<Json<Vec<EventView>>> {
    let events = service.list_events().await?;
    Ok(Json(events))
}

/// Create a new event owned by the caller
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    request_body = CreateEvent,
    security(("bearerAuth" = [])),
    responses(
        (status = 201, description = "Event created successfully", body = EventView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %user.id))]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.create_event(&user, input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (UUID)")
    ),
    responses(
        (status = 200, description = "Event found", body = EventView),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(service))]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
) -> EventResult<Json<EventView>> {
    let event = service.get_event(&id).await?;
    Ok(Json(event))
}

/// Update an event; only its owner may do so
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (UUID)")
    ),
    request_body = UpdateEvent,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Event updated successfully", body = EventView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(service, user, input), fields(user_id = %user.id))]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> EventResult<Json<EventView>> {
    let event = service.update_event(&user, &id, input).await?;
    Ok(Json(event))
}

/// Delete an event; only its owner may do so
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event ID (UUID)")
    ),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
#[instrument(skip(service, user), fields(user_id = %user.id))]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> EventResult<Json<MessageResponse>> {
    service.delete_event(&user, &id).await?;
    Ok(Json(MessageResponse::new("Event deleted")))
}
