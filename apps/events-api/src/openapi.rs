//! OpenAPI documentation configuration

use domain_events::SecurityAddon;
use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Events API",
        version = "0.1.0",
        description = "REST API for managing events with owner-only mutations",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    nest(
        (path = "/api/events", api = domain_events::ApiDoc)
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Events", description = "Event management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
