//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Revenue Lens API",
        version = "0.1.0",
        description = "Decomposes a mobile-app revenue change between two timeframes into additive per-KPI impacts, and renders the result as an interactive report.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Impact", description = "Revenue change decomposition and report rendering"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Impact
        crate::rest::handle_impact,
        crate::rest::handle_report,
        crate::rest::handle_demo,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Snapshot and result types
        revlens_core::types::KpiSnapshot,
        revlens_core::types::SnapshotPair,
        revlens_core::types::Factor,
        revlens_core::types::FactorImpact,
        revlens_core::types::ImpactResult,
        // REST error/health types
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
