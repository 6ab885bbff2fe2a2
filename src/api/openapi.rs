//! OpenAPI document for every REST endpoint.

use utoipa::OpenApi;

use crate::api::dto::{
    AreasResponse, CitiesResponse, ClaimsResponse, DealResponse, HomepageResponse, MeResponse,
    MessagesResponse, StructuredDataResponse,
};
use crate::api::handlers;
use crate::error::ErrorResponse;

/// Generated OpenAPI description, served at `/api-docs/openapi.json`
/// when the `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "CostFinders API",
        description = "City/offer directory, SEO emitters and record reads for the CostFinders medspa deals marketplace."
    ),
    paths(
        handlers::directory::list_cities,
        handlers::directory::list_areas,
        handlers::directory::homepage,
        handlers::directory::get_deal,
        handlers::account::me,
        handlers::account::business_claims,
        handlers::account::claim_messages,
        handlers::seo::robots_txt,
        handlers::seo::sitemap_xml,
        handlers::seo::structured_data,
        handlers::system::health_handler,
    ),
    components(schemas(
        CitiesResponse,
        AreasResponse,
        HomepageResponse,
        DealResponse,
        ClaimsResponse,
        MessagesResponse,
        MeResponse,
        StructuredDataResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Directory", description = "Cities, areas, homepage and live deals"),
        (name = "Accounts", description = "Caller profile and claim inboxes"),
        (name = "SEO", description = "Crawler policy, sitemap and structured data"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;
