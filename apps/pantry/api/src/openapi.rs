use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Pantry API",
    version = "0.1.0",
    description = "Track pantry items, their expiry dates and what needs restocking"
))]
struct ApiInfo;

/// Pantry API documentation. Domain paths live at the root, so they are merged
/// rather than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ApiInfo::openapi();
        doc.merge(domain_pantry::ApiDoc::openapi());
        doc
    }
}
