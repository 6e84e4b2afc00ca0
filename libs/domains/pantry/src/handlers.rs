use axum::{
    Json, Router,
    extract::{FromRequestParts, Query, State},
    http::{StatusCode, request::Parts},
    routing::get,
};
use axum_helpers::{AppError, JsonBody, errors::handlers::method_not_allowed};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{PantryError, PantryResult};
use crate::models::{
    CreatePantryItem, CreatePayload, CreatedItems, ItemFilter, ItemQuery, PantryItem,
    UpdatePantryItem,
};
use crate::repository::PantryRepository;
use crate::service::PantryService;

pub const COLLECTION_PATH: &str = "/pantryItems";
pub const ITEM_PATH: &str = "/pantryItem/{id}";

/// OpenAPI documentation for the pantry API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_items,
        create_items,
        delete_all_items,
        get_item,
        update_item,
        delete_item,
    ),
    components(schemas(
        PantryItem,
        CreatePantryItem,
        UpdatePantryItem,
        CreatePayload,
        CreatedItems
    )),
    tags(
        (name = "Pantry", description = "Pantry item tracking")
    )
)]
pub struct ApiDoc;

/// Create the pantry router with both path families.
///
/// `get` would also answer HEAD, so HEAD is routed to the 405 handler explicitly.
pub fn router<R: PantryRepository + 'static>(service: PantryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            COLLECTION_PATH,
            get(list_items)
                .head(method_not_allowed)
                .post(create_items)
                .delete(delete_all_items)
                .fallback(method_not_allowed),
        )
        .route(
            ITEM_PATH,
            get(get_item)
                .head(method_not_allowed)
                .patch(update_item)
                .delete(delete_item)
                .fallback(method_not_allowed),
        )
        .with_state(shared_service)
}

/// Extracts the item id from the third `/`-separated segment of a
/// percent-encoded request path.
pub fn parse_item_id(path: &str) -> PantryResult<i64> {
    let path = urlencoding::decode(path)
        .map_err(|_| PantryError::InvalidIdentifier(path.to_string()))?;
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 3 {
        return Err(PantryError::MalformedPath);
    }

    segments[2]
        .parse()
        .map_err(|_| PantryError::InvalidIdentifier(segments[2].to_string()))
}

/// Item id taken from the request path, see [`parse_item_id`].
pub struct ItemIdPath(pub i64);

impl<S> FromRequestParts<S> for ItemIdPath
where
    S: Send + Sync,
{
    type Rejection = PantryError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_item_id(parts.uri.path()).map(ItemIdPath)
    }
}

/// List pantry items with optional filters
#[utoipa::path(
    get,
    path = "/pantryItems",
    tag = "Pantry",
    params(ItemQuery),
    responses(
        (status = 200, description = "Matching items in insertion order", body = Vec<PantryItem>),
        (status = 400, description = "Invalid boolean query value", body = String, content_type = "text/plain")
    )
)]
async fn list_items<R: PantryRepository>(
    State(service): State<Arc<PantryService<R>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> PantryResult<Json<Vec<PantryItem>>> {
    let filter = ItemFilter::try_from(ItemQuery::from_pairs(pairs))?;
    let items = service.list_items(filter).await?;
    Ok(Json(items))
}

/// Create one item or a batch of items
#[utoipa::path(
    post,
    path = "/pantryItems",
    tag = "Pantry",
    request_body = CreatePayload,
    responses(
        (status = 200, description = "Created item(s), shaped like the request", body = CreatedItems),
        (status = 400, description = "Malformed JSON body", body = String, content_type = "text/plain"),
        (status = 406, description = "Duplicate item name; nothing was stored", body = String, content_type = "text/plain")
    )
)]
async fn create_items<R: PantryRepository>(
    State(service): State<Arc<PantryService<R>>>,
    JsonBody(payload): JsonBody<CreatePayload>,
) -> PantryResult<Json<CreatedItems>> {
    let created = match payload {
        CreatePayload::Batch(batch) => CreatedItems::Batch(service.create_items(batch).await?),
        CreatePayload::Single(input) => CreatedItems::Single(service.create_item(input).await?),
    };
    Ok(Json(created))
}

/// Delete every pantry item
#[utoipa::path(
    delete,
    path = "/pantryItems",
    tag = "Pantry",
    responses(
        (status = 200, description = "Empty collection", body = Vec<PantryItem>)
    )
)]
async fn delete_all_items<R: PantryRepository>(
    State(service): State<Arc<PantryService<R>>>,
) -> PantryResult<Json<Vec<PantryItem>>> {
    let remaining = service.delete_all_items().await?;
    Ok(Json(remaining))
}

/// Get a pantry item by ID
#[utoipa::path(
    get,
    path = "/pantryItem/{id}",
    tag = "Pantry",
    params(
        ("id" = i64, Path, description = "Pantry item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = PantryItem),
        (status = 400, description = "Malformed or unknown ID", body = String, content_type = "text/plain")
    )
)]
async fn get_item<R: PantryRepository>(
    State(service): State<Arc<PantryService<R>>>,
    ItemIdPath(id): ItemIdPath,
) -> Result<Json<PantryItem>, AppError> {
    let item = service
        .get_item(id)
        .await
        .map_err(PantryError::into_lookup_error)?;
    Ok(Json(item))
}

/// Replace a pantry item. `id`, `isExpired` and `buy` cannot be set by the client.
#[utoipa::path(
    patch,
    path = "/pantryItem/{id}",
    tag = "Pantry",
    params(
        ("id" = i64, Path, description = "Pantry item ID")
    ),
    request_body = UpdatePantryItem,
    responses(
        (status = 200, description = "Item replaced", body = PantryItem),
        (status = 400, description = "Malformed or unknown ID, or malformed JSON body", body = String, content_type = "text/plain")
    )
)]
async fn update_item<R: PantryRepository>(
    State(service): State<Arc<PantryService<R>>>,
    ItemIdPath(id): ItemIdPath,
    JsonBody(input): JsonBody<UpdatePantryItem>,
) -> Result<Json<PantryItem>, AppError> {
    let item = service
        .update_item(id, input)
        .await
        .map_err(PantryError::into_lookup_error)?;
    Ok(Json(item))
}

/// Delete a pantry item
#[utoipa::path(
    delete,
    path = "/pantryItem/{id}",
    tag = "Pantry",
    params(
        ("id" = i64, Path, description = "Pantry item ID")
    ),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 400, description = "Malformed ID", body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown ID", body = String, content_type = "text/plain")
    )
)]
async fn delete_item<R: PantryRepository>(
    State(service): State<Arc<PantryService<R>>>,
    ItemIdPath(id): ItemIdPath,
) -> PantryResult<StatusCode> {
    service.delete_item(id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_id() {
        assert_eq!(parse_item_id("/pantryItem/42").unwrap(), 42);
        assert_eq!(parse_item_id("/pantryItem/+7").unwrap(), 7);
        assert_eq!(parse_item_id("/pantryItem/12/extra").unwrap(), 12);
    }

    #[test]
    fn test_parse_item_id_decodes_percent_escapes() {
        assert_eq!(parse_item_id("/pantryItem/%31").unwrap(), 1);
        assert_eq!(parse_item_id("/pantry%49tem/%34%32").unwrap(), 42);
        // An encoded slash splits the decoded path like a literal one
        assert!(matches!(
            parse_item_id("/pantryItem/%2F5"),
            Err(PantryError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            parse_item_id("/pantryItem/%FF"),
            Err(PantryError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_parse_item_id_needs_three_segments() {
        assert!(matches!(parse_item_id("/pantryItem"), Err(PantryError::MalformedPath)));
        assert!(matches!(parse_item_id(""), Err(PantryError::MalformedPath)));
    }

    #[test]
    fn test_parse_item_id_rejects_non_integers() {
        for path in ["/pantryItem/abc", "/pantryItem/", "/pantryItem/1.5"] {
            assert!(
                matches!(parse_item_id(path), Err(PantryError::InvalidIdentifier(_))),
                "{path}"
            );
        }
    }

    #[test]
    fn test_openapi_lists_both_path_families() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/pantryItems"));
        assert!(doc.paths.paths.contains_key("/pantryItem/{id}"));
    }
}
