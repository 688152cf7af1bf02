//! HTTP handlers for Products API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    ValidatedJson,
};
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;

use crate::context::OperationContext;
use crate::error::ProductResult;
use crate::models::{
    Characteristics, CreateProduct, CreatedProduct, Product, ReplaceProduct, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        replace_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product, CreateProduct, CreatedProduct, ReplaceProduct, UpdateProduct,
            Characteristics
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

struct HandlerState<R: ProductRepository> {
    service: ProductService<R>,
    request_timeout: Duration,
}

impl<R: ProductRepository> HandlerState<R> {
    /// Every request gets its own deadline.
    fn context(&self) -> OperationContext {
        OperationContext::with_timeout(self.request_timeout)
    }
}

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    router_with_timeout(service, DEFAULT_REQUEST_TIMEOUT)
}

/// Same as [`router`] with an explicit per-request store deadline
pub fn router_with_timeout<R: ProductRepository + 'static>(
    service: ProductService<R>,
    request_timeout: Duration,
) -> Router {
    let state = Arc::new(HandlerState {
        service,
        request_timeout,
    });

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(replace_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .with_state(state)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(state): State<Arc<HandlerState<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = state.service.list_products(&state.context()).await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = CreatedProduct),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(state): State<Arc<HandlerState<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let id = state.service.create_product(&state.context(), input).await?;
    Ok((StatusCode::CREATED, Json(CreatedProduct { id })))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-character hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(state): State<Arc<HandlerState<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<Product>> {
    let product = state.service.get_product(&state.context(), &id).await?;
    Ok(Json(product))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-character hex ObjectId)")
    ),
    request_body = ReplaceProduct,
    responses(
        (status = 204, description = "Product replaced successfully"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_product<R: ProductRepository>(
    State(state): State<Arc<HandlerState<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<ReplaceProduct>,
) -> ProductResult<StatusCode> {
    state
        .service
        .replace_product(&state.context(), &id, input)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Partially update a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-character hex ObjectId)")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 204, description = "Product updated successfully"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(state): State<Arc<HandlerState<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<StatusCode> {
    state
        .service
        .update_product(&state.context(), &id, input)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-character hex ObjectId)")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(state): State<Arc<HandlerState<R>>>,
    Path(id): Path<String>,
) -> ProductResult<StatusCode> {
    state.service.delete_product(&state.context(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
