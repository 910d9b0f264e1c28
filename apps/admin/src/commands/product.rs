//! # Product Commands
//!
//! Product CRUD for the product page and modal.
//!
//! ## Paged Fetch with Fallback
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_products_paged(&ctx, request)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET /products/page?page&size&sortBy&sortDir                            │
//! │       │                                                                 │
//! │       ├── Ok(page) ───────────────────────────► Fulfilled(page)         │
//! │       │                                                                 │
//! │       └── Err(paged) ──► GET /products                                  │
//! │                               │                                         │
//! │                               ├── Ok(all) ──► slice_page(all, p, s)     │
//! │                               │               Fulfilled(from_fallback)  │
//! │                               │                                         │
//! │                               └── Err(_) ───► Rejected(paged message)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The fallback is the only retry in the application. It is logged at `warn`
//! and the slice records `served_by_fallback` so the page can tell.

use retail_core::forms::{ImageUpload, ProductForm};
use retail_core::pagination::{slice_page, PageRequest};
use retail_core::slices::product::{ImageUploaded, PagedProducts};
use retail_core::slices::ProductAction;
use retail_core::types::{MessageResponse, Page, Product};
use tracing::{info, warn};

use super::{saved, track, verbose};
use crate::error::{AdminError, AdminResult};
use crate::state::AppContext;

// =============================================================================
// Reads
// =============================================================================

pub async fn fetch_products(ctx: &AppContext) -> AdminResult<Vec<Product>> {
    let list = track(
        &ctx.store,
        ProductAction::FetchAll,
        ctx.services.products.get_all(),
        verbose("Failed to fetch products"),
    )
    .await?;
    info!(count = list.len(), "Products loaded");
    Ok(list)
}

/// Fetches one server page, falling back to slicing the full list.
pub async fn fetch_products_paged(
    ctx: &AppContext,
    request: PageRequest,
) -> AdminResult<PagedProducts> {
    let products = &ctx.services.products;
    let call = async {
        let paged_err = match products.get_paged(&request).await {
            Ok(page) => {
                return Ok(PagedProducts {
                    page,
                    from_fallback: false,
                })
            }
            Err(e) => e,
        };

        warn!(
            error = %paged_err,
            page = request.page,
            size = request.size,
            "Paged product fetch failed, slicing the full list"
        );
        match products.get_all().await {
            Ok(all) => Ok(PagedProducts {
                page: slice_page(&all, request.page, request.size),
                from_fallback: true,
            }),
            Err(fallback_err) => {
                warn!(error = %fallback_err, "Product list fallback failed too");
                Err(paged_err)
            }
        }
    };

    track(
        &ctx.store,
        ProductAction::FetchPaged,
        call,
        verbose("Failed to fetch paginated products"),
    )
    .await
}

/// Fetches the page the slice's pagination points at.
pub async fn reload_products(ctx: &AppContext) -> AdminResult<PagedProducts> {
    let pagination = ctx.store.select(|s| s.products.pagination);
    fetch_products_paged(ctx, PageRequest::new(pagination.page, pagination.size)).await
}

pub async fn fetch_product_by_id(ctx: &AppContext, id: i64) -> AdminResult<Product> {
    track(
        &ctx.store,
        ProductAction::FetchById,
        ctx.services.products.get_by_id(id),
        verbose("Failed to fetch product"),
    )
    .await
}

pub async fn search_products(ctx: &AppContext, keyword: &str) -> AdminResult<Vec<Product>> {
    track(
        &ctx.store,
        ProductAction::Search,
        ctx.services.products.search(keyword),
        verbose("Failed to search products"),
    )
    .await
}

pub async fn search_products_paged(
    ctx: &AppContext,
    keyword: &str,
    request: PageRequest,
) -> AdminResult<Page<Product>> {
    let products = &ctx.services.products;
    track(
        &ctx.store,
        ProductAction::SearchPaged,
        async { products.search_paged(keyword, &request).await },
        verbose("Failed to search paginated products"),
    )
    .await
}

pub async fn fetch_products_by_category(
    ctx: &AppContext,
    category_id: i64,
) -> AdminResult<Vec<Product>> {
    track(
        &ctx.store,
        ProductAction::FetchByCategory,
        ctx.services.products.get_by_category(category_id),
        verbose("Failed to fetch products by category"),
    )
    .await
}

pub async fn fetch_products_with_stock(
    ctx: &AppContext,
    warehouse_id: Option<i64>,
    branch_id: Option<i64>,
) -> AdminResult<Vec<Product>> {
    track(
        &ctx.store,
        ProductAction::FetchWithStock,
        ctx.services.products.get_with_stock(warehouse_id, branch_id),
        verbose("Failed to fetch products with stock"),
    )
    .await
}

// =============================================================================
// Writes
// =============================================================================

pub async fn create_product(
    ctx: &AppContext,
    product: &Product,
) -> AdminResult<MessageResponse<Product>> {
    track(
        &ctx.store,
        ProductAction::Create,
        ctx.services.products.upsert(product),
        verbose("Failed to create product"),
    )
    .await
}

pub async fn update_product(
    ctx: &AppContext,
    product: &Product,
) -> AdminResult<MessageResponse<Product>> {
    track(
        &ctx.store,
        ProductAction::Update,
        ctx.services.products.upsert(product),
        verbose("Failed to update product"),
    )
    .await
}

/// Soft delete. The product leaves the table on success.
pub async fn delete_product(ctx: &AppContext, id: i64) -> AdminResult<i64> {
    let products = &ctx.services.products;
    track(
        &ctx.store,
        ProductAction::Delete,
        async { products.delete(id).await.map(|_| id) },
        verbose("Failed to delete product"),
    )
    .await
}

pub async fn upload_product_image(
    ctx: &AppContext,
    product_id: i64,
    image: ImageUpload,
) -> AdminResult<ImageUploaded> {
    let products = &ctx.services.products;
    track(
        &ctx.store,
        ProductAction::UploadImage,
        async {
            products
                .upload_image(product_id, image)
                .await
                .and_then(saved)
                .map(|image_url| ImageUploaded {
                    product_id,
                    image_url,
                })
        },
        verbose("Failed to upload image"),
    )
    .await
}

/// Validates, creates or updates, then uploads the selected image against
/// the id the server returned.
///
/// The form keeps its image until the upload succeeds. Once the product is
/// saved the form takes its id, so a retry after a failed upload updates the
/// same product and sends the image again.
pub async fn save_product(ctx: &AppContext, form: &mut ProductForm) -> AdminResult<Product> {
    form.validate().map_err(|errors| AdminError::from_form(&errors))?;
    let payload = form.to_payload();

    let response = if form.is_edit() {
        update_product(ctx, &payload).await?
    } else {
        create_product(ctx, &payload).await?
    };
    let mut product = response.data.unwrap_or(payload);
    info!(product_id = ?product.id, name = %product.name, "Product saved");
    if product.id.is_some() {
        form.id = product.id;
    }

    if let Some(image) = form.image().cloned() {
        let id = product
            .id
            .ok_or_else(|| AdminError::validation("saved product has no id"))?;
        let uploaded = upload_product_image(ctx, id, image).await?;
        form.take_image();
        product.image_url = Some(uploaded.image_url);
    }
    Ok(product)
}

// =============================================================================
// Local actions
// =============================================================================

pub fn clear_product_error(ctx: &AppContext) {
    ctx.store.dispatch(ProductAction::ClearError);
}

pub fn clear_search_results(ctx: &AppContext) {
    ctx.store.dispatch(ProductAction::ClearSearchResults);
}

pub fn set_current_product(ctx: &AppContext, product: Option<Product>) {
    ctx.store.dispatch(ProductAction::SetCurrentProduct(product));
}
