//! Product endpoints.

use retail_core::forms::ImageUpload;
use retail_core::pagination::PageRequest;
use retail_core::types::{
    MessageResponse, Page, Product, ProductAttribute, ProductBulkRequest, ProductDeleteRequest,
    ProductInventory,
};
use tracing::error;

use crate::error::ClientResult;
use crate::http::{build_query, ApiClient};

const BASE: &str = "/products";

#[derive(Debug, Clone)]
pub struct ProductService {
    client: ApiClient,
}

impl ProductService {
    pub fn new(client: ApiClient) -> Self {
        ProductService { client }
    }

    /// `GET /products`: the whole catalog, unpaged.
    pub async fn get_all(&self) -> ClientResult<Vec<Product>> {
        self.client
            .get(BASE, &[])
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch products"))
    }

    /// `GET /products/page`.
    pub async fn get_paged(&self, request: &PageRequest) -> ClientResult<Page<Product>> {
        self.client
            .get(&format!("{}/page", BASE), &request.to_pairs())
            .await
            .inspect_err(|e| error!(error = %e, page = request.page, "Failed to fetch paged products"))
    }

    pub async fn get_by_id(&self, id: i64) -> ClientResult<Product> {
        self.client
            .get(&format!("{}/{}", BASE, id), &[])
            .await
            .inspect_err(|e| error!(error = %e, product_id = id, "Failed to fetch product"))
    }

    /// `GET /products/search?q=`.
    pub async fn search(&self, keyword: &str) -> ClientResult<Vec<Product>> {
        let query = build_query([("q", Some(keyword.to_string()))]);
        self.client
            .get(&format!("{}/search", BASE), &query)
            .await
            .inspect_err(|e| error!(error = %e, keyword, "Failed to search products"))
    }

    /// `GET /products/search/page?q&page&size&sortBy&sortDir`.
    pub async fn search_paged(
        &self,
        keyword: &str,
        request: &PageRequest,
    ) -> ClientResult<Page<Product>> {
        let mut query = build_query([("q", Some(keyword.to_string()))]);
        query.extend(request.to_pairs());
        self.client
            .get(&format!("{}/search/page", BASE), &query)
            .await
            .inspect_err(|e| error!(error = %e, keyword, "Failed to search paged products"))
    }

    pub async fn get_by_category(&self, category_id: i64) -> ClientResult<Vec<Product>> {
        self.client
            .get(&format!("{}/category/{}", BASE, category_id), &[])
            .await
            .inspect_err(|e| error!(error = %e, category_id, "Failed to fetch products by category"))
    }

    pub async fn get_by_barcode(&self, barcode: &str) -> ClientResult<Product> {
        self.client
            .get(&format!("{}/barcode/{}", BASE, barcode), &[])
            .await
            .inspect_err(|e| error!(error = %e, barcode, "Failed to fetch product by barcode"))
    }

    /// `POST /products/upsert`: creates when `id` is absent, updates otherwise.
    pub async fn upsert(&self, product: &Product) -> ClientResult<MessageResponse<Product>> {
        self.client
            .post(&format!("{}/upsert", BASE), product)
            .await
            .inspect_err(|e| error!(error = %e, product_id = ?product.id, "Failed to upsert product"))
    }

    /// Soft delete: an upsert of `{ id, status: "Deleted" }`.
    pub async fn delete(&self, id: i64) -> ClientResult<MessageResponse<Product>> {
        self.client
            .post(&format!("{}/upsert", BASE), &ProductDeleteRequest::new(id))
            .await
            .inspect_err(|e| error!(error = %e, product_id = id, "Failed to delete product"))
    }

    /// `POST /products/{id}/image`. The response data is the new image URL.
    pub async fn upload_image(
        &self,
        id: i64,
        file: ImageUpload,
    ) -> ClientResult<MessageResponse<String>> {
        self.client
            .upload(&format!("{}/{}/image", BASE, id), file)
            .await
            .inspect_err(|e| error!(error = %e, product_id = id, "Failed to upload product image"))
    }

    pub async fn get_attributes(&self, id: i64) -> ClientResult<Vec<ProductAttribute>> {
        self.client
            .get(&format!("{}/{}/attributes", BASE, id), &[])
            .await
            .inspect_err(|e| error!(error = %e, product_id = id, "Failed to fetch product attributes"))
    }

    pub async fn get_inventories(&self, id: i64) -> ClientResult<Vec<ProductInventory>> {
        self.client
            .get(&format!("{}/{}/inventories", BASE, id), &[])
            .await
            .inspect_err(|e| error!(error = %e, product_id = id, "Failed to fetch product inventories"))
    }

    pub async fn bulk_create(
        &self,
        items: Vec<Product>,
    ) -> ClientResult<MessageResponse<serde_json::Value>> {
        let count = items.len();
        self.client
            .post(&format!("{}/bulk-create", BASE), &ProductBulkRequest { items })
            .await
            .inspect_err(|e| error!(error = %e, count, "Failed to bulk create products"))
    }

    pub async fn bulk_update(
        &self,
        items: Vec<Product>,
    ) -> ClientResult<MessageResponse<serde_json::Value>> {
        let count = items.len();
        self.client
            .post(&format!("{}/bulk-update", BASE), &ProductBulkRequest { items })
            .await
            .inspect_err(|e| error!(error = %e, count, "Failed to bulk update products"))
    }

    /// `GET /products/with-stock`, optionally narrowed to a warehouse/branch.
    pub async fn get_with_stock(
        &self,
        warehouse_id: Option<i64>,
        branch_id: Option<i64>,
    ) -> ClientResult<Vec<Product>> {
        let query = build_query([
            ("warehouseId", warehouse_id.map(|id| id.to_string())),
            ("branchId", branch_id.map(|id| id.to_string())),
        ]);
        self.client
            .get(&format!("{}/with-stock", BASE), &query)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch products with stock"))
    }
}
