//! Product slice.
//!
//! Holds the product table (server paginated), the product being edited,
//! and the quick-search results.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{type_name, Lifecycle, RequestState};
use crate::types::{MessageResponse, Page, Product, ProductStatus};
use crate::LIST_PAGE_SIZE;

const SLICE: &str = "products";

// =============================================================================
// State
// =============================================================================

/// Filter controls above the product table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductFilters {
    pub category: Option<i64>,
    pub search: String,
    pub status: Option<ProductStatus>,
}

impl Default for ProductFilters {
    fn default() -> Self {
        ProductFilters {
            category: None,
            search: String::new(),
            status: Some(ProductStatus::Active),
        }
    }
}

/// Partial filter update. `None` keeps the current value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductFiltersPatch {
    pub category: Option<Option<i64>>,
    pub search: Option<String>,
    pub status: Option<Option<ProductStatus>>,
}

/// Server pagination of the product table. `page` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductPagination {
    pub page: usize,
    pub size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Default for ProductPagination {
    fn default() -> Self {
        ProductPagination {
            page: 0,
            size: LIST_PAGE_SIZE,
            total: 0,
            total_pages: 0,
            has_next: false,
            has_previous: false,
        }
    }
}

impl<T> From<&Page<T>> for ProductPagination {
    fn from(page: &Page<T>) -> Self {
        ProductPagination {
            page: page.number,
            size: if page.size == 0 { LIST_PAGE_SIZE } else { page.size },
            total: page.total_elements,
            total_pages: page.total_pages,
            has_next: !page.last,
            has_previous: !page.first,
        }
    }
}

/// Partial pagination update. `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductPaginationPatch {
    pub page: Option<usize>,
    pub size: Option<usize>,
}

/// A product page, and whether it was cut from the unpaged list.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedProducts {
    pub page: Page<Product>,
    pub from_fallback: bool,
}

/// Result of an image upload: the product and its new image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUploaded {
    pub product_id: i64,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSlice {
    pub products: Vec<Product>,
    pub current_product: Option<Product>,
    pub search_results: Vec<Product>,
    #[serde(flatten)]
    pub request: RequestState,
    pub filters: ProductFilters,
    pub pagination: ProductPagination,
    /// True when the table shows a page cut client-side from the full list.
    pub served_by_fallback: bool,
}

// =============================================================================
// Actions
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    FetchAll(Lifecycle<Vec<Product>>),
    FetchPaged(Lifecycle<PagedProducts>),
    FetchById(Lifecycle<Product>),
    Search(Lifecycle<Vec<Product>>),
    SearchPaged(Lifecycle<Page<Product>>),
    FetchByCategory(Lifecycle<Vec<Product>>),
    Create(Lifecycle<MessageResponse<Product>>),
    Update(Lifecycle<MessageResponse<Product>>),
    /// Payload: the id of the soft-deleted product.
    Delete(Lifecycle<i64>),
    UploadImage(Lifecycle<ImageUploaded>),
    FetchWithStock(Lifecycle<Vec<Product>>),
    ClearError,
    ClearCurrentProduct,
    ClearSearchResults,
    UpdateFilters(ProductFiltersPatch),
    UpdatePagination(ProductPaginationPatch),
    SetCurrentProduct(Option<Product>),
}

impl ProductAction {
    /// Action type string, e.g. `products/create/fulfilled`.
    pub fn name(&self) -> String {
        match self {
            ProductAction::FetchAll(p) => type_name(SLICE, "fetchAll", p),
            ProductAction::FetchPaged(p) => type_name(SLICE, "fetchPaged", p),
            ProductAction::FetchById(p) => type_name(SLICE, "fetchById", p),
            ProductAction::Search(p) => type_name(SLICE, "search", p),
            ProductAction::SearchPaged(p) => type_name(SLICE, "searchPaged", p),
            ProductAction::FetchByCategory(p) => type_name(SLICE, "fetchByCategory", p),
            ProductAction::Create(p) => type_name(SLICE, "create", p),
            ProductAction::Update(p) => type_name(SLICE, "update", p),
            ProductAction::Delete(p) => type_name(SLICE, "delete", p),
            ProductAction::UploadImage(p) => type_name(SLICE, "uploadImage", p),
            ProductAction::FetchWithStock(p) => type_name(SLICE, "fetchWithStock", p),
            ProductAction::ClearError => format!("{}/clearError", SLICE),
            ProductAction::ClearCurrentProduct => format!("{}/clearCurrentProduct", SLICE),
            ProductAction::ClearSearchResults => format!("{}/clearSearchResults", SLICE),
            ProductAction::UpdateFilters(_) => format!("{}/updateFilters", SLICE),
            ProductAction::UpdatePagination(_) => format!("{}/updatePagination", SLICE),
            ProductAction::SetCurrentProduct(_) => format!("{}/setCurrentProduct", SLICE),
        }
    }
}

// =============================================================================
// Reducer
// =============================================================================

impl ProductSlice {
    pub fn reduce(&mut self, action: ProductAction) {
        match action {
            ProductAction::FetchAll(phase)
            | ProductAction::FetchByCategory(phase)
            | ProductAction::FetchWithStock(phase) => {
                if let Some(list) = self.request.apply(phase) {
                    self.products = list;
                    self.served_by_fallback = false;
                }
            }
            ProductAction::FetchPaged(phase) => {
                if let Some(paged) = self.request.apply(phase) {
                    self.store_page(paged.page);
                    self.served_by_fallback = paged.from_fallback;
                }
            }
            ProductAction::SearchPaged(phase) => {
                if let Some(page) = self.request.apply(phase) {
                    self.store_page(page);
                    self.served_by_fallback = false;
                }
            }
            ProductAction::FetchById(phase) => {
                if let Some(product) = self.request.apply(phase) {
                    self.current_product = Some(product);
                }
            }
            ProductAction::Search(phase) => {
                if let Some(results) = self.request.apply(phase) {
                    self.search_results = results;
                }
            }
            ProductAction::Create(phase) => {
                if let Some(product) = self.request.apply(phase).and_then(|r| r.data) {
                    self.products.insert(0, product);
                }
            }
            ProductAction::Update(phase) => {
                if let Some(product) = self.request.apply(phase).and_then(|r| r.data) {
                    if let Some(existing) = self
                        .products
                        .iter_mut()
                        .find(|p| p.id.is_some() && p.id == product.id)
                    {
                        *existing = product.clone();
                    }
                    self.current_product = Some(product);
                }
            }
            ProductAction::Delete(phase) => {
                if let Some(id) = self.request.apply(phase) {
                    self.products.retain(|p| p.id != Some(id));
                }
            }
            ProductAction::UploadImage(phase) => {
                if let Some(uploaded) = self.request.apply(phase) {
                    let id = Some(uploaded.product_id);
                    if let Some(product) = self.products.iter_mut().find(|p| p.id == id) {
                        product.image_url = Some(uploaded.image_url.clone());
                    }
                    if let Some(current) = self.current_product.as_mut().filter(|p| p.id == id) {
                        current.image_url = Some(uploaded.image_url);
                    }
                }
            }
            ProductAction::ClearError => self.request.clear_error(),
            ProductAction::ClearCurrentProduct => self.current_product = None,
            ProductAction::ClearSearchResults => self.search_results.clear(),
            ProductAction::UpdateFilters(patch) => {
                if let Some(category) = patch.category {
                    self.filters.category = category;
                }
                if let Some(search) = patch.search {
                    self.filters.search = search;
                }
                if let Some(status) = patch.status {
                    self.filters.status = status;
                }
            }
            ProductAction::UpdatePagination(patch) => {
                if let Some(page) = patch.page {
                    self.pagination.page = page;
                }
                if let Some(size) = patch.size {
                    self.pagination.size = size;
                }
            }
            ProductAction::SetCurrentProduct(product) => self.current_product = product,
        }
    }

    /// Overwrites the table and its pagination with a server page.
    fn store_page(&mut self, page: Page<Product>) {
        self.pagination = ProductPagination::from(&page);
        self.products = page.content;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::slice_page;
    use crate::slices::LoadStatus;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: Some(id),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn saved(p: Product) -> MessageResponse<Product> {
        MessageResponse::with_data("Saved", p)
    }

    #[test]
    fn test_initial_state() {
        let slice = ProductSlice::default();
        assert_eq!(slice.request.status, LoadStatus::Idle);
        assert_eq!(slice.filters.status, Some(ProductStatus::Active));
        assert_eq!(slice.pagination.size, 10);
        assert!(!slice.served_by_fallback);
    }

    #[test]
    fn test_fetch_paged_overwrites_pagination() {
        let mut slice = ProductSlice::default();
        slice.reduce(ProductAction::FetchPaged(Lifecycle::Pending));
        assert!(slice.request.is_loading());

        let all: Vec<Product> = (1..=25).map(|i| product(i, "P")).collect();
        slice.reduce(ProductAction::FetchPaged(Lifecycle::Fulfilled(PagedProducts {
            page: slice_page(&all, 1, 10),
            from_fallback: true,
        })));

        assert_eq!(slice.request.status, LoadStatus::Success);
        assert_eq!(slice.products.len(), 10);
        assert_eq!(slice.products[0].id, Some(11));
        assert_eq!(
            slice.pagination,
            ProductPagination {
                page: 1,
                size: 10,
                total: 25,
                total_pages: 3,
                has_next: true,
                has_previous: true,
            }
        );
        assert!(slice.served_by_fallback);
    }

    #[test]
    fn test_rejection_keeps_data() {
        let mut slice = ProductSlice {
            products: vec![product(1, "A")],
            ..Default::default()
        };
        slice.reduce(ProductAction::FetchAll(Lifecycle::Pending));
        slice.reduce(ProductAction::FetchAll(Lifecycle::Rejected("Network error".into())));
        assert_eq!(slice.request.status, LoadStatus::Error);
        assert_eq!(slice.request.error.as_deref(), Some("Network error"));
        assert_eq!(slice.products.len(), 1);

        slice.reduce(ProductAction::ClearError);
        assert_eq!(slice.request.error, None);
    }

    #[test]
    fn test_create_prepends() {
        let mut slice = ProductSlice {
            products: vec![product(1, "A")],
            ..Default::default()
        };
        slice.reduce(ProductAction::Create(Lifecycle::Fulfilled(saved(product(2, "B")))));
        assert_eq!(slice.products[0].id, Some(2));
        assert_eq!(slice.products.len(), 2);

        // a response without data leaves the list alone
        slice.reduce(ProductAction::Create(Lifecycle::Fulfilled(MessageResponse {
            message: "ok".into(),
            data: None,
        })));
        assert_eq!(slice.products.len(), 2);
    }

    #[test]
    fn test_update_replaces_and_sets_current() {
        let mut slice = ProductSlice {
            products: vec![product(1, "A"), product(2, "B")],
            ..Default::default()
        };
        slice.reduce(ProductAction::Update(Lifecycle::Fulfilled(saved(product(2, "B2")))));
        assert_eq!(slice.products[1].name, "B2");
        assert_eq!(slice.current_product.as_ref().map(|p| p.name.as_str()), Some("B2"));
    }

    #[test]
    fn test_delete_removes_by_id() {
        let mut slice = ProductSlice {
            products: vec![product(1, "A"), product(2, "B")],
            ..Default::default()
        };
        slice.reduce(ProductAction::Delete(Lifecycle::Fulfilled(1)));
        assert_eq!(slice.products.len(), 1);
        assert_eq!(slice.products[0].id, Some(2));
    }

    #[test]
    fn test_upload_image_updates_list_and_current() {
        let mut slice = ProductSlice {
            products: vec![product(1, "A")],
            current_product: Some(product(1, "A")),
            ..Default::default()
        };
        slice.reduce(ProductAction::UploadImage(Lifecycle::Fulfilled(ImageUploaded {
            product_id: 1,
            image_url: "/uploads/p1.png".into(),
        })));
        assert_eq!(slice.products[0].image_url.as_deref(), Some("/uploads/p1.png"));
        assert_eq!(
            slice.current_product.unwrap().image_url.as_deref(),
            Some("/uploads/p1.png")
        );
    }

    #[test]
    fn test_local_actions() {
        let mut slice = ProductSlice::default();
        slice.reduce(ProductAction::UpdateFilters(ProductFiltersPatch {
            search: Some("sữa".into()),
            ..Default::default()
        }));
        assert_eq!(slice.filters.search, "sữa");
        assert_eq!(slice.filters.status, Some(ProductStatus::Active));

        slice.reduce(ProductAction::UpdateFilters(ProductFiltersPatch {
            status: Some(None),
            category: Some(Some(4)),
            ..Default::default()
        }));
        assert_eq!(slice.filters.status, None);
        assert_eq!(slice.filters.category, Some(4));

        slice.reduce(ProductAction::UpdatePagination(ProductPaginationPatch {
            page: Some(3),
            size: None,
        }));
        assert_eq!(slice.pagination.page, 3);
        assert_eq!(slice.pagination.size, 10);

        slice.reduce(ProductAction::SetCurrentProduct(Some(product(5, "E"))));
        slice.reduce(ProductAction::ClearCurrentProduct);
        assert!(slice.current_product.is_none());

        slice.search_results = vec![product(1, "A")];
        slice.reduce(ProductAction::ClearSearchResults);
        assert!(slice.search_results.is_empty());
    }

    #[test]
    fn test_action_names() {
        assert_eq!(
            ProductAction::FetchPaged(Lifecycle::Pending).name(),
            "products/fetchPaged/pending"
        );
        assert_eq!(ProductAction::ClearError.name(), "products/clearError");
    }
}
