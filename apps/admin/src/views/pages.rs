//! Page controllers.
//!
//! Products and stock page on the server: every search, filter or page change
//! re-fetches. Categories, vouchers, branches and suppliers hold their whole
//! list and filter it in the slice.

use retail_client::Debouncer;
use retail_core::filter::StatusFilter;
use retail_core::pagination::PageRequest;
use retail_core::slices::product::{ProductFiltersPatch, ProductPaginationPatch};
use retail_core::slices::stock::{StockFiltersPatch, StockPaginationPatch};
use retail_core::slices::{
    BranchAction, CategoryAction, ListPaginationPatch, ProductAction, StockAction, SupplierAction,
    VoucherAction,
};
use tracing::warn;

use super::list::{ListView, PaginationView};
use crate::commands::{product, stock};
use crate::error::AdminResult;
use crate::state::AppContext;

// =============================================================================
// Server-paginated pages
// =============================================================================

/// The product table. Typing in the search box is debounced.
#[derive(Debug)]
pub struct ProductsPage {
    ctx: AppContext,
    search: Debouncer,
}

impl ProductsPage {
    pub fn new(ctx: AppContext) -> Self {
        ProductsPage {
            ctx,
            search: Debouncer::for_search(),
        }
    }

    pub async fn load(&self) -> AdminResult<()> {
        self.fetch_current().await
    }

    /// Records the term and schedules a fetch of page 0 after the debounce
    /// delay. Must be called from within a tokio runtime.
    pub fn search(&self, term: impl Into<String>) {
        self.ctx.store.dispatch(ProductAction::UpdateFilters(ProductFiltersPatch {
            search: Some(term.into()),
            ..Default::default()
        }));
        self.ctx
            .store
            .dispatch(ProductAction::UpdatePagination(ProductPaginationPatch {
                page: Some(0),
                size: None,
            }));

        let ctx = self.ctx.clone();
        self.search.call(async move {
            if let Err(e) = fetch(&ctx).await {
                warn!(error = %e, "Product search failed");
            }
        });
    }

    /// Zero-based.
    pub async fn go_to_page(&self, page: usize) -> AdminResult<()> {
        self.ctx
            .store
            .dispatch(ProductAction::UpdatePagination(ProductPaginationPatch {
                page: Some(page),
                size: None,
            }));
        self.fetch_current().await
    }

    /// Changing the size starts again from page 0.
    pub async fn set_page_size(&self, size: usize) -> AdminResult<()> {
        self.ctx
            .store
            .dispatch(ProductAction::UpdatePagination(ProductPaginationPatch {
                page: Some(0),
                size: Some(size),
            }));
        self.fetch_current().await
    }

    pub async fn delete(&self, id: i64) -> AdminResult<()> {
        product::delete_product(&self.ctx, id).await?;
        self.fetch_current().await
    }

    pub fn view(&self) -> (ListView, PaginationView) {
        self.ctx.store.select(|s| {
            (
                ListView::of(&s.products.request),
                PaginationView::server(&s.products.pagination),
            )
        })
    }

    pub fn dismiss_error(&self) {
        product::clear_product_error(&self.ctx);
    }

    async fn fetch_current(&self) -> AdminResult<()> {
        self.search.cancel();
        fetch(&self.ctx).await
    }
}

/// The search term decides between the paged search and the plain page.
async fn fetch(ctx: &AppContext) -> AdminResult<()> {
    let (term, pagination) = ctx
        .store
        .select(|s| (s.products.filters.search.trim().to_string(), s.products.pagination));
    let request = PageRequest::new(pagination.page, pagination.size);
    if term.is_empty() {
        product::fetch_products_paged(ctx, request).await.map(|_| ())
    } else {
        product::search_products_paged(ctx, &term, request)
            .await
            .map(|_| ())
    }
}

/// The stock overview. Filter changes go back to page 0.
#[derive(Debug)]
pub struct StockPage {
    ctx: AppContext,
    search: Debouncer,
}

impl StockPage {
    pub fn new(ctx: AppContext) -> Self {
        StockPage {
            ctx,
            search: Debouncer::for_search(),
        }
    }

    pub async fn load(&self) -> AdminResult<()> {
        stock::fetch_stock(&self.ctx).await.map(|_| ())
    }

    /// Debounced. Must be called from within a tokio runtime.
    pub fn search(&self, term: impl Into<String>) {
        let patch = StockFiltersPatch {
            search_term: Some(term.into()),
            ..Default::default()
        };
        let ctx = self.ctx.clone();
        self.search.call(async move {
            if let Err(e) = apply_stock_filters(&ctx, patch).await {
                warn!(error = %e, "Stock search failed");
            }
        });
    }

    pub async fn set_filters(&self, patch: StockFiltersPatch) -> AdminResult<()> {
        self.search.cancel();
        apply_stock_filters(&self.ctx, patch).await
    }

    /// Zero-based.
    pub async fn go_to_page(&self, page: usize) -> AdminResult<()> {
        stock::change_stock_page(
            &self.ctx,
            StockPaginationPatch {
                current_page: Some(page),
                page_size: None,
            },
        )
        .await
        .map(|_| ())
    }

    pub async fn reset(&self) -> AdminResult<()> {
        self.search.cancel();
        stock::reset_stock_filters(&self.ctx).await.map(|_| ())
    }

    pub fn view(&self) -> ListView {
        self.ctx.store.select(|s| ListView::of(&s.stock.request))
    }

    pub fn dismiss_error(&self) {
        stock::clear_stock_error(&self.ctx);
    }
}

async fn apply_stock_filters(ctx: &AppContext, patch: StockFiltersPatch) -> AdminResult<()> {
    ctx.store.dispatch(StockAction::SetPagination(StockPaginationPatch {
        current_page: Some(0),
        page_size: None,
    }));
    stock::update_stock_filters(ctx, patch).await.map(|_| ())
}

// =============================================================================
// Locally filtered pages
// =============================================================================

/// A page whose table is filtered and paginated in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalPage {
    Categories,
    Vouchers,
    Branches,
    Suppliers,
}

impl LocalPage {
    /// Re-runs the search predicate and returns to the first page.
    pub fn search(self, ctx: &AppContext, term: impl Into<String>) {
        let term = term.into();
        match self {
            LocalPage::Categories => ctx.store.dispatch(CategoryAction::SetSearch(term)),
            LocalPage::Vouchers => ctx.store.dispatch(VoucherAction::SetSearchTerm(term)),
            LocalPage::Branches => ctx.store.dispatch(BranchAction::SetSearchTerm(term)),
            LocalPage::Suppliers => ctx.store.dispatch(SupplierAction::SetSearchTerm(term)),
        }
    }

    pub fn filter_status(self, ctx: &AppContext, status: StatusFilter) {
        match self {
            LocalPage::Categories => ctx.store.dispatch(CategoryAction::SetStatusFilter(status)),
            LocalPage::Vouchers => ctx.store.dispatch(VoucherAction::SetStatusFilter(status)),
            LocalPage::Branches => ctx.store.dispatch(BranchAction::SetStatusFilter(status)),
            LocalPage::Suppliers => ctx.store.dispatch(SupplierAction::SetStatusFilter(status)),
        }
    }

    /// Zero-based, like the page buttons.
    pub fn go_to_page(self, ctx: &AppContext, page: usize) {
        let one_based = ListPaginationPatch {
            current_page: Some(page + 1),
            page_size: None,
        };
        match self {
            LocalPage::Categories => ctx.store.dispatch(CategoryAction::SetPage(page)),
            LocalPage::Vouchers => ctx.store.dispatch(VoucherAction::SetPagination(one_based)),
            LocalPage::Branches => ctx.store.dispatch(BranchAction::SetPagination(one_based)),
            LocalPage::Suppliers => ctx.store.dispatch(SupplierAction::SetPagination(one_based)),
        }
    }

    pub fn dismiss_error(self, ctx: &AppContext) {
        match self {
            LocalPage::Categories => ctx.store.dispatch(CategoryAction::ClearError),
            LocalPage::Vouchers => ctx.store.dispatch(VoucherAction::ClearError),
            LocalPage::Branches => ctx.store.dispatch(BranchAction::ClearError),
            LocalPage::Suppliers => ctx.store.dispatch(SupplierAction::ClearError),
        }
    }

    pub fn view(self, ctx: &AppContext) -> (ListView, PaginationView) {
        ctx.store.select(|s| match self {
            LocalPage::Categories => (
                ListView::of(&s.categories.request),
                PaginationView::local(&s.categories.list),
            ),
            LocalPage::Vouchers => (
                ListView::of(&s.vouchers.request),
                PaginationView::local(&s.vouchers.list),
            ),
            LocalPage::Branches => (
                ListView::of(&s.branches.request),
                PaginationView::local(&s.branches.list),
            ),
            LocalPage::Suppliers => (
                ListView::of(&s.suppliers.request),
                PaginationView::local(&s.suppliers.list),
            ),
        })
    }
}
