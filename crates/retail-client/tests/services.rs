//! Service calls against an in-process mock of the REST backend.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use jsonwebtoken::{encode, EncodingKey, Header};
use retail_client::{
    ApiClient, ClientConfig, ClientError, RecordingNavigator, Services, SessionContext,
};
use retail_core::forms::ImageUpload;
use retail_core::pagination::PageRequest;
use retail_core::session::{Session, SessionUser};
use chrono::NaiveDate;
use retail_core::types::{
    LoginRequest, PurchaseOrderItem, PurchaseOrderQuery, PurchaseOrderRequest, StockQuery,
    StockStatusFilter, StockTransferItem, StockTransferQuery, StockTransferRequest,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Recorded {
    auth_headers: Arc<Mutex<Vec<Option<String>>>>,
    queries: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
    deleted: Arc<Mutex<Vec<i64>>>,
}

fn token(exp_offset_secs: i64) -> String {
    let exp = chrono::Utc::now().timestamp() + exp_offset_secs;
    encode(
        &Header::default(),
        &json!({"sub": "admin", "exp": exp}),
        &EncodingKey::from_secret(b"mock"),
    )
    .unwrap()
}

async fn list_products(State(rec): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    rec.auth_headers.lock().unwrap().push(auth);
    Json(json!([
        {"id": 1, "name": "Sữa tươi", "retailPrice": 32000, "status": "Active"},
        {"id": 2, "name": "Bánh mì", "retailPrice": 15000, "status": "Inactive"}
    ]))
}

async fn paged_products() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "Paging is down"})),
    )
}

async fn stock(State(rec): State<Recorded>, RawQuery(query): RawQuery) -> Json<Value> {
    rec.queries.lock().unwrap().push(query.unwrap_or_default());
    Json(json!({
        "content": [{
            "productId": 7,
            "productName": "Nước suối",
            "onHand": 3,
            "reserved": 1,
            "available": 2,
            "stockStatus": "LOW_STOCK"
        }],
        "number": 0,
        "size": 20,
        "totalElements": 1,
        "totalPages": 1,
        "first": true,
        "last": true
    }))
}

async fn upload_image(Path(id): Path<i64>, mut multipart: Multipart) -> Json<Value> {
    let mut received = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap();
            received = Some((name, bytes.len()));
        }
    }
    let (name, len) = received.expect("file field");
    Json(json!({
        "message": format!("Uploaded {} bytes", len),
        "data": format!("/images/{}/{}", id, name)
    }))
}

async fn profile() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Token expired"})),
    )
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] != "secret" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Sai tên đăng nhập hoặc mật khẩu"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "userId": 1,
            "userName": body["userName"],
            "givenName": "Quản trị",
            "role": 1,
            "active": true,
            "token": token(3600),
            "refreshToken": "refresh-1",
            "branch": {"id": 3, "branchCode": "CN01", "name": "Chi nhánh 1"}
        })),
    )
}

async fn refresh(Json(body): Json<Value>) -> impl IntoResponse {
    if body["refreshToken"] != "refresh-1" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid refresh token"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"token": token(7200), "refreshToken": "refresh-2"})),
    )
}

async fn toggle_category(
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    Json(json!({
        "message": format!("Category {} isDeleted={}", id, params["isDeleted"]),
        "data": null
    }))
}

async fn toggle_supplier(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({
        "message": "Supplier status updated",
        "data": {"id": id, "name": "Công ty A", "isActive": false}
    }))
}

async fn list_transfers(State(rec): State<Recorded>, RawQuery(query): RawQuery) -> Json<Value> {
    rec.queries.lock().unwrap().push(query.unwrap_or_default());
    Json(json!({
        "content": [{
            "id": 4,
            "transferCode": "XK0004",
            "fromWarehouseName": "Kho tổng",
            "toBranchName": "Chi nhánh 2",
            "totalProducts": 2,
            "totalQuantity": 15,
            "transferDate": "2025-03-02T08:15:00",
            "status": "COMPLETED"
        }],
        "number": 0,
        "size": 10,
        "totalElements": 1,
        "totalPages": 1
    }))
}

async fn create_transfer(State(rec): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    rec.bodies.lock().unwrap().push(body);
    Json(json!({"transferId": 5, "transferCode": "XK0005"}))
}

async fn delete_transfer(State(rec): State<Recorded>, Path(id): Path<i64>) -> StatusCode {
    rec.deleted.lock().unwrap().push(id);
    StatusCode::OK
}

async fn list_purchases(State(rec): State<Recorded>, RawQuery(query): RawQuery) -> Json<Value> {
    rec.queries.lock().unwrap().push(query.unwrap_or_default());
    Json(json!({
        "content": [{
            "purchaseOrderId": 12,
            "code": "PN00012",
            "supplierName": "Vinamilk",
            "totalPayment": 1250000,
            "statusName": "Completed",
            "purchaseDate": "2025-03-01T02:00:00Z"
        }],
        "number": 0,
        "size": 20,
        "totalElements": 1,
        "totalPages": 1
    }))
}

async fn process_purchase(State(rec): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    rec.bodies.lock().unwrap().push(body);
    Json(json!({
        "purchaseOrderId": 13,
        "purchaseOrderCode": "PN00013",
        "batchId": 30,
        "lotCode": "LOT-30"
    }))
}

async fn purchase_print(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({
        "purchaseOrderId": id,
        "purchaseOrderCode": "PN00012",
        "purchaseDate": "01/03/2025",
        "total": 1300000,
        "totalPayment": 1250000,
        "discount": 50000,
        "supplier": {"supplierId": 2, "name": "Vinamilk", "phone": "1900636979"},
        "warehouse": {"warehouseId": 1, "name": "Kho tổng"},
        "items": [{"detailId": 1, "productId": 7, "name": "Sữa tươi", "unitPrice": 26000, "quantity": 50, "total": 1300000}]
    }))
}

async fn spawn_backend(rec: Recorded) -> SocketAddr {
    let app = Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/page", get(paged_products))
        .route("/api/products/{id}/image", post(upload_image))
        .route("/api/stock-management", get(stock))
        .route("/api/auth/profile", get(profile))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/categories/toggle-status/{id}", post(toggle_category))
        .route("/api/suppliers/{id}/toggle-status", put(toggle_supplier))
        .route("/api/stock-transfers", get(list_transfers).post(create_transfer))
        .route("/api/stock-transfers/{id}", delete(delete_transfer))
        .route("/api/purchase-orders", get(list_purchases))
        .route("/api/purchase-orders/process", post(process_purchase))
        .route("/api/purchase-orders/{id}/print", get(purchase_print))
        .with_state(rec);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn services_at(
    addr: SocketAddr,
    session: SessionContext,
    navigator: RecordingNavigator,
) -> Services {
    let mut config = ClientConfig::default();
    config.api.base_url = Some(format!("http://{}/api", addr));
    let client = ApiClient::new(&config, session, Arc::new(navigator)).unwrap();
    Services::new(client)
}

fn signed_in(token: String) -> Session {
    Session {
        token,
        refresh_token: Some("refresh-1".into()),
        user: SessionUser {
            user_id: Some(1),
            role: Some(1),
            ..Default::default()
        },
    }
}

#[tokio::test]
async fn test_bearer_token_attached_when_signed_in() {
    let rec = Recorded::default();
    let addr = spawn_backend(rec.clone()).await;
    let session = SessionContext::in_memory();
    let services = services_at(addr, session.clone(), RecordingNavigator::at("/products")).await;

    let products = services.products.get_all().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Sữa tươi");

    let jwt = token(3600);
    session.set(signed_in(jwt.clone())).await.unwrap();
    services.products.get_all().await.unwrap();

    let headers = rec.auth_headers.lock().unwrap().clone();
    assert_eq!(headers, vec![None, Some(format!("Bearer {}", jwt))]);
}

#[tokio::test]
async fn test_unauthorized_clears_session_and_redirects() {
    let addr = spawn_backend(Recorded::default()).await;
    let session = SessionContext::in_memory();
    session.set(signed_in(token(3600))).await.unwrap();
    let nav = RecordingNavigator::at("/vouchers");
    let services = services_at(addr, session.clone(), nav.clone()).await;

    let err = services.auth.profile().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.server_message(), Some("Token expired"));
    assert!(session.current().await.is_none());
    assert_eq!(nav.redirects(), vec!["/signin".to_string()]);
}

#[tokio::test]
async fn test_unauthorized_on_signin_page_does_not_redirect() {
    let addr = spawn_backend(Recorded::default()).await;
    let nav = RecordingNavigator::at("/signin");
    let services = services_at(addr, SessionContext::in_memory(), nav.clone()).await;

    assert!(services.auth.profile().await.is_err());
    assert!(nav.redirects().is_empty());
}

#[tokio::test]
async fn test_server_error_message_surfaces() {
    let addr = spawn_backend(Recorded::default()).await;
    let services =
        services_at(addr, SessionContext::in_memory(), RecordingNavigator::at("/")).await;

    let err = services
        .products
        .get_paged(&PageRequest::new(0, 10))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.describe("Failed to fetch products"), "Paging is down");
}

#[tokio::test]
async fn test_stock_query_skips_blank_filters() {
    let rec = Recorded::default();
    let addr = spawn_backend(rec.clone()).await;
    let services =
        services_at(addr, SessionContext::in_memory(), RecordingNavigator::at("/")).await;

    let query = StockQuery {
        search_term: Some("   ".into()),
        branch_id: Some(2),
        stock_status: StockStatusFilter::LowStock,
        ..Default::default()
    };
    let page = services.stock.overview(&query).await.unwrap();
    assert_eq!(page.total_elements, 1);
    assert!(page.content[0].needs_attention());

    let sent = rec.queries.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec!["branchId=2&stockStatus=LOW_STOCK&page=0&size=20&sortBy=productName&sortDirection=ASC"
            .to_string()]
    );
}

#[tokio::test]
async fn test_image_upload_is_multipart() {
    let addr = spawn_backend(Recorded::default()).await;
    let services =
        services_at(addr, SessionContext::in_memory(), RecordingNavigator::at("/")).await;

    let image = ImageUpload::new("milk.png", "image/png", vec![0u8; 128]).unwrap();
    let response = services.products.upload_image(42, image).await.unwrap();
    assert_eq!(response.message, "Uploaded 128 bytes");
    assert_eq!(response.data.as_deref(), Some("/images/42/milk.png"));
}

#[tokio::test]
async fn test_login_and_refresh_update_session() {
    let addr = spawn_backend(Recorded::default()).await;
    let session = SessionContext::in_memory();
    let services = services_at(addr, session.clone(), RecordingNavigator::at("/signin")).await;

    let bad = services
        .auth
        .login(&LoginRequest {
            user_name: "admin".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(bad.status(), Some(400));
    assert!(session.current().await.is_none());

    let response = services
        .auth
        .login(&LoginRequest {
            user_name: "admin".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    let stored = session.current().await.unwrap();
    assert_eq!(Some(stored.token.clone()), response.token);
    assert_eq!(stored.user.branch.and_then(|b| b.id), Some(3));

    services.auth.refresh().await.unwrap();
    let refreshed = session.current().await.unwrap();
    assert_ne!(refreshed.token, stored.token);
    assert_eq!(refreshed.refresh_token.as_deref(), Some("refresh-2"));

    // refresh-2 is rejected by the mock: the session ends
    assert!(services.auth.refresh().await.is_err());
    assert!(session.current().await.is_none());
    assert!(matches!(
        services.auth.refresh().await,
        Err(ClientError::NoRefreshToken)
    ));
}

#[tokio::test]
async fn test_toggle_endpoints() {
    let addr = spawn_backend(Recorded::default()).await;
    let services =
        services_at(addr, SessionContext::in_memory(), RecordingNavigator::at("/")).await;

    let category = services.categories.toggle_status(5, true).await.unwrap();
    assert_eq!(category.message, "Category 5 isDeleted=true");

    let supplier = services.suppliers.toggle_status(9).await.unwrap();
    let data = supplier.data.unwrap();
    assert_eq!(data.id, Some(9));
    assert!(!data.is_active);
}

#[tokio::test]
async fn test_stock_transfer_endpoints() {
    let rec = Recorded::default();
    let addr = spawn_backend(rec.clone()).await;
    let services =
        services_at(addr, SessionContext::in_memory(), RecordingNavigator::at("/")).await;

    let query = StockTransferQuery {
        to_branch_id: Some(2),
        transfer_date_from: NaiveDate::from_ymd_opt(2025, 3, 1),
        ..Default::default()
    };
    let page = services.transfers.list(&query).await.unwrap();
    assert_eq!(page.content[0].transfer_code.as_deref(), Some("XK0004"));
    assert_eq!(page.content[0].total_quantity, 15);
    assert_eq!(
        rec.queries.lock().unwrap().clone(),
        vec!["toBranchId=2&transferDateFrom=2025-03-01&page=0&size=10".to_string()]
    );

    let created = services
        .transfers
        .create(&StockTransferRequest {
            from_warehouse_id: None,
            to_branch_id: 2,
            description: String::new(),
            created_by: 1,
            items: vec![StockTransferItem {
                product_id: 7,
                quantity: 15,
            }],
        })
        .await
        .unwrap();
    assert_eq!(created.transfer_code, "XK0005");
    let body = rec.bodies.lock().unwrap()[0].clone();
    assert_eq!(body["toBranchId"], 2);
    assert!(body["fromWarehouseId"].is_null());
    assert_eq!(body["items"][0]["quantity"], 15);

    services.transfers.delete(4).await.unwrap();
    assert_eq!(rec.deleted.lock().unwrap().clone(), vec![4]);
}

#[tokio::test]
async fn test_purchase_order_endpoints() {
    let rec = Recorded::default();
    let addr = spawn_backend(rec.clone()).await;
    let services =
        services_at(addr, SessionContext::in_memory(), RecordingNavigator::at("/")).await;

    let page = services.purchases.list(&PurchaseOrderQuery::default()).await.unwrap();
    assert_eq!(page.content[0].total_payment, Some(1_250_000.0));
    assert_eq!(
        rec.queries.lock().unwrap().clone(),
        vec!["page=0&size=20&sortBy=createdDate&sortDirection=DESC".to_string()]
    );

    let created = services
        .purchases
        .process(&PurchaseOrderRequest {
            supplier_id: 2,
            expected_delivery_date: None,
            delivery_date: NaiveDate::from_ymd_opt(2025, 3, 5).and_then(|d| d.and_hms_opt(0, 0, 0)),
            description: String::new(),
            total: 1_300_000.0,
            total_payment: 1_250_000.0,
            discount: 50_000.0,
            discount_ratio: 0.0,
            created_by: 1,
            items: vec![PurchaseOrderItem {
                product_id: 7,
                quantity: 50,
                unit_price: 26_000.0,
                expired_date: None,
            }],
        })
        .await
        .unwrap();
    assert_eq!(created.lot_code.as_deref(), Some("LOT-30"));
    let body = rec.bodies.lock().unwrap()[0].clone();
    assert_eq!(body["deliveryDate"], "2025-03-05T00:00:00");

    let print = services.purchases.print_data(12).await.unwrap();
    assert_eq!(print.purchase_order_id, 12);
    assert_eq!(print.supplier.and_then(|s| s.id), Some(2));
    assert_eq!(print.warehouse.and_then(|w| w.name).as_deref(), Some("Kho tổng"));
    assert_eq!(print.items[0].quantity, 50);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let services =
        services_at(addr, SessionContext::in_memory(), RecordingNavigator::at("/")).await;
    let err = services.branches.get_all().await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.describe("Failed to fetch branches"), "Failed to fetch branches");
}
