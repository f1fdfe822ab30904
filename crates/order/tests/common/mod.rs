#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use bakery_order::{
    abstract_trait::{
        health::HealthRepositoryTrait,
        order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    },
    di::DependenciesInjectDeps,
    domain::requests::order::{CreateOrderRecordRequest, UpdateOrderStatusRecordRequest},
    handler::AppRouter,
    model::order::Order,
    state::AppState,
};
use chrono::Utc;
use serde_json::Value;
use shared::errors::RepositoryError;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use tower::ServiceExt;

#[derive(Default)]
struct Rows {
    next_id: i32,
    orders: Vec<Order>,
}

/// Stand-in for the `orders` table with the same uniqueness and ordering rules.
#[derive(Default)]
pub struct InMemoryStore {
    rows: Mutex<Rows>,
    down: AtomicBool,
    lookups_failing: AtomicBool,
}

impl InMemoryStore {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// Makes `find_by_id` fail while writes keep working.
    pub fn set_lookups_failing(&self, failing: bool) {
        self.lookups_failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(RepositoryError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        self.check()?;
        let mut orders = self.rows.lock().unwrap().orders.clone();
        orders.sort_by(|a, b| {
            b.order_date
                .cmp(&a.order_date)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(orders)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        self.check()?;
        if self.lookups_failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        let rows = self.rows.lock().unwrap();
        Ok(rows.orders.iter().find(|o| o.id == id).cloned())
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryStore {
    async fn create_order(&self, req: &CreateOrderRecordRequest) -> Result<i32, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();

        if rows.orders.iter().any(|o| o.order_id == req.order_id) {
            return Err(RepositoryError::AlreadyExists(format!(
                "Order with order_id '{}' already exists",
                req.order_id
            )));
        }

        rows.next_id += 1;
        let id = rows.next_id;
        let now = Utc::now();

        rows.orders.push(Order {
            id,
            order_id: req.order_id.clone(),
            customer_name: req.customer_name.clone(),
            contact_number: req.contact_number.clone(),
            item: req.item.clone(),
            quantity: req.quantity,
            order_date: req.order_date,
            status: req.status.to_string(),
            created_at: now,
            updated_at: now,
        });

        Ok(id)
    }

    async fn update_order_status(
        &self,
        req: &UpdateOrderStatusRecordRequest,
    ) -> Result<(), RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();

        let order = rows
            .orders
            .iter_mut()
            .find(|o| o.id == req.id)
            .ok_or(RepositoryError::NotFound)?;

        order.status = req.status.to_string();
        order.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();

        let before = rows.orders.len();
        rows.orders.retain(|o| o.id != id);

        if rows.orders.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl HealthRepositoryTrait for InMemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check()
    }
}

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());

        let deps = DependenciesInjectDeps {
            order_query: store.clone(),
            order_command: store.clone(),
            health: store.clone(),
        };

        let router = AppRouter::build(AppState::from_deps(deps, Vec::new()));

        Self { store, router }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let (status, text) = self.send(request).await;
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap()
        };
        (status, value)
    }

    pub async fn raw(&self, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, text) = self.send(request).await;
        (status, serde_json::from_str(&text).unwrap())
    }
}
