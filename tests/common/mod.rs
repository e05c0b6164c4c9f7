#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, extract::ConnectInfo};
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use click_tracker::application::services::ClickService;
use click_tracker::domain::click_worker::ClickWriter;
use click_tracker::domain::entities::{Campaign, CampaignStatus, NewClick};
use click_tracker::domain::fraud::{FraudPipeline, FraudPolicy};
use click_tracker::domain::repositories::{
    BlocklistRepository, CampaignRepository, ClickRepository,
};
use click_tracker::error::AppError;
use click_tracker::routes::app_router;
use click_tracker::state::AppState;
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tower::Layer;
use tracing::Span;
use uuid::Uuid;

pub const PEER_IP: &str = "127.0.0.1";

/// Campaign storage backed by a map, optionally failing every call.
#[derive(Default)]
pub struct InMemoryCampaigns {
    campaigns: Mutex<HashMap<Uuid, Campaign>>,
    pub unavailable: bool,
}

impl InMemoryCampaigns {
    pub fn with(campaigns: Vec<Campaign>) -> Self {
        Self {
            campaigns: Mutex::new(campaigns.into_iter().map(|c| (c.link_id, c)).collect()),
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCampaigns {
    async fn find_by_link_id(&self, link_id: Uuid) -> Result<Option<Campaign>, AppError> {
        if self.unavailable {
            return Err(AppError::internal("storage unavailable"));
        }
        Ok(self.campaigns.lock().unwrap().get(&link_id).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.unavailable {
            return Err(AppError::internal("storage unavailable"));
        }
        Ok(())
    }
}

/// Click storage that reports a fixed recent-click count per address.
#[derive(Default)]
pub struct InMemoryClicks {
    pub inserted: Mutex<Vec<NewClick>>,
    recent: Mutex<HashMap<String, i64>>,
}

impl InMemoryClicks {
    pub fn with_recent(ip: &str, count: i64) -> Self {
        let clicks = Self::default();
        clicks.recent.lock().unwrap().insert(ip.to_string(), count);
        clicks
    }
}

#[async_trait]
impl ClickRepository for InMemoryClicks {
    async fn insert(&self, click: NewClick) -> Result<(), AppError> {
        self.inserted.lock().unwrap().push(click);
        Ok(())
    }

    async fn count_by_ip_within(&self, ip: &str, _window: Duration) -> Result<i64, AppError> {
        Ok(self.recent.lock().unwrap().get(ip).copied().unwrap_or(0))
    }
}

#[derive(Default)]
pub struct InMemoryBlocklist {
    values: Mutex<HashSet<String>>,
}

impl InMemoryBlocklist {
    pub fn with(values: &[&str]) -> Self {
        Self {
            values: Mutex::new(values.iter().map(|v| v.to_string()).collect()),
        }
    }
}

#[async_trait]
impl BlocklistRepository for InMemoryBlocklist {
    async fn is_blocked(&self, value: &str) -> Result<bool, AppError> {
        Ok(self.values.lock().unwrap().contains(value))
    }
}

/// An active campaign whose window spans the current time.
pub fn live_campaign(template: &str) -> Campaign {
    let now = Utc::now();
    Campaign {
        campaign_id: Uuid::new_v4(),
        link_id: Uuid::new_v4(),
        status: CampaignStatus::Active,
        start_date: Some(now - Duration::days(1)),
        end_date: Some(now + Duration::days(1)),
        target_url: template.to_string(),
    }
}

pub struct TestStorage {
    pub campaigns: InMemoryCampaigns,
    pub clicks: InMemoryClicks,
    pub blocklist: InMemoryBlocklist,
}

impl TestStorage {
    pub fn with_campaigns(campaigns: Vec<Campaign>) -> Self {
        Self {
            campaigns: InMemoryCampaigns::with(campaigns),
            clicks: InMemoryClicks::default(),
            blocklist: InMemoryBlocklist::default(),
        }
    }
}

/// Builds application state over in-memory storage.
///
/// No worker drains the click queue; tests read dispatched records from the
/// returned receiver.
pub fn create_test_state(storage: TestStorage) -> (AppState, mpsc::Receiver<NewClick>) {
    let (tx, rx) = mpsc::channel(100);
    let policy = FraudPolicy::default();

    let campaigns: Arc<dyn CampaignRepository> = Arc::new(storage.campaigns);
    let fraud = FraudPipeline::standard(
        Arc::new(storage.clicks),
        Arc::new(storage.blocklist),
        &policy,
    );
    let writer = ClickWriter::new(tx, Span::none());
    let service = ClickService::new(
        campaigns.clone(),
        fraud,
        writer.clone(),
        policy.block_threshold,
        Span::none(),
    );

    (AppState::new(Arc::new(service), campaigns, writer), rx)
}

/// Serves the full application router with a fixed peer address.
pub fn create_test_server(storage: TestStorage) -> (TestServer, mpsc::Receiver<NewClick>) {
    let (state, rx) = create_test_state(storage);
    let app: Router = app_router(state).layer(MockConnectInfoLayer);
    (TestServer::new(app).unwrap(), rx)
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = format!("{PEER_IP}:12345").parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// Inserts a campaign row and returns its `link_id`.
pub async fn create_test_campaign(
    pool: &sqlx::PgPool,
    status: &str,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    target_url: &str,
) -> Uuid {
    let link_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO campaigns (link_id, name, status, start_date, end_date, target_url)
        VALUES ($1, 'test', $2::campaign_status, $3, $4, $5)
        "#,
    )
    .bind(link_id)
    .bind(status)
    .bind(start_date)
    .bind(end_date)
    .bind(target_url)
    .execute(pool)
    .await
    .unwrap();
    link_id
}
