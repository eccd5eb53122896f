//! Test harness with testcontainers for integration testing.
//!
//! One shared Postgres container serves the whole test run; every test gets
//! its own freshly-migrated database inside it, so sequence allocation and
//! listing assertions never see another test's rows.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use expedientes_core::domains::auth::JwtService;
use expedientes_core::kernel::{
    BaseDocumentRenderer, BaseFileStore, MemoryFileStore, NoopRenderer, ServerDeps,
};

/// Shared container that persists across all tests.
struct SharedTestInfra {
    base_url: String,
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let host = postgres.get_host().await?;
        let port = postgres.get_host_port_ipv4(5432).await?;
        let base_url = format!("postgresql://postgres:postgres@{}:{}", host, port);

        Ok(Self {
            base_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Per-test context: a dedicated database plus injectable dependencies.
pub struct TestHarness {
    pub db_pool: PgPool,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_name = format!(
            "test_{}_{}",
            std::process::id(),
            DB_COUNTER.fetch_add(1, Ordering::Relaxed)
        );

        let admin_pool = PgPool::connect(&format!("{}/postgres", infra.base_url))
            .await
            .context("Failed to connect for database creation")?;
        sqlx::query(&format!(r#"CREATE DATABASE "{db_name}""#))
            .execute(&admin_pool)
            .await
            .context("Failed to create test database")?;

        let db_pool = PgPool::connect(&format!("{}/{}", infra.base_url, db_name))
            .await
            .context("Failed to connect to test database")?;

        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self { db_pool })
    }

    /// Dependencies with a no-op renderer and an in-memory file store.
    pub fn deps(&self) -> Arc<ServerDeps> {
        self.deps_with(Arc::new(NoopRenderer), Arc::new(MemoryFileStore::new()))
    }

    pub fn deps_with(
        &self,
        renderer: Arc<dyn BaseDocumentRenderer>,
        files: Arc<dyn BaseFileStore>,
    ) -> Arc<ServerDeps> {
        Arc::new(ServerDeps::new(
            self.db_pool.clone(),
            renderer,
            files,
            Arc::new(JwtService::new("test_secret", "test_issuer".to_string())),
        ))
    }
}
