//! Server dependencies for effects (using traits for testability)
//!
//! Central dependency container passed to all domain actions. External
//! side effects (document rendering, attachment storage) sit behind trait
//! objects so tests can swap them out.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::JwtService;
use crate::kernel::{BaseDocumentRenderer, BaseFileStore};

/// Server dependencies accessible to domain actions.
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Renders the printable cover sheet after record mutations.
    pub renderer: Arc<dyn BaseDocumentRenderer>,
    /// Stores and retrieves attachment bytes.
    pub files: Arc<dyn BaseFileStore>,
    /// JWT service for token creation and verification.
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        renderer: Arc<dyn BaseDocumentRenderer>,
        files: Arc<dyn BaseFileStore>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            db_pool,
            renderer,
            files,
            jwt_service,
        }
    }
}
