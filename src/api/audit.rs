use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::auth::BearerAuth;
use crate::api::helpers;
use crate::errors::AdminError;
use crate::services::TokenService;
use crate::stores::AuditStore;
use crate::types::dto::audit::{AuditLogResponse, AuditPageResponse};
use crate::types::dto::common::GridQuery;
use crate::types::internal::roles::RoleName;

/// Audit trail API endpoints, SuperAdmin only
///
/// Read-only: the trail has no update or delete surface.
pub struct AuditApi {
    audit_store: Arc<AuditStore>,
    token_service: Arc<TokenService>,
}

impl AuditApi {
    /// Create a new AuditApi
    pub fn new(audit_store: Arc<AuditStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            audit_store,
            token_service,
        }
    }
}

/// API tags for audit endpoints
#[derive(Tags)]
enum AuditTags {
    /// Audit trail
    Audit,
}

#[OpenApi(prefix_path = "/audit")]
impl AuditApi {
    /// Grid search over the audit trail, newest first
    #[oai(path = "/search", method = "post", tag = "AuditTags::Audit")]
    async fn search(
        &self,
        auth: BearerAuth,
        body: Json<GridQuery>,
    ) -> Result<Json<AuditPageResponse>, AdminError> {
        let claims = helpers::claims_from_token(&self.token_service, &auth.0.token)
            .map_err(|_| AdminError::unauthorized())?;
        if !claims.has_role(RoleName::SuperAdmin) {
            return Err(AdminError::super_admin_required());
        }

        let page = self
            .audit_store
            .search_page(&body.to_page_request())
            .await
            .map_err(AdminError::from_internal)?;

        Ok(Json(AuditPageResponse {
            rows: page.rows.into_iter().map(AuditLogResponse::from).collect(),
            total_matching: page.total_matching,
        }))
    }
}
