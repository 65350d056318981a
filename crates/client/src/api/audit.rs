//! Audit log operations.

use models::audit::{AuditLog, AuditLogFilter};
use models::{Pagination, WorkspaceId};
use reqwest::StatusCode;

use crate::Endpoint;

endpoint! {
    /// `GET /w/{workspace}/audit/list`
    list_audit_logs -> Vec<AuditLog>,
    (workspace: &WorkspaceId, filter: &AuditLogFilter, page: Pagination)
    {
        Ok(Endpoint::get("/w/{workspace}/audit/list")
            .path_param("workspace", workspace)
            .query_pairs(filter.to_query())
            .query_pairs(page.to_query())
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `GET /w/{workspace}/audit/get/{id}`
    get_audit_log -> AuditLog,
    (workspace: &WorkspaceId, id: i64)
    {
        Ok(Endpoint::get("/w/{workspace}/audit/get/{id}")
            .path_param("workspace", workspace)
            .path_param("id", id)
            .expect_json(StatusCode::OK))
    }
}
