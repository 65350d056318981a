use models::resource::ListableResource;
use models::{Pagination, WorkspaceId};
use reqwest::StatusCode;

use crate::Endpoint;

endpoint! {
    /// `GET /w/{workspace}/resources/list`; `resource_type` accepts a
    /// comma-separated list.
    list_resource -> Vec<ListableResource>,
    (workspace: &WorkspaceId, page: Pagination, resource_type: Option<&str>)
    {
        Ok(Endpoint::get("/w/{workspace}/resources/list")
            .path_param("workspace", workspace)
            .query_pairs(page.to_query())
            .query_opt("resource_type", resource_type)
            .expect_json(StatusCode::OK))
    }
}
