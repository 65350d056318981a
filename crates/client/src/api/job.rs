//! Completed-job operations.

use models::job::{CompletedJob, CompletedJobFilter};
use models::{JobId, Pagination, WorkspaceId};
use reqwest::StatusCode;
use serde_json::Value;

use crate::Endpoint;

endpoint! {
    /// `GET /w/{workspace}/jobs/completed/get/{id}`
    get_completed_job -> CompletedJob,
    (workspace: &WorkspaceId, id: &JobId)
    {
        Ok(Endpoint::get("/w/{workspace}/jobs/completed/get/{id}")
            .path_param("workspace", workspace)
            .path_param("id", id)
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `POST /w/{workspace}/jobs/completed/delete/{id}`: erases the job's
    /// content but keeps its run id. Returns the scrubbed job.
    delete_completed_job -> CompletedJob,
    (workspace: &WorkspaceId, id: &JobId)
    {
        Ok(Endpoint::post("/w/{workspace}/jobs/completed/delete/{id}")
            .path_param("workspace", workspace)
            .path_param("id", id)
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `GET /w/{workspace}/jobs/completed/list`
    list_completed_jobs -> Vec<CompletedJob>,
    (workspace: &WorkspaceId, filter: &CompletedJobFilter, page: Pagination)
    {
        Ok(Endpoint::get("/w/{workspace}/jobs/completed/list")
            .path_param("workspace", workspace)
            .query_pairs(filter.to_query())
            .query_pairs(page.to_query())
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `GET /w/{workspace}/jobs/completed/get_result/{id}`: the job's return
    /// value only, as arbitrary JSON.
    get_completed_job_result -> Value,
    (workspace: &WorkspaceId, id: &JobId)
    {
        Ok(Endpoint::get("/w/{workspace}/jobs/completed/get_result/{id}")
            .path_param("workspace", workspace)
            .path_param("id", id)
            .expect_json(StatusCode::OK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::job::JobKind;
    use url::Url;

    fn base() -> Url {
        Url::parse("http://localhost:8000/api").unwrap()
    }

    fn ws() -> WorkspaceId {
        WorkspaceId::new("demo").unwrap()
    }

    #[test]
    fn get_and_delete_share_the_id_placement() {
        let id = JobId::new("01HXYZ").unwrap();
        let get = get_completed_job::request(&ws(), &id).unwrap();
        let delete = delete_completed_job::request(&ws(), &id).unwrap();
        assert_eq!(
            get.url(&base()).unwrap().path(),
            "/api/w/demo/jobs/completed/get/01HXYZ"
        );
        assert_eq!(delete.method(), &reqwest::Method::POST);
        assert!(delete.decoder_for(StatusCode::OK).is_some());
        assert!(delete.decoder_for(StatusCode::INTERNAL_SERVER_ERROR).is_none());
    }

    #[test]
    fn list_carries_filter_then_page() {
        let filter = CompletedJobFilter {
            job_kinds: vec![JobKind::Flow],
            ..Default::default()
        };
        let ep = list_completed_jobs::request(&ws(), &filter, Pagination::new(2, 50)).unwrap();
        assert_eq!(
            ep.url(&base()).unwrap().query(),
            Some("job_kinds=flow&page=2&per_page=50")
        );
    }
}
