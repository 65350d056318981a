//! Schedule operations.

use models::schedule::{EditSchedule, Schedule};
use models::{ItemPath, Pagination, WorkspaceId};
use reqwest::StatusCode;

use crate::Endpoint;

endpoint! {
    /// `GET /w/{workspace}/schedules/list`, optionally narrowed to one
    /// script or flow.
    list_schedules -> Vec<Schedule>,
    (workspace: &WorkspaceId, page: Pagination, path: Option<&ItemPath>, is_flow: Option<bool>)
    {
        Ok(Endpoint::get("/w/{workspace}/schedules/list")
            .path_param("workspace", workspace)
            .query_pairs(page.to_query())
            .query_opt("path", path)
            .query_opt("is_flow", is_flow)
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `POST /w/{workspace}/schedules/update/{path}`
    update_schedule -> String,
    (workspace: &WorkspaceId, path: &ItemPath, body: &EditSchedule)
    {
        Ok(Endpoint::post("/w/{workspace}/schedules/update/{path}")
            .path_param("workspace", workspace)
            .path_param("path", path)
            .json_body(body)?
            .expect_text(StatusCode::OK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn optional_filters_are_omitted() {
        let ws = WorkspaceId::new("demo").unwrap();
        let base = Url::parse("http://h/api").unwrap();
        let bare = list_schedules::request(&ws, Pagination::default(), None, None).unwrap();
        assert_eq!(bare.url(&base).unwrap().query(), None);

        let path = ItemPath::new("u/admin/sync").unwrap();
        let narrowed =
            list_schedules::request(&ws, Pagination::default(), Some(&path), Some(false)).unwrap();
        assert_eq!(
            narrowed.url(&base).unwrap().query(),
            Some("path=u%2Fadmin%2Fsync&is_flow=false")
        );
    }
}
