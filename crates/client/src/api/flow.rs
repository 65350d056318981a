//! Flow operations.

use models::flow::{ArchiveFlowBody, Flow, HubFlow, OpenFlowWPath};
use models::{ItemPath, WorkspaceId};
use reqwest::StatusCode;

use crate::Endpoint;

endpoint! {
    /// `GET /w/{workspace}/flows/get/{path}`
    get_flow_by_path -> Flow,
    (workspace: &WorkspaceId, path: &ItemPath)
    {
        Ok(Endpoint::get("/w/{workspace}/flows/get/{path}")
            .path_param("workspace", workspace)
            .path_param("path", path)
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `POST /w/{workspace}/flows/create`: returns the created path as text.
    create_flow -> String,
    (workspace: &WorkspaceId, body: &OpenFlowWPath)
    {
        Ok(Endpoint::post("/w/{workspace}/flows/create")
            .path_param("workspace", workspace)
            .json_body(body)?
            .expect_text(StatusCode::CREATED))
    }
}

endpoint! {
    /// `POST /w/{workspace}/flows/update/{path}`
    update_flow -> String,
    (workspace: &WorkspaceId, path: &ItemPath, body: &OpenFlowWPath)
    {
        Ok(Endpoint::post("/w/{workspace}/flows/update/{path}")
            .path_param("workspace", workspace)
            .path_param("path", path)
            .json_body(body)?
            .expect_text(StatusCode::OK))
    }
}

endpoint! {
    /// `POST /w/{workspace}/flows/archive/{path}`
    archive_flow_by_path -> String,
    (workspace: &WorkspaceId, path: &ItemPath, body: &ArchiveFlowBody)
    {
        Ok(Endpoint::post("/w/{workspace}/flows/archive/{path}")
            .path_param("workspace", workspace)
            .path_param("path", path)
            .json_body(body)?
            .expect_text(StatusCode::OK))
    }
}

endpoint! {
    /// `GET /flows/hub/get/{id}`: a flow published on the public hub.
    get_hub_flow_by_id -> HubFlow,
    (id: i64)
    {
        Ok(Endpoint::get("/flows/hub/get/{id}")
            .path_param("id", id)
            .expect_json(StatusCode::OK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::flow::FlowValue;
    use models::Maybe;
    use url::Url;

    #[test]
    fn archive_sends_the_flag_as_json() {
        let ws = WorkspaceId::new("demo").unwrap();
        let path = ItemPath::new("u/admin/etl").unwrap();
        let body = ArchiveFlowBody {
            archived: Maybe::Set(true),
            ..Default::default()
        };
        let ep = archive_flow_by_path::request(&ws, &path, &body).unwrap();
        assert_eq!(ep.body(), Some(&br#"{"archived":true}"#[..]));
        assert_eq!(
            ep.url(&Url::parse("http://h/api").unwrap()).unwrap().path(),
            "/api/w/demo/flows/archive/u/admin/etl"
        );
    }

    #[test]
    fn create_documents_201_only() {
        let ws = WorkspaceId::new("demo").unwrap();
        let body = OpenFlowWPath {
            path: "u/admin/etl".into(),
            summary: "etl".into(),
            description: Maybe::Unset,
            value: FlowValue::default(),
            schema: Maybe::Unset,
            additional_properties: Default::default(),
        };
        let ep = create_flow::request(&ws, &body).unwrap();
        assert!(ep.decoder_for(StatusCode::CREATED).is_some());
        assert!(ep.decoder_for(StatusCode::OK).is_none());
    }
}
