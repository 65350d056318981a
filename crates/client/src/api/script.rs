//! Script operations.

use models::script::Script;
use models::{ItemPath, ScriptHash, WorkspaceId};
use reqwest::StatusCode;

use crate::Endpoint;

endpoint! {
    /// `GET /w/{workspace}/scripts/get/p/{path}`: latest deployed version.
    get_script_by_path -> Script,
    (workspace: &WorkspaceId, path: &ItemPath)
    {
        Ok(Endpoint::get("/w/{workspace}/scripts/get/p/{path}")
            .path_param("workspace", workspace)
            .path_param("path", path)
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `GET /w/{workspace}/scripts/get/draft/{path}`: latest version with
    /// its pending draft attached.
    get_script_by_path_with_draft -> Script,
    (workspace: &WorkspaceId, path: &ItemPath)
    {
        Ok(Endpoint::get("/w/{workspace}/scripts/get/draft/{path}")
            .path_param("workspace", workspace)
            .path_param("path", path)
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `POST /w/{workspace}/scripts/delete/h/{hash}`: returns the deleted
    /// version.
    delete_script_by_hash -> Script,
    (workspace: &WorkspaceId, hash: &ScriptHash)
    {
        Ok(Endpoint::post("/w/{workspace}/scripts/delete/h/{hash}")
            .path_param("workspace", workspace)
            .path_param("hash", hash)
            .expect_json(StatusCode::OK))
    }
}
