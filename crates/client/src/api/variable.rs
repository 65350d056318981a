//! Variable operations.

use models::variable::{ContextualVariable, CreateVariable, EditVariable, ListableVariable};
use models::{ItemPath, Pagination, WorkspaceId};
use reqwest::StatusCode;

use crate::Endpoint;

endpoint! {
    /// `GET /w/{workspace}/variables/list`
    list_variable -> Vec<ListableVariable>,
    (workspace: &WorkspaceId, path_start: Option<&str>, page: Pagination)
    {
        Ok(Endpoint::get("/w/{workspace}/variables/list")
            .path_param("workspace", workspace)
            .query_opt("path_start", path_start)
            .query_pairs(page.to_query())
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `GET /w/{workspace}/variables/list_contextual`: the `WM_*` variables
    /// injected into every job.
    list_contextual_variables -> Vec<ContextualVariable>,
    (workspace: &WorkspaceId)
    {
        Ok(Endpoint::get("/w/{workspace}/variables/list_contextual")
            .path_param("workspace", workspace)
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `GET /w/{workspace}/variables/get/{path}`. Secrets are returned
    /// decrypted unless `decrypt_secret` is `Some(false)`.
    get_variable -> ListableVariable,
    (
        workspace: &WorkspaceId,
        path: &ItemPath,
        decrypt_secret: Option<bool>,
        include_encrypted: Option<bool>,
    )
    {
        Ok(Endpoint::get("/w/{workspace}/variables/get/{path}")
            .path_param("workspace", workspace)
            .path_param("path", path)
            .query_opt("decrypt_secret", decrypt_secret)
            .query_opt("include_encrypted", include_encrypted)
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `GET /w/{workspace}/variables/get_value/{path}`: the value alone, as a
    /// JSON string.
    get_variable_value -> String,
    (workspace: &WorkspaceId, path: &ItemPath)
    {
        Ok(Endpoint::get("/w/{workspace}/variables/get_value/{path}")
            .path_param("workspace", workspace)
            .path_param("path", path)
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `GET /w/{workspace}/variables/exists/{path}`
    exists_variable -> bool,
    (workspace: &WorkspaceId, path: &ItemPath)
    {
        Ok(Endpoint::get("/w/{workspace}/variables/exists/{path}")
            .path_param("workspace", workspace)
            .path_param("path", path)
            .expect_json(StatusCode::OK))
    }
}

endpoint! {
    /// `POST /w/{workspace}/variables/create`: returns the created path as
    /// text. Set `already_encrypted` when `value` was produced by
    /// `encrypt_value`.
    create_variable -> String,
    (workspace: &WorkspaceId, body: &CreateVariable, already_encrypted: Option<bool>)
    {
        Ok(Endpoint::post("/w/{workspace}/variables/create")
            .path_param("workspace", workspace)
            .query_opt("already_encrypted", already_encrypted)
            .json_body(body)?
            .expect_text(StatusCode::CREATED))
    }
}

endpoint! {
    /// `POST /w/{workspace}/variables/update/{path}`
    update_variable -> String,
    (
        workspace: &WorkspaceId,
        path: &ItemPath,
        body: &EditVariable,
        already_encrypted: Option<bool>,
    )
    {
        Ok(Endpoint::post("/w/{workspace}/variables/update/{path}")
            .path_param("workspace", workspace)
            .path_param("path", path)
            .query_opt("already_encrypted", already_encrypted)
            .json_body(body)?
            .expect_text(StatusCode::OK))
    }
}

endpoint! {
    /// `DELETE /w/{workspace}/variables/delete/{path}`
    delete_variable -> String,
    (workspace: &WorkspaceId, path: &ItemPath)
    {
        Ok(Endpoint::delete("/w/{workspace}/variables/delete/{path}")
            .path_param("workspace", workspace)
            .path_param("path", path)
            .expect_text(StatusCode::OK))
    }
}

endpoint! {
    /// `POST /w/{workspace}/variables/encrypt`: encrypts `value` with the
    /// workspace key and returns the ciphertext as text.
    encrypt_value -> String,
    (workspace: &WorkspaceId, value: &str)
    {
        Ok(Endpoint::post("/w/{workspace}/variables/encrypt")
            .path_param("workspace", workspace)
            .json_body(value)?
            .expect_text(StatusCode::OK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn ws() -> WorkspaceId {
        WorkspaceId::new("demo").unwrap()
    }

    #[test]
    fn value_lookup_decodes_a_json_string() {
        let path = ItemPath::new("u/admin/api_key").unwrap();
        let ep = get_variable_value::request(&ws(), &path).unwrap();
        let decode = ep.decoder_for(StatusCode::OK).unwrap();
        assert_eq!(decode(br#""s3cr3t""#).unwrap(), "s3cr3t");
        assert!(decode(b"s3cr3t").is_err());
    }

    #[test]
    fn encrypt_sends_the_plaintext_as_a_json_string() {
        let ep = encrypt_value::request(&ws(), "hunter2").unwrap();
        assert_eq!(ep.body(), Some(&br#""hunter2""#[..]));
    }

    #[test]
    fn delete_uses_the_delete_verb() {
        let path = ItemPath::new("u/admin/api_key").unwrap();
        let ep = delete_variable::request(&ws(), &path).unwrap();
        assert_eq!(ep.method(), &reqwest::Method::DELETE);
        assert_eq!(
            ep.url(&Url::parse("http://h/api").unwrap()).unwrap().path(),
            "/api/w/demo/variables/delete/u/admin/api_key"
        );
    }

    #[test]
    fn get_forwards_secret_flags() {
        let path = ItemPath::new("u/admin/api_key").unwrap();
        let ep = get_variable::request(&ws(), &path, Some(false), None).unwrap();
        assert_eq!(
            ep.url(&Url::parse("http://h/api").unwrap()).unwrap().query(),
            Some("decrypt_secret=false")
        );
    }
}
