use models::oauth::{ConnectCallbackBody, TokenResponse};
use models::ClientName;
use reqwest::StatusCode;

use crate::Endpoint;

endpoint! {
    /// `POST /oauth/connect_callback/{client_name}`: exchanges an
    /// authorization code for a token.
    connect_callback -> TokenResponse,
    (client_name: &ClientName, body: &ConnectCallbackBody)
    {
        Ok(Endpoint::post("/oauth/connect_callback/{client_name}")
            .path_param("client_name", client_name)
            .json_body(body)?
            .expect_json(StatusCode::OK))
    }
}
