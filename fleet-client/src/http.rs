//! JSON-RPC client for the fleet API
//!
//! Every call is a `POST {server}/apiv1` carrying `{"method", "params"}`;
//! the reply holds either `result` or `error`.

use crate::config::api_url;
use crate::{ClientConfig, ClientError, ClientResult, Credentials, FleetApi, SessionContext};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::{Entity, Search};

/// Value of `path` when the database lives on the server that was asked
const THIS_SERVER: &str = "ThisServer";

#[derive(Serialize)]
struct RpcRequest<'a, P> {
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<RpcInnerError>,
}

#[derive(Deserialize)]
struct RpcInnerError {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

impl RpcError {
    /// The innermost exception names the actual failure
    fn into_client_error(self) -> ClientError {
        match self.errors.into_iter().next() {
            Some(inner) if !inner.name.is_empty() => {
                let message = if inner.message.is_empty() {
                    self.message
                } else {
                    inner.message
                };
                ClientError::from_remote(inner.name, message)
            }
            _ => ClientError::from_remote(self.name, self.message),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthenticateParams<'a> {
    database: &'a str,
    user_name: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthenticateResult {
    credentials: Credentials,
    #[serde(default)]
    path: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GetParams<'a> {
    type_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a Search>,
    credentials: &'a Credentials,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetParams<'a, T> {
    type_name: &'a str,
    entity: &'a T,
    credentials: &'a Credentials,
}

/// Network client for the fleet API, bound to one session
#[derive(Debug, Clone)]
pub struct GeotabClient {
    client: Client,
    api_url: String,
    session: SessionContext,
}

impl GeotabClient {
    /// Establish a session: adopt the configured session id, or authenticate
    /// with the configured password. No usable credentials is an error.
    pub async fn connect(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        let session = match (config.session_id.as_deref(), config.password.as_deref()) {
            (Some(session_id), _) if !session_id.is_empty() => SessionContext {
                server: config.server.clone(),
                credentials: Credentials {
                    database: config.database.clone(),
                    user_name: config.user_name.clone(),
                    session_id: session_id.to_string(),
                },
            },
            (_, Some(password)) => authenticate(&client, config, password).await?,
            _ => {
                return Err(ClientError::Config(
                    "either a password or a session id is required".into(),
                ));
            }
        };

        tracing::info!(
            server = %session.server,
            database = %session.database(),
            "Fleet API session established"
        );

        Ok(Self {
            client,
            api_url: api_url(&session.server),
            session,
        })
    }

    /// The session this client is bound to
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    async fn call<T: DeserializeOwned, P: Serialize>(
        &self,
        method: &str,
        params: P,
    ) -> ClientResult<Option<T>> {
        rpc(&self.client, &self.api_url, method, params).await
    }
}

async fn authenticate(
    client: &Client,
    config: &ClientConfig,
    password: &str,
) -> ClientResult<SessionContext> {
    let params = AuthenticateParams {
        database: &config.database,
        user_name: &config.user_name,
        password,
    };
    let result: AuthenticateResult = rpc(client, &config.api_url(), "Authenticate", params)
        .await?
        .ok_or_else(|| ClientError::InvalidResponse("Missing authenticate result".into()))?;

    let server = match result.path.as_deref() {
        Some(path) if !path.is_empty() && path != THIS_SERVER => path.to_string(),
        _ => config.server.clone(),
    };

    Ok(SessionContext {
        server,
        credentials: result.credentials,
    })
}

async fn rpc<T: DeserializeOwned, P: Serialize>(
    client: &Client,
    url: &str,
    method: &str,
    params: P,
) -> ClientResult<Option<T>> {
    tracing::debug!(method, "Fleet API call");

    let request = client.post(url).json(&RpcRequest { method, params });
    let response = request.send().await?;
    handle_response(response).await
}

/// Handle the HTTP response
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> ClientResult<Option<T>> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        // Error bodies may still carry a JSON-RPC error
        if let Ok(body) = serde_json::from_str::<RpcResponse<serde_json::Value>>(&text)
            && let Some(err) = body.error
        {
            return Err(err.into_client_error());
        }
        return match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ClientError::InvalidSession(text))
            }
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            _ => Err(ClientError::Api {
                name: status.to_string(),
                message: text,
            }),
        };
    }

    let body: RpcResponse<T> = serde_json::from_str(&text)?;
    if let Some(err) = body.error {
        return Err(err.into_client_error());
    }
    Ok(body.result)
}

#[async_trait]
impl FleetApi for GeotabClient {
    async fn get<T: Entity>(&self, search: Option<&Search>) -> ClientResult<Vec<T>> {
        let params = GetParams {
            type_name: T::TYPE_NAME,
            search,
            credentials: &self.session.credentials,
        };
        let records: Option<Vec<T>> = self.call("Get", params).await?;
        Ok(records.unwrap_or_default())
    }

    async fn set<T: Entity>(&self, entity: &T) -> ClientResult<()> {
        let params = SetParams {
            type_name: T::TYPE_NAME,
            entity,
            credentials: &self.session.credentials,
        };
        let _: Option<serde_json::Value> = self.call("Set", params).await?;
        Ok(())
    }
}
