//! Session endpoints. Token issuance itself happens on the server.

use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::shared::api_utils::api_url;

async fn post<B, T>(path: &str, body: &B) -> Result<T, String>
where
    B: serde::Serialize,
    T: DeserializeOwned,
{
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    parse(path, response).await
}

async fn parse<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, String> {
    if !response.ok() {
        return Err(format!("{} failed: {}", path, response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    post("/api/auth/login", &LoginRequest { username, password }).await
}

pub async fn refresh(refresh_token: String) -> Result<RefreshResponse, String> {
    post("/api/auth/refresh", &RefreshRequest { refresh_token }).await
}

/// Revoke the refresh token
pub async fn logout(refresh_token: String) -> Result<(), String> {
    let response = Request::post(&api_url("/api/auth/logout"))
        .json(&RefreshRequest { refresh_token })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Logout failed: {}", response.status()));
    }
    Ok(())
}

/// Current user with roles
pub async fn current_user(access_token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&api_url("/api/auth/me"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    parse("/api/auth/me", response).await
}
