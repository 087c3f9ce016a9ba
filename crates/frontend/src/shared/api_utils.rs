//! API plumbing shared by every feature module
//!
//! Resolves the API base URL and provides thin typed wrappers over
//! `gloo_net` with one error type carrying the failing URL.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Error for any REST call. The URL always travels with the error so cycle
/// failures can name exactly which endpoint broke.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("HTTP {status} from {url}: {}", detail.as_deref().unwrap_or("request failed"))]
    Http {
        url: String,
        status: u16,
        detail: Option<String>,
    },
    #[error("Network error calling {url}: {message}")]
    Network { url: String, message: String },
    #[error("Invalid JSON from {url}: {message}")]
    Json { url: String, message: String },
}

impl ApiError {
    pub fn url(&self) -> &str {
        match self {
            ApiError::Http { url, .. } => url,
            ApiError::Network { url, .. } => url,
            ApiError::Json { url, .. } => url,
        }
    }
}

/// Get the base URL for API requests.
///
/// Resolution order, first hit wins:
/// 1. `window.API_BASE_URL` injected by a deploy-time script,
/// 2. the compile-time `API_BASE_URL` environment variable,
/// 3. `http://localhost:8000`.
pub fn api_base() -> String {
    let configured = injected_base()
        .or_else(|| option_env!("API_BASE_URL").map(|s| s.to_string()))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&configured)
}

/// Build a full API URL from a path starting with "/".
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn injected_base() -> Option<String> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(
        window.as_ref(),
        &wasm_bindgen::JsValue::from_str("API_BASE_URL"),
    )
    .ok()?;
    value.as_string().filter(|s| !s.trim().is_empty())
}

fn normalize_base(s: &str) -> String {
    s.trim().trim_end_matches('/').to_string()
}

/// GET a JSON body as a raw `Value`. The dashboard fetch cycle uses this so
/// the normalization adapter can resolve field-name variance in one place.
pub async fn get_value(url: &str) -> Result<Value, ApiError> {
    let response = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !response.ok() {
        return Err(http_error(url, &response).await);
    }

    let text = response.text().await.map_err(|e| ApiError::Network {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str::<Value>(&text).map_err(|e| {
        log::error!("Unparseable body from {}: {}", url, text);
        ApiError::Json {
            url: url.to_string(),
            message: e.to_string(),
        }
    })
}

/// GET a strictly-typed JSON response.
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !response.ok() {
        return Err(http_error(url, &response).await);
    }

    response.json::<T>().await.map_err(|e| ApiError::Json {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// POST a JSON body, decode a JSON response.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let request = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Json {
            url: url.to_string(),
            message: format!("Failed to serialize request: {}", e),
        })?;

    let response = request.send().await.map_err(|e| ApiError::Network {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if !response.ok() {
        return Err(http_error(url, &response).await);
    }

    response.json::<T>().await.map_err(|e| ApiError::Json {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// POST with no request body, decode a JSON response.
pub async fn post_empty<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = gloo_net::http::Request::post(url)
        .send()
        .await
        .map_err(|e| ApiError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !response.ok() {
        return Err(http_error(url, &response).await);
    }

    response.json::<T>().await.map_err(|e| ApiError::Json {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// PUT a JSON body, decode a JSON response.
pub async fn put_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let request = gloo_net::http::Request::put(url)
        .json(body)
        .map_err(|e| ApiError::Json {
            url: url.to_string(),
            message: format!("Failed to serialize request: {}", e),
        })?;

    let response = request.send().await.map_err(|e| ApiError::Network {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if !response.ok() {
        return Err(http_error(url, &response).await);
    }

    response.json::<T>().await.map_err(|e| ApiError::Json {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// DELETE; the response body (a confirmation message) is ignored.
pub async fn delete(url: &str) -> Result<(), ApiError> {
    let response = gloo_net::http::Request::delete(url)
        .send()
        .await
        .map_err(|e| ApiError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !response.ok() {
        return Err(http_error(url, &response).await);
    }

    Ok(())
}

async fn http_error(url: &str, response: &gloo_net::http::Response) -> ApiError {
    // FastAPI-style servers put the human-readable reason in a `detail` field.
    let detail = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from));
    ApiError::Http {
        url: url.to_string(),
        status: response.status(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_strips_trailing_slash() {
        assert_eq!(normalize_base("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_base("https://api.example.com"), "https://api.example.com");
        assert_eq!(normalize_base("  https://api.example.com//  "), "https://api.example.com");
    }

    #[test]
    fn test_api_error_display_names_url() {
        let err = ApiError::Http {
            url: "http://x/inventory".to_string(),
            status: 500,
            detail: None,
        };
        let text = err.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("http://x/inventory"));

        let err = ApiError::Http {
            url: "http://x/active-orders".to_string(),
            status: 400,
            detail: Some("No active orders found to submit.".to_string()),
        };
        assert!(err.to_string().contains("No active orders found to submit."));
    }
}
