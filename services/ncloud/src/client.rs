// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use bytes::Bytes;
use http::header::{HeaderName, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use log::debug;
use ncpsign_core::{Context, Result, SignRequest};

use crate::constants::*;
use crate::credential::Credential;
use crate::request::ApiRequest;
use crate::result::{ApiResponse, QueryResult};
use crate::sign_request::{ensure_supported_method, RequestSigner};

/// Where an api lives: `base_url` is scheme and host, `base_uri` the path prefix.
///
/// The signed uri is `base_uri + api_path`, the request goes to `base_url + base_uri + api_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
    base_uri: String,
}

impl Endpoint {
    /// Create a new endpoint, a trailing `/` of `base_url` is dropped.
    pub fn new(base_url: impl Into<String>, base_uri: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            base_uri: base_uri.into(),
        }
    }

    /// Secure Token Service endpoint.
    pub fn sts() -> Self {
        Self::new(STS_BASE_URL, STS_BASE_URI)
    }

    /// Cloud Activity Tracer endpoint.
    pub fn activity_tracer() -> Self {
        Self::new(ACTIVITY_TRACER_BASE_URL, ACTIVITY_TRACER_BASE_URI)
    }

    /// Scheme and host.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path prefix prepended to every api path.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }
}

/// GeneralApiClient calls any ncloud api under one [`Endpoint`].
///
/// Each call signs with a fresh timestamp and sends exactly one request,
/// there is no retry and no status handling.
#[derive(Debug, Clone)]
pub struct GeneralApiClient {
    ctx: Context,
    endpoint: Endpoint,
    credential: Credential,
    signer: RequestSigner,
}

impl GeneralApiClient {
    /// Create a new client.
    pub fn new(ctx: Context, endpoint: Endpoint, credential: Credential) -> Self {
        Self {
            ctx,
            endpoint,
            credential,
            signer: RequestSigner::new(),
        }
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Send the request and return the normalized body.
    pub async fn query(&self, req: &ApiRequest) -> Result<QueryResult> {
        Ok(self.send(req).await?.result)
    }

    /// Send the request and return the normalized body with its status.
    pub async fn send(&self, req: &ApiRequest) -> Result<ApiResponse> {
        ensure_supported_method(req.method())?;

        let uri = req.canonical_uri(self.endpoint.base_uri())?;
        let extra_headers = parse_headers(req.headers())?;
        let body = match req.body() {
            Some(v) => Some(Bytes::from(serde_json::to_vec(v)?)),
            None => None,
        };

        let (mut parts, ()) = http::Request::builder()
            .method(req.method().clone())
            .uri(format!("{}{}", self.endpoint.base_url(), uri))
            .body(())?
            .into_parts();

        self.signer
            .sign_request(&self.ctx, &mut parts, &self.credential)
            .await?;
        if body.is_some() {
            parts
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        }
        // Caller headers win over the signing headers.
        for (k, v) in extra_headers {
            if let Some(k) = k {
                parts.headers.insert(k, v);
            }
        }

        debug!("sending request: {} {}", parts.method, parts.uri);
        let resp = self
            .ctx
            .http_send(http::Request::from_parts(parts, body.unwrap_or_default()))
            .await?;

        let status = resp.status();
        debug!("got response: {status}");
        Ok(ApiResponse {
            status,
            result: QueryResult::from_body(resp.body()),
        })
    }
}

fn parse_headers(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (k, v) in headers {
        map.insert(HeaderName::from_bytes(k.as_bytes())?, v.parse()?);
    }

    Ok(map)
}
