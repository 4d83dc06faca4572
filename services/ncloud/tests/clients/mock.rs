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

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, Uri};
use ncpsign_core::hash::verify_base64_hmac_sha256;
use ncpsign_core::{Context, Error, HttpSend, Result};
use ncpsign_ncloud::{
    string_to_sign, Credential, X_NCP_APIGW_SIGNATURE_V2, X_NCP_APIGW_TIMESTAMP,
    X_NCP_IAM_ACCESS_KEY,
};

/// A request as seen by the transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// Path and query after the conversion reqwest performs before sending.
    pub wire_path_and_query: String,
}

impl RecordedRequest {
    /// Path and query, as handed to the transport.
    pub fn path_and_query(&self) -> &str {
        self.uri.path_and_query().map(|v| v.as_str()).unwrap_or("/")
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).and_then(|v| v.to_str().ok())
    }

    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("body must be json")
    }

    /// Recompute the signature over what reaches the wire.
    pub fn signature_matches(&self, cred: &Credential) -> bool {
        let (Some(timestamp), Some(access_key), Some(signature)) = (
            self.header(X_NCP_APIGW_TIMESTAMP),
            self.header(X_NCP_IAM_ACCESS_KEY),
            self.header(X_NCP_APIGW_SIGNATURE_V2),
        ) else {
            return false;
        };

        let msg = string_to_sign(&self.method, &self.wire_path_and_query, timestamp, access_key);
        verify_base64_hmac_sha256(cred.secret_key.as_bytes(), msg.as_bytes(), signature)
    }
}

#[derive(Debug, Default)]
struct State {
    responses: VecDeque<(StatusCode, String)>,
    requests: Vec<RecordedRequest>,
}

/// MockHttpSend replies with queued responses in order and records every request.
///
/// Once the queue is empty every request fails as a transport error.
#[derive(Debug, Clone, Default)]
pub struct MockHttpSend {
    state: Arc<Mutex<State>>,
}

impl MockHttpSend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.push(status, body);
        self
    }

    pub fn push(&self, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).expect("status must be valid");
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back((status, body.into()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn context(&self) -> Context {
        Context::new().with_http_send(self.clone())
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        let wire_path_and_query = wire_path_and_query(&parts.method, &parts.uri)?;

        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            wire_path_and_query,
        });

        let Some((status, body)) = state.responses.pop_front() else {
            return Err(Error::transport("connection reset by mock"));
        };

        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from(body))?)
    }
}

/// Convert the way `ReqwestHttpSend` does and read back the url reqwest would send.
fn wire_path_and_query(method: &Method, uri: &Uri) -> Result<String> {
    let req = http::Request::builder()
        .method(method.clone())
        .uri(uri.clone())
        .body(Bytes::new())?;
    let req = reqwest::Request::try_from(req)
        .map_err(|e| Error::request_invalid("reqwest rejects the request").with_source(e))?;

    let url = req.url();
    Ok(match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    })
}

pub fn test_credential() -> Credential {
    Credential::new("ncp_iam_AAAAAAAAAAAA", "BBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB")
}
