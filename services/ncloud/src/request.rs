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

use http::Method;
use ncpsign_core::{Error, Result};
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use percent_encoding::NON_ALPHANUMERIC;

/// AsciiSet for query keys and values.
///
/// Encode every byte except the RFC 3986 unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// AsciiSet for the path.
///
/// Covers every byte the transport would rewrite on its own, so the path is
/// sent exactly as signed. '/' and '%' are kept, an existing `%XX` passes
/// through untouched.
static PATH_ENCODE_SET: AsciiSet = CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'[')
    .add(b']')
    .add(b'\\')
    .add(b'^')
    .add(b'|');

/// Encode query pairs in the given order.
///
/// ```shell
/// [(a, 1), (b, "x y")] => "a=1&b=x%20y"
/// ```
pub fn encode_query(pairs: &[(String, String)]) -> String {
    let mut s = String::with_capacity(16);

    for (idx, (k, v)) in pairs.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.extend(utf8_percent_encode(k, &QUERY_ENCODE_SET));
        s.push('=');
        s.extend(utf8_percent_encode(v, &QUERY_ENCODE_SET));
    }

    s
}

/// Per call parameters of [`GeneralApiClient::query`](crate::GeneralApiClient::query).
///
/// ```
/// use ncpsign_ncloud::ApiRequest;
/// use serde_json::json;
///
/// let req = ApiRequest::post("/servers")
///     .with_query("regionCode", "KR")
///     .with_header("x-ncp-lang", "en-US")
///     .with_body(json!({"serverName": "web-1"}));
///
/// assert_eq!(
///     req.canonical_uri("/vserver/v2").unwrap(),
///     "/vserver/v2/servers?regionCode=KR"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    query: Option<Vec<(String, String)>>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a request for `path` under the client's base uri.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            query: None,
            body: None,
        }
    }

    /// Create a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Create a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add an extra header, it overrides the signing headers on collision.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Append a query parameter, order is kept.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// Append query parameters, order is kept.
    ///
    /// An empty iterator still marks the query as present.
    pub fn with_queries<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .get_or_insert_with(Vec::new)
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the JSON body, only sent for POST, PUT and DELETE.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Api path as given.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Extra headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Query parameters, `None` if never set.
    pub fn query(&self) -> Option<&[(String, String)]> {
        self.query.as_deref()
    }

    /// Body that will be sent, `None` for GET.
    pub fn body(&self) -> Option<&serde_json::Value> {
        if self.method == Method::GET {
            None
        } else {
            self.body.as_ref()
        }
    }

    /// The uri that is both signed and sent: `base_uri + path [+ "?" + query]`.
    ///
    /// The path is percent-encoded once. Fails with `RequestInvalid` if it does
    /// not start with `/` or carries a `.` or `..` segment, the transport would
    /// resolve those and send a different path than the signed one.
    pub fn canonical_uri(&self, base_uri: &str) -> Result<String> {
        let mut uri = String::with_capacity(base_uri.len() + self.path.len());
        uri.extend(utf8_percent_encode(base_uri, &PATH_ENCODE_SET));
        uri.extend(utf8_percent_encode(&self.path, &PATH_ENCODE_SET));

        if !uri.is_empty() && !uri.starts_with('/') {
            return Err(Error::request_invalid(format!(
                "path {uri} must start with '/'"
            )));
        }
        if uri.split('/').any(is_dot_segment) {
            return Err(Error::request_invalid(format!(
                "path {uri} must not contain '.' or '..' segments"
            )));
        }

        if let Some(query) = &self.query {
            uri.push('?');
            uri.push_str(&encode_query(query));
        }

        Ok(uri)
    }
}

/// `.` and `..`, including their `%2e` forms.
fn is_dot_segment(seg: &str) -> bool {
    matches!(
        seg.to_ascii_lowercase().as_str(),
        "." | "%2e" | ".." | ".%2e" | "%2e." | "%2e%2e"
    )
}
