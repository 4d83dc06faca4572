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

use std::fmt::{Display, Formatter};

use http::StatusCode;
use serde_json::Value;

/// A normalized response body.
///
/// Bodies that are not valid JSON (mostly XML error documents) are kept
/// verbatim as [`QueryResult::Text`]; that is a successful outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Body parsed as JSON.
    Json(Value),
    /// Body that failed to parse as JSON, decoded as UTF-8 lossily.
    Text(String),
}

impl QueryResult {
    /// Normalize a raw response body.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(v) => QueryResult::Json(v),
            Err(_) => QueryResult::Text(String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// Check if the body was parsed as JSON.
    pub fn is_json(&self) -> bool {
        matches!(self, QueryResult::Json(_))
    }

    /// Get the JSON value, `None` for text fallback.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            QueryResult::Json(v) => Some(v),
            QueryResult::Text(_) => None,
        }
    }

    /// Get the raw text, `None` for JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            QueryResult::Json(_) => None,
            QueryResult::Text(s) => Some(s),
        }
    }

    /// Look up a top level field of a JSON object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_json()?.get(key)
    }

    /// Convert into the JSON value, `None` for text fallback.
    pub fn into_json(self) -> Option<Value> {
        match self {
            QueryResult::Json(v) => Some(v),
            QueryResult::Text(_) => None,
        }
    }
}

impl Display for QueryResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryResult::Json(v) => {
                let s = serde_json::to_string_pretty(v).map_err(|_| std::fmt::Error)?;
                f.write_str(&s)
            }
            QueryResult::Text(s) => f.write_str(s),
        }
    }
}

/// A normalized response together with its status.
///
/// Non-2xx statuses are returned as is, interpreting them is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// Normalized body.
    pub result: QueryResult,
}

impl ApiResponse {
    /// Check if the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
