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

//! Cloud Activity Tracer.
//!
//! - [Cloud Activity Tracer API](https://api.ncloud-docs.com/docs/management-cloudactivitytracer-getactivitylist)

use http::header::CONTENT_TYPE;
use ncpsign_core::utils::truncate;
use ncpsign_core::{Context, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{Endpoint, GeneralApiClient};
use crate::constants::*;
use crate::credential::Credential;
use crate::pages::ActivityPages;
use crate::request::ApiRequest;
use crate::result::QueryResult;

/// Filters of one activity log request.
///
/// Absent fields are left out of the body and the service applies its own
/// defaults: `from_event_time` 30 days ago, `to_event_time` now, `page_index`
/// 0 and `page_size` 20.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuery {
    /// Start of the window, milliseconds since unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_event_time: Option<i64>,
    /// End of the window, milliseconds since unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_event_time: Option<i64>,
    /// NRN of the resource to scope the logs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nrn: Option<String>,
    /// Zero based page index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_index: Option<u32>,
    /// Logs per page, 1 to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl ActivityQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set from_event_time
    pub fn with_from_event_time(mut self, millis: i64) -> Self {
        self.from_event_time = Some(millis);
        self
    }

    /// Set to_event_time
    pub fn with_to_event_time(mut self, millis: i64) -> Self {
        self.to_event_time = Some(millis);
        self
    }

    /// Set nrn
    pub fn with_nrn(mut self, nrn: impl Into<String>) -> Self {
        self.nrn = Some(nrn.into());
        self
    }

    /// Set page_index
    pub fn with_page_index(mut self, page_index: u32) -> Self {
        self.page_index = Some(page_index);
        self
    }

    /// Set page_size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(size) = self.page_size {
            if !(1..=ACTIVITY_MAX_PAGE_SIZE).contains(&size) {
                return Err(Error::request_invalid(format!(
                    "page_size must be in 1..={ACTIVITY_MAX_PAGE_SIZE}, got {size}"
                )));
            }
        }
        if let (Some(from), Some(to)) = (self.from_event_time, self.to_event_time) {
            if from > to {
                return Err(Error::request_invalid(format!(
                    "from_event_time {from} is after to_event_time {to}"
                )));
            }
        }

        Ok(())
    }
}

/// One page of activity logs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageResult {
    /// Log records of this page in service order.
    #[serde(default)]
    pub items: Vec<Value>,
    /// Whether another page follows, the only end-of-run signal.
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl TryFrom<QueryResult> for PageResult {
    type Error = Error;

    fn try_from(result: QueryResult) -> Result<Self> {
        match result {
            QueryResult::Json(v) => {
                let summary = truncate(&v.to_string(), 512);
                serde_json::from_value(v).map_err(|e| {
                    Error::response_invalid(format!("response is not an activity page: {summary}"))
                        .with_source(e)
                })
            }
            QueryResult::Text(s) => Err(Error::response_invalid(format!(
                "response is not json: {}",
                truncate(&s, 512)
            ))),
        }
    }
}

/// ActivityLogClient queries the fixed Cloud Activity Tracer endpoint.
#[derive(Debug, Clone)]
pub struct ActivityLogClient {
    inner: GeneralApiClient,
}

impl ActivityLogClient {
    /// Create a new client.
    pub fn new(ctx: Context, credential: Credential) -> Self {
        Self {
            inner: GeneralApiClient::new(ctx, Endpoint::activity_tracer(), credential),
        }
    }

    /// Send one request and return the normalized body.
    pub async fn query_raw(&self, query: &ActivityQuery) -> Result<QueryResult> {
        query.validate()?;

        let req = ApiRequest::post(ACTIVITY_TRACER_ACTIVITIES)
            .with_header(CONTENT_TYPE.as_str(), CONTENT_TYPE_JSON_UTF8)
            .with_body(serde_json::to_value(query)?);
        self.inner.query(&req).await
    }

    /// Send one request and parse it as a page.
    ///
    /// Fails with `ResponseInvalid` if the body is not a page, error documents
    /// are never mistaken for the last page.
    pub async fn query(&self, query: &ActivityQuery) -> Result<PageResult> {
        self.query_raw(query).await?.try_into()
    }

    /// Iterate pages of `query` starting at its `page_index`.
    pub fn pages(&self, query: ActivityQuery) -> ActivityPages<'_> {
        ActivityPages::new(self, query)
    }
}
