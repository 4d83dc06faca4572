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

//! NAVER Cloud Platform support with convenience APIs
//!
//! This module re-exports the signing and client types of `ncpsign-ncloud`
//! along with constructors wired to the default context.

pub use ncpsign_ncloud::*;

#[cfg(feature = "default-context")]
use crate::{default_context, Result};

/// Create a [`GeneralApiClient`] from `NCLOUD_*` environment variables.
///
/// This function reads:
/// - `NCLOUD_ACCESS_KEY_ID` and `NCLOUD_SECRET_KEY` for the credential
/// - `NCLOUD_API_URL` and the optional `NCLOUD_API_URI` for the endpoint
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> ncpsign::Result<()> {
/// use ncpsign::ncloud::ApiRequest;
///
/// let client = ncpsign::ncloud::default_client()?;
/// let result = client
///     .query(&ApiRequest::get("/getRegionList").with_query("responseFormatType", "json"))
///     .await?;
/// println!("{result}");
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_client() -> Result<GeneralApiClient> {
    let ctx = default_context();
    let config = Config::new().from_env(&ctx);
    let endpoint = config.endpoint()?;
    let credential = config.credential()?;
    Ok(GeneralApiClient::new(ctx, endpoint, credential))
}

/// Create an [`ActivityLogClient`] with the credential from
/// `NCLOUD_ACCESS_KEY_ID` and `NCLOUD_SECRET_KEY`.
#[cfg(feature = "default-context")]
pub fn default_activity_client() -> Result<ActivityLogClient> {
    let ctx = default_context();
    let credential = Config::new().from_env(&ctx).credential()?;
    Ok(ActivityLogClient::new(ctx, credential))
}
