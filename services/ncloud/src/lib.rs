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

//! Signed clients for NAVER Cloud Platform REST APIs.
//!
//! Every request carries the `x-ncp-apigw-signature-v2` header: a base64
//! HMAC-SHA256 over `"{method} {uri}\n{timestamp}\n{access_key}"`.
//!
//! - [`GeneralApiClient`] calls any API under a configured [`Endpoint`].
//! - [`ActivityLogClient`] queries Cloud Activity Tracer logs, with
//!   [`ActivityPages`] driving pagination.
//! - [`check_credential`] asks the STS service who the caller is.
//!
//! ```no_run
//! use ncpsign_core::Context;
//! use ncpsign_ncloud::{ApiRequest, Credential, Endpoint, GeneralApiClient};
//!
//! # async fn example(ctx: Context) -> ncpsign_core::Result<()> {
//! let client = GeneralApiClient::new(
//!     ctx,
//!     Endpoint::new("https://sts.apigw.ntruss.com", "/api/v1"),
//!     Credential::new("access_key", "secret_key"),
//! );
//!
//! let result = client.query(&ApiRequest::get("/caller-identity")).await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{
    make_signature, sign, string_to_sign, RequestSigner, SignedRequest,
};

mod request;
pub use request::{encode_query, ApiRequest};

mod result;
pub use result::{ApiResponse, QueryResult};

mod client;
pub use client::{Endpoint, GeneralApiClient};

mod activity;
pub use activity::{ActivityLogClient, ActivityQuery, PageResult};

mod pages;
pub use pages::ActivityPages;

mod identity;
pub use identity::{check_credential, CredentialStatus};
