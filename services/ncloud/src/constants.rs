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

// Headers used by the ncloud api gateway.
pub const X_NCP_APIGW_TIMESTAMP: &str = "x-ncp-apigw-timestamp";
pub const X_NCP_IAM_ACCESS_KEY: &str = "x-ncp-iam-access-key";
pub const X_NCP_APIGW_SIGNATURE_V2: &str = "x-ncp-apigw-signature-v2";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_JSON_UTF8: &str = "application/json; charset=utf-8";

// Env values used in ncloud services.
pub const NCLOUD_ACCESS_KEY_ID: &str = "NCLOUD_ACCESS_KEY_ID";
pub const NCLOUD_SECRET_KEY: &str = "NCLOUD_SECRET_KEY";
pub const NCLOUD_API_URL: &str = "NCLOUD_API_URL";
pub const NCLOUD_API_URI: &str = "NCLOUD_API_URI";

// Secure Token Service.
pub const STS_BASE_URL: &str = "https://sts.apigw.ntruss.com";
pub const STS_BASE_URI: &str = "/api/v1";
pub const STS_CALLER_IDENTITY: &str = "/caller-identity";

// Cloud Activity Tracer.
pub const ACTIVITY_TRACER_BASE_URL: &str = "https://cloudactivitytracer.apigw.ntruss.com";
pub const ACTIVITY_TRACER_BASE_URI: &str = "/api/v1";
pub const ACTIVITY_TRACER_ACTIVITIES: &str = "/activities";

/// Largest `pageSize` accepted by Cloud Activity Tracer.
pub const ACTIVITY_MAX_PAGE_SIZE: u32 = 100;
/// Window the service applies when `fromEventTime` is absent.
pub const ACTIVITY_DEFAULT_WINDOW_DAYS: i64 = 30;
