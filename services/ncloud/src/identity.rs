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

use log::{debug, warn};
use ncpsign_core::utils::{truncate, Redact};
use ncpsign_core::{Context, Result, SigningCredential};
use serde_json::Value;

use crate::client::{Endpoint, GeneralApiClient};
use crate::constants::*;
use crate::credential::Credential;
use crate::request::ApiRequest;
use crate::result::QueryResult;

/// Outcome of [`check_credential`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    /// The service knows the caller.
    Valid {
        /// Caller id returned by the service.
        id: String,
    },
    /// The service rejected the credential or answered something unexpected.
    Invalid {
        /// What the service said, truncated.
        reason: String,
    },
}

impl CredentialStatus {
    /// Check if the credential is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, CredentialStatus::Valid { .. })
    }
}

/// Check a credential by asking Secure Token Service for the caller identity.
///
/// An empty access key or secret key is `Invalid` without asking the service.
/// Transport failures are returned as errors, they say nothing about the credential.
pub async fn check_credential(ctx: &Context, credential: &Credential) -> Result<CredentialStatus> {
    if !credential.is_valid() {
        warn!(
            "access key {} is invalid: access_key or secret_key is empty",
            Redact::from(&credential.access_key)
        );
        return Ok(CredentialStatus::Invalid {
            reason: "access_key or secret_key is empty".to_string(),
        });
    }

    let client = GeneralApiClient::new(ctx.clone(), Endpoint::sts(), credential.clone());
    let result = client.query(&ApiRequest::get(STS_CALLER_IDENTITY)).await?;

    let status = status_from_result(result);
    match &status {
        CredentialStatus::Valid { id } => debug!(
            "access key {} belongs to caller {id}",
            Redact::from(&credential.access_key)
        ),
        CredentialStatus::Invalid { reason } => warn!(
            "access key {} is invalid: {reason}",
            Redact::from(&credential.access_key)
        ),
    }

    Ok(status)
}

fn status_from_result(result: QueryResult) -> CredentialStatus {
    match result {
        QueryResult::Json(v) => match v.get("id") {
            Some(Value::String(id)) if !id.is_empty() => CredentialStatus::Valid { id: id.clone() },
            Some(Value::Number(id)) => CredentialStatus::Valid { id: id.to_string() },
            _ => CredentialStatus::Invalid {
                reason: error_reason(&v),
            },
        },
        QueryResult::Text(s) if s.is_empty() => CredentialStatus::Invalid {
            reason: "empty response".to_string(),
        },
        QueryResult::Text(s) => CredentialStatus::Invalid {
            reason: truncate(&s, 256),
        },
    }
}

/// Gateway errors look like `{"error":{"errorCode":"200","message":"...","details":"..."}}`.
fn error_reason(v: &Value) -> String {
    let Some(err) = v.get("error") else {
        return truncate(&v.to_string(), 256);
    };

    let field = |k: &str| err.get(k).and_then(Value::as_str);
    match (field("errorCode"), field("message"), field("details")) {
        (Some(code), Some(msg), Some(details)) => format!("{msg} ({code}): {details}"),
        (Some(code), Some(msg), None) => format!("{msg} ({code})"),
        (None, Some(msg), _) => msg.to_string(),
        _ => truncate(&err.to_string(), 256),
    }
}
