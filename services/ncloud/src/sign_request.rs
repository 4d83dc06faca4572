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

//! Ncloud api gateway signature v2.

use async_trait::async_trait;
use http::HeaderValue;
use http::Method;
use log::debug;
use ncpsign_core::hash::base64_hmac_sha256;
use ncpsign_core::time::{format_timestamp_millis, now, DateTime};
use ncpsign_core::utils::Redact;
use ncpsign_core::{Context, Error, Result, SignRequest, SigningCredential};

use crate::constants::*;
use crate::credential::Credential;

/// The outcome of signing one request.
///
/// Signatures are bound to their timestamp, never cache or reuse them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Milliseconds since unix epoch, as sent in `x-ncp-apigw-timestamp`.
    pub timestamp: String,
    /// Base64 HMAC-SHA256 signature, as sent in `x-ncp-apigw-signature-v2`.
    pub signature: String,
    /// The signed method.
    pub method: Method,
    /// The signed uri, path plus query string.
    pub uri: String,
}

/// Fail with `UnsupportedMethod` for anything other than GET, POST, PUT and DELETE.
pub(crate) fn ensure_supported_method(method: &Method) -> Result<()> {
    if matches!(
        *method,
        Method::GET | Method::POST | Method::PUT | Method::DELETE
    ) {
        Ok(())
    } else {
        Err(Error::unsupported_method(method))
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// Method + " " + URI + "\n" +
/// Timestamp + "\n" +
/// AccessKey
/// ```
///
/// `uri` must already carry the encoded query string.
pub fn string_to_sign(method: &Method, uri: &str, timestamp: &str, access_key: &str) -> String {
    let mut s = String::with_capacity(
        method.as_str().len() + uri.len() + timestamp.len() + access_key.len() + 3,
    );
    s.push_str(method.as_str());
    s.push(' ');
    s.push_str(uri);
    s.push('\n');
    s.push_str(timestamp);
    s.push('\n');
    s.push_str(access_key);
    s
}

/// Base64 HMAC-SHA256 of the string to sign, keyed by the secret key.
pub fn make_signature(method: &Method, uri: &str, timestamp: &str, cred: &Credential) -> String {
    let string_to_sign = string_to_sign(method, uri, timestamp, &cred.access_key);
    debug!(
        "string to sign: {method} {uri}\n{timestamp}\n{}",
        Redact::from(&cred.access_key)
    );

    base64_hmac_sha256(cred.secret_key.as_bytes(), string_to_sign.as_bytes())
}

/// Sign `method` and `uri` at time `now`.
pub fn sign(method: &Method, uri: &str, cred: &Credential, now: DateTime) -> Result<SignedRequest> {
    ensure_supported_method(method)?;

    let timestamp = format_timestamp_millis(now);
    let signature = make_signature(method, uri, &timestamp, cred);

    Ok(SignedRequest {
        timestamp,
        signature,
        method: method.clone(),
        uri: uri.to_string(),
    })
}

/// RequestSigner that implements ncloud api gateway signature v2.
///
/// - [Ncloud API](https://api.ncloud-docs.com/docs/common-ncpapi)
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        credential: &Self::Credential,
    ) -> Result<()> {
        if !credential.is_valid() {
            return Err(Error::credential_invalid(
                "access_key and secret_key must not be empty",
            ));
        }

        let uri = req
            .uri
            .path_and_query()
            .map(|v| v.as_str())
            .unwrap_or("/");
        let signed = sign(&req.method, uri, credential, self.time.unwrap_or_else(now))?;

        req.headers
            .insert(X_NCP_APIGW_TIMESTAMP, signed.timestamp.parse()?);
        req.headers
            .insert(X_NCP_IAM_ACCESS_KEY, credential.access_key.parse()?);
        req.headers.insert(X_NCP_APIGW_SIGNATURE_V2, {
            let mut value: HeaderValue = signed.signature.parse()?;
            value.set_sensitive(true);

            value
        });

        Ok(())
    }
}
