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

use super::mock::{test_credential, MockHttpSend};
use anyhow::Result;
use http::Method;
use ncpsign_ncloud::{check_credential, Credential, CredentialStatus};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_valid_credential() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mock = MockHttpSend::new().respond(
        200,
        r#"{"id":"a1b2c3","type":"MainAccount","accountId":"1234"}"#,
    );

    let status = check_credential(&mock.context(), &test_credential()).await?;
    assert_eq!(
        status,
        CredentialStatus::Valid {
            id: "a1b2c3".to_string()
        }
    );

    let req = &mock.requests()[0];
    assert_eq!(req.method, Method::GET);
    assert_eq!(
        req.uri.to_string(),
        "https://sts.apigw.ntruss.com/api/v1/caller-identity"
    );
    assert!(req.signature_matches(&test_credential()));
    Ok(())
}

#[tokio::test]
async fn test_rejected_credential() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mock = MockHttpSend::new().respond(
        401,
        r#"{"error":{"errorCode":"200","message":"Authentication Failed","details":"Invalid authentication information."}}"#,
    );

    let status = check_credential(&mock.context(), &test_credential()).await?;
    assert!(!status.is_valid());
    assert_eq!(
        status,
        CredentialStatus::Invalid {
            reason: "Authentication Failed (200): Invalid authentication information."
                .to_string()
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_text_response_is_invalid() -> Result<()> {
    let mock = MockHttpSend::new().respond(403, "<error>forbidden</error>");

    let status = check_credential(&mock.context(), &test_credential()).await?;
    assert_eq!(
        status,
        CredentialStatus::Invalid {
            reason: "<error>forbidden</error>".to_string()
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_empty_keys_are_invalid_without_io() -> Result<()> {
    let mock = MockHttpSend::new().respond(200, r#"{"id":"a1b2c3"}"#);

    for cred in [
        Credential::new("", "BBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB"),
        Credential::new("ncp_iam_AAAAAAAAAAAA", ""),
    ] {
        let status = check_credential(&mock.context(), &cred).await?;
        assert_eq!(
            status,
            CredentialStatus::Invalid {
                reason: "access_key or secret_key is empty".to_string()
            }
        );
    }

    assert!(mock.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_transport_failure_is_not_swallowed() -> Result<()> {
    let mock = MockHttpSend::new();

    let err = check_credential(&mock.context(), &test_credential())
        .await
        .unwrap_err();
    assert!(err.is_transport());
    Ok(())
}
