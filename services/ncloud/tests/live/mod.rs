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

use std::env;

use anyhow::Result;
use log::{info, warn};
use ncpsign_core::Context;
use ncpsign_http_send_reqwest::ReqwestHttpSend;
use ncpsign_ncloud::{check_credential, ActivityLogClient, ActivityQuery, Credential};

fn init_live() -> Option<(Context, Credential)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("NCPSIGN_NCLOUD_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let cred = Credential::new(
        env::var("NCPSIGN_NCLOUD_ACCESS_KEY").expect("env NCPSIGN_NCLOUD_ACCESS_KEY must set"),
        env::var("NCPSIGN_NCLOUD_SECRET_KEY").expect("env NCPSIGN_NCLOUD_SECRET_KEY must set"),
    );

    Some((ctx, cred))
}

#[tokio::test]
async fn test_caller_identity() -> Result<()> {
    let Some((ctx, cred)) = init_live() else {
        warn!("NCPSIGN_NCLOUD_TEST is not set, skipped");
        return Ok(());
    };

    let status = check_credential(&ctx, &cred).await?;
    assert!(status.is_valid(), "credential must be accepted: {status:?}");
    Ok(())
}

#[tokio::test]
async fn test_caller_identity_with_wrong_secret() -> Result<()> {
    let Some((ctx, cred)) = init_live() else {
        warn!("NCPSIGN_NCLOUD_TEST is not set, skipped");
        return Ok(());
    };

    let cred = Credential::new(cred.access_key, "not-a-real-secret-key");
    let status = check_credential(&ctx, &cred).await?;
    assert!(!status.is_valid());
    Ok(())
}

#[tokio::test]
async fn test_activity_single_page() -> Result<()> {
    let Some((ctx, cred)) = init_live() else {
        warn!("NCPSIGN_NCLOUD_TEST is not set, skipped");
        return Ok(());
    };

    let client = ActivityLogClient::new(ctx, cred);
    let page = client
        .query(&ActivityQuery::new().with_page_index(0).with_page_size(1))
        .await?;
    assert!(page.items.len() <= 1);
    info!("got {} activity logs, has_more: {}", page.items.len(), page.has_more);
    Ok(())
}
