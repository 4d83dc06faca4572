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

use anyhow::Result;
use ncpsign::ncloud::{check_credential, Config, CredentialStatus};

/// Check whether the `NCLOUD_ACCESS_KEY_ID` and `NCLOUD_SECRET_KEY` credential
/// is accepted by the gateway.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = ncpsign::default_context();
    let cred = Config::new().from_env(&ctx).credential()?;

    match check_credential(&ctx, &cred).await? {
        CredentialStatus::Valid { id } => println!("credential is valid, caller id: {id}"),
        CredentialStatus::Invalid { reason } => println!("credential is invalid: {reason}"),
    }

    Ok(())
}
