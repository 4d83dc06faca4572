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

use std::fmt::{Debug, Formatter};

use crate::client::Endpoint;
use crate::constants::*;
use crate::credential::Credential;
use ncpsign_core::{utils::Redact, Context, Error, Result};

/// Config carries the credential and endpoint used to build clients.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NCLOUD_ACCESS_KEY_ID`]
    pub access_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NCLOUD_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `base_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NCLOUD_API_URL`]
    pub base_url: Option<String>,
    /// `base_uri` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`NCLOUD_API_URI`]
    pub base_uri: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set base_url
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set base_uri
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(NCLOUD_ACCESS_KEY_ID) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NCLOUD_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NCLOUD_API_URL) {
            self.base_url.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NCLOUD_API_URI) {
            self.base_uri.get_or_insert(v);
        }

        self
    }

    /// Build the credential out of this config.
    pub fn credential(&self) -> Result<Credential> {
        let Some(ak) = self.access_key.as_deref().filter(|v| !v.is_empty()) else {
            return Err(Error::config_invalid(format!(
                "access_key is missing, set it or env {NCLOUD_ACCESS_KEY_ID}"
            )));
        };
        let Some(sk) = self.secret_key.as_deref().filter(|v| !v.is_empty()) else {
            return Err(Error::config_invalid(format!(
                "secret_key is missing, set it or env {NCLOUD_SECRET_KEY}"
            )));
        };

        Ok(Credential::new(ak, sk))
    }

    /// Build the endpoint out of this config.
    ///
    /// `base_uri` is optional and defaults to empty.
    pub fn endpoint(&self) -> Result<Endpoint> {
        let Some(base_url) = self.base_url.as_deref().filter(|v| !v.is_empty()) else {
            return Err(Error::config_invalid(format!(
                "base_url is missing, set it or env {NCLOUD_API_URL}"
            )));
        };

        Ok(Endpoint::new(
            base_url,
            self.base_uri.as_deref().unwrap_or_default(),
        ))
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &self.access_key.as_ref().map(Redact::from))
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .field("base_url", &self.base_url)
            .field("base_uri", &self.base_uri)
            .finish()
    }
}
