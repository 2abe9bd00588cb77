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

use crate::checksum::ChecksumAlgorithm;
use crate::constants::{AWS_DEFAULT_REGION, AWS_REGION};
use crate::properties::*;
use httpsign_core::{Context, SignerProperties};
use std::time::Duration;

/// Config for the SigV4 signers.
///
/// Turned into the default [`SignerProperties`] of a
/// [`Signer`](httpsign_core::Signer) with [`Config::into_properties`].
#[derive(Clone, Debug)]
pub struct Config {
    /// Region the requests are sent to.
    pub region: Option<String>,
    /// Service signing name, e.g. `s3`.
    pub service: Option<String>,
    /// Encode the path once more. Object storage keys want `false`.
    pub double_url_encode: bool,
    /// Normalize `.` and `..` path segments. Object storage keys want `false`.
    pub normalize_path: bool,
    /// Sign the payload hash instead of `UNSIGNED-PAYLOAD`.
    pub payload_signing_enabled: bool,
    /// Always send `x-amz-content-sha256`.
    pub content_sha256_header: bool,
    /// Flexible checksum algorithm.
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    /// Header carrying the flexible checksum.
    pub checksum_header_name: Option<String>,
    /// Lifetime of presigned requests.
    pub expires_in: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: None,
            service: None,
            double_url_encode: true,
            normalize_path: true,
            payload_signing_enabled: true,
            content_sha256_header: false,
            checksum_algorithm: None,
            checksum_header_name: None,
            expires_in: None,
        }
    }
}

impl Config {
    /// Create a config for `service` in `region`.
    pub fn new(service: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
            region: Some(region.into()),
            ..Default::default()
        }
    }

    /// Load config from environment variables.
    ///
    /// The region comes from `AWS_REGION`, then `AWS_DEFAULT_REGION`.
    pub fn from_env(ctx: &Context) -> Self {
        Self {
            region: ctx
                .env_var(AWS_REGION)
                .or_else(|| ctx.env_var(AWS_DEFAULT_REGION))
                .filter(|v| !v.is_empty()),
            ..Default::default()
        }
    }

    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the service signing name.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Enable or disable double url encoding.
    pub fn with_double_url_encode(mut self, enabled: bool) -> Self {
        self.double_url_encode = enabled;
        self
    }

    /// Enable or disable path normalization.
    pub fn with_normalize_path(mut self, enabled: bool) -> Self {
        self.normalize_path = enabled;
        self
    }

    /// Enable or disable payload signing.
    pub fn with_payload_signing_enabled(mut self, enabled: bool) -> Self {
        self.payload_signing_enabled = enabled;
        self
    }

    /// Always send `x-amz-content-sha256`.
    pub fn with_content_sha256_header(mut self, enabled: bool) -> Self {
        self.content_sha256_header = enabled;
        self
    }

    /// Compute a flexible checksum with `algorithm`.
    pub fn with_checksum_algorithm(mut self, algorithm: ChecksumAlgorithm) -> Self {
        self.checksum_algorithm = Some(algorithm);
        self
    }

    /// Send the flexible checksum in `name` instead of the default header.
    pub fn with_checksum_header_name(mut self, name: impl Into<String>) -> Self {
        self.checksum_header_name = Some(name.into());
        self
    }

    /// Set the lifetime of presigned requests.
    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    /// Convert into signer properties.
    ///
    /// Unset optional values are left out so signers apply their defaults.
    pub fn into_properties(self) -> SignerProperties {
        let mut props = SignerProperties::new()
            .with(DOUBLE_URL_ENCODE, self.double_url_encode)
            .with(NORMALIZE_PATH, self.normalize_path)
            .with(PAYLOAD_SIGNING_ENABLED, self.payload_signing_enabled)
            .with(CONTENT_SHA256_HEADER, self.content_sha256_header);

        if let Some(region) = self.region {
            props.put(REGION_NAME, region);
        }
        if let Some(service) = self.service {
            props.put(SERVICE_SIGNING_NAME, service);
        }
        if let Some(algorithm) = self.checksum_algorithm {
            props.put(CHECKSUM_ALGORITHM, algorithm);
        }
        if let Some(name) = self.checksum_header_name {
            props.put(CHECKSUM_HEADER_NAME, name);
        }
        if let Some(expires_in) = self.expires_in {
            props.put(EXPIRATION_DURATION, expires_in);
        }
        props
    }
}
