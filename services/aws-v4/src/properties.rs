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

//! Signer properties understood by the SigV4 signers and their resolution.

use crate::canonical::CanonicalOptions;
use crate::checksum::ChecksumAlgorithm;
use crate::constants::PRESIGN_URL_MAX_EXPIRATION;
use crate::scope::CredentialScope;
use httpsign_core::time::{Clock, DateTime, SystemClock};
use httpsign_core::{Error, Result, SignerProperties, SignerProperty};
use std::sync::Arc;
use std::time::Duration;

/// Region the request is sent to. Required.
pub const REGION_NAME: SignerProperty<String> = SignerProperty::new("RegionName");
/// Name of the service in the credential scope. Required.
pub const SERVICE_SIGNING_NAME: SignerProperty<String> = SignerProperty::new("ServiceSigningName");
/// Clock read once per signing call. Defaults to the system clock.
pub const SIGNING_CLOCK: SignerProperty<Arc<dyn Clock>> = SignerProperty::new("SigningClock");
/// Explicit signing instant, taking precedence over the clock.
pub const REQUEST_SIGNING_INSTANT: SignerProperty<DateTime> =
    SignerProperty::new("RequestSigningInstant");
/// Flexible checksum algorithm.
pub const CHECKSUM_ALGORITHM: SignerProperty<ChecksumAlgorithm> =
    SignerProperty::new("ChecksumAlgorithm");
/// Header carrying the flexible checksum. Requires [`CHECKSUM_ALGORITHM`].
pub const CHECKSUM_HEADER_NAME: SignerProperty<String> = SignerProperty::new("ChecksumHeaderName");
/// Defaults to `true`.
pub const DOUBLE_URL_ENCODE: SignerProperty<bool> = SignerProperty::new("DoubleUrlEncode");
/// Defaults to `true`.
pub const NORMALIZE_PATH: SignerProperty<bool> = SignerProperty::new("NormalizePath");
/// Sign the payload hash instead of `UNSIGNED-PAYLOAD`. Defaults to `true`.
pub const PAYLOAD_SIGNING_ENABLED: SignerProperty<bool> =
    SignerProperty::new("PayloadSigningEnabled");
/// Always send `x-amz-content-sha256`. Defaults to `false`.
pub const CONTENT_SHA256_HEADER: SignerProperty<bool> = SignerProperty::new("ContentSha256Header");
/// Lifetime of a presigned request. Defaults to, and can't exceed, seven days.
pub const EXPIRATION_DURATION: SignerProperty<Duration> = SignerProperty::new("ExpirationDuration");

/// Validated signing configuration of one request.
#[derive(Debug, Clone)]
pub struct SigningProperties {
    /// Scope derived from region, service and the signing instant.
    pub scope: CredentialScope,
    /// Flexible checksum algorithm.
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    /// Lowercase name of the flexible checksum header, set whenever an
    /// algorithm is.
    pub checksum_header_name: Option<String>,
    /// See [`DOUBLE_URL_ENCODE`].
    pub double_url_encode: bool,
    /// See [`NORMALIZE_PATH`].
    pub normalize_path: bool,
    /// See [`PAYLOAD_SIGNING_ENABLED`].
    pub payload_signing_enabled: bool,
    /// See [`CONTENT_SHA256_HEADER`].
    pub content_sha256_header: bool,
    /// Lifetime of a presigned request, only set for presigning.
    pub expiration: Option<Duration>,
}

impl SigningProperties {
    /// Resolve the properties shared by every SigV4 signer.
    ///
    /// Fails with [`ErrorKind::ConfigInvalid`](httpsign_core::ErrorKind::ConfigInvalid)
    /// when a required property is missing or the checksum configuration is
    /// inconsistent. The clock is read once here.
    pub fn resolve(props: &SignerProperties) -> Result<Self> {
        let region = props.get_required(REGION_NAME)?;
        let service = props.get_required(SERVICE_SIGNING_NAME)?;

        let checksum_algorithm = props.get(CHECKSUM_ALGORITHM).copied();
        let checksum_header_name = props
            .get(CHECKSUM_HEADER_NAME)
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().to_ascii_lowercase());
        let checksum_header_name = match (checksum_algorithm, checksum_header_name) {
            (None, Some(name)) => {
                return Err(Error::config_invalid(format!(
                    "{} cannot be empty when {} is given: {name}",
                    CHECKSUM_ALGORITHM.name(),
                    CHECKSUM_HEADER_NAME.name()
                )))
            }
            (Some(algorithm), None) => Some(algorithm.header_name()),
            (_, name) => name,
        };

        let instant = match props.get(REQUEST_SIGNING_INSTANT) {
            Some(instant) => *instant,
            None => match props.get(SIGNING_CLOCK) {
                Some(clock) => clock.now(),
                None => SystemClock.now(),
            },
        };

        Ok(Self {
            scope: CredentialScope::new(region.as_str(), service.as_str(), instant),
            checksum_algorithm,
            checksum_header_name,
            double_url_encode: props.get(DOUBLE_URL_ENCODE).copied().unwrap_or(true),
            normalize_path: props.get(NORMALIZE_PATH).copied().unwrap_or(true),
            payload_signing_enabled: props.get(PAYLOAD_SIGNING_ENABLED).copied().unwrap_or(true),
            content_sha256_header: props.get(CONTENT_SHA256_HEADER).copied().unwrap_or(false),
            expiration: None,
        })
    }

    /// Options for [`CanonicalRequest`](crate::CanonicalRequest).
    pub fn canonical_options(&self) -> CanonicalOptions {
        CanonicalOptions {
            double_url_encode: self.double_url_encode,
            normalize_path: self.normalize_path,
        }
    }
}

/// Resolve the presign lifetime.
///
/// Must be positive and at most seven days; defaults to seven days.
pub fn resolve_expiration(props: &SignerProperties) -> Result<Duration> {
    let expiration = props
        .get(EXPIRATION_DURATION)
        .copied()
        .unwrap_or(PRESIGN_URL_MAX_EXPIRATION);

    if expiration.is_zero() {
        return Err(Error::config_invalid(
            "presigned request expiration must be positive",
        ));
    }
    if expiration > PRESIGN_URL_MAX_EXPIRATION {
        return Err(Error::config_invalid(format!(
            "presigned request expiration {}s exceeds the maximum of {}s",
            expiration.as_secs(),
            PRESIGN_URL_MAX_EXPIRATION.as_secs()
        )));
    }
    Ok(expiration)
}
