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

use super::{add_host_header, SigV4Strategy};
use crate::canonical::CanonicalRequest;
use crate::checksum::ContentChecksum;
use crate::constants::{
    CONTENT_SHA256_REQUIRED, UNSIGNED_PAYLOAD, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE,
    X_AMZ_SECURITY_TOKEN,
};
use crate::properties::{SigningProperties, EXPIRATION_DURATION};
use crate::sign::authorization_header;
use crate::Credential;
use http::header::{HeaderName, AUTHORIZATION};
use httpsign_core::{Error, Result, SignerProperties, SigningRequest};

/// Signs with the `Authorization` header.
///
/// Before signing it sets `x-amz-date`, the session token, the content hash
/// header and the flexible checksum header.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderStrategy;

impl SigV4Strategy for HeaderStrategy {
    fn resolve_properties(&self, props: &SignerProperties) -> Result<SigningProperties> {
        if props.contains(EXPIRATION_DURATION) {
            return Err(Error::request_invalid(format!(
                "{} is only supported when presigning",
                EXPIRATION_DURATION.name()
            )));
        }
        SigningProperties::resolve(props)
    }

    fn payload_hash_override(
        &self,
        req: &SigningRequest,
        props: &SigningProperties,
    ) -> Option<&'static str> {
        // Skipping the payload hash is only safe over TLS.
        (!props.payload_signing_enabled && req.is_https()).then_some(UNSIGNED_PAYLOAD)
    }

    fn add_prerequisites(
        &self,
        req: &mut SigningRequest,
        cred: &Credential,
        checksum: &ContentChecksum,
        props: &SigningProperties,
    ) -> Result<()> {
        add_host_header(req)?;

        req.header_insert(
            HeaderName::from_static(X_AMZ_DATE),
            props.scope.datetime(),
            false,
        )?;

        if let Some(token) = &cred.session_token {
            req.header_insert(HeaderName::from_static(X_AMZ_SECURITY_TOKEN), token, true)?;
        }

        let content_hash_requested = req
            .headers
            .get(X_AMZ_CONTENT_SHA_256)
            .is_some_and(|v| v == CONTENT_SHA256_REQUIRED);
        if content_hash_requested || props.content_sha256_header {
            req.header_insert(
                HeaderName::from_static(X_AMZ_CONTENT_SHA_256),
                &checksum.content_hash,
                false,
            )?;
        }

        if let (Some(sdk_checksum), Some(name)) = (&checksum.checksum, &props.checksum_header_name)
        {
            req.header_insert(
                HeaderName::from_bytes(name.as_bytes())?,
                sdk_checksum.base64(),
                false,
            )?;
        }

        Ok(())
    }

    fn add_signature(
        &self,
        req: &mut SigningRequest,
        cred: &Credential,
        canonical_request: &CanonicalRequest,
        signature: &str,
        props: &SigningProperties,
    ) -> Result<()> {
        let authorization = authorization_header(
            &cred.access_key_id,
            &props.scope,
            canonical_request.signed_headers(),
            signature,
        );
        req.header_insert(AUTHORIZATION, authorization, true)
    }
}
