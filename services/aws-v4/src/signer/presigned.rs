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
use crate::canonical::{canonical_headers, CanonicalRequest};
use crate::checksum::ContentChecksum;
use crate::constants::*;
use crate::properties::{resolve_expiration, SigningProperties};
use crate::Credential;
use httpsign_core::{Result, SignerProperties, SigningRequest};

/// Signs with query parameters, producing a URL usable without credentials
/// until it expires.
///
/// The session token, `X-Amz-Algorithm`, `X-Amz-Date`, `X-Amz-SignedHeaders`,
/// `X-Amz-Expires` and `X-Amz-Credential` are appended in that order before
/// signing; `X-Amz-Signature` is appended last.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresignedStrategy;

impl SigV4Strategy for PresignedStrategy {
    fn resolve_properties(&self, props: &SignerProperties) -> Result<SigningProperties> {
        let expiration = resolve_expiration(props)?;
        let mut props = SigningProperties::resolve(props)?;
        props.expiration = Some(expiration);
        Ok(props)
    }

    fn payload_hash_override(
        &self,
        _: &SigningRequest,
        props: &SigningProperties,
    ) -> Option<&'static str> {
        (!props.payload_signing_enabled).then_some(UNSIGNED_PAYLOAD)
    }

    fn add_prerequisites(
        &self,
        req: &mut SigningRequest,
        cred: &Credential,
        _: &ContentChecksum,
        props: &SigningProperties,
    ) -> Result<()> {
        add_host_header(req)?;

        let signed_headers = canonical_headers(&req.headers)?
            .into_keys()
            .collect::<Vec<_>>()
            .join(";");
        let expiration = props.expiration.unwrap_or(PRESIGN_URL_MAX_EXPIRATION);

        if let Some(token) = &cred.session_token {
            req.query_push(X_AMZ_SECURITY_TOKEN_QUERY, token);
        }
        req.query_push(X_AMZ_ALGORITHM_QUERY, AWS4_SIGNING_ALGORITHM);
        req.query_push(X_AMZ_DATE_QUERY, props.scope.datetime());
        req.query_push(X_AMZ_SIGNED_HEADERS_QUERY, signed_headers);
        req.query_push(X_AMZ_EXPIRES_QUERY, expiration.as_secs().to_string());
        req.query_push(
            X_AMZ_CREDENTIAL_QUERY,
            format!("{}/{}", cred.access_key_id, props.scope.scope()),
        );
        Ok(())
    }

    fn add_signature(
        &self,
        req: &mut SigningRequest,
        _: &Credential,
        _: &CanonicalRequest,
        signature: &str,
        _: &SigningProperties,
    ) -> Result<()> {
        req.query_push(X_AMZ_SIGNATURE_QUERY, signature);
        Ok(())
    }
}
