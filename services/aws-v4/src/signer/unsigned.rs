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

use super::{HeaderStrategy, SigV4Strategy};
use crate::canonical::CanonicalRequest;
use crate::checksum::ContentChecksum;
use crate::properties::SigningProperties;
use crate::Credential;
use httpsign_core::{Result, SignerProperties, SigningRequest};
use log::debug;

/// Header signing with `UNSIGNED-PAYLOAD` as content hash.
///
/// Over plain HTTP the payload is hashed and signed as usual. The
/// `x-amz-content-sha256` header is always sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsignedPayloadStrategy;

impl SigV4Strategy for UnsignedPayloadStrategy {
    fn resolve_properties(&self, props: &SignerProperties) -> Result<SigningProperties> {
        let mut props = HeaderStrategy.resolve_properties(props)?;
        props.payload_signing_enabled = false;
        props.content_sha256_header = true;
        Ok(props)
    }

    fn payload_hash_override(
        &self,
        req: &SigningRequest,
        props: &SigningProperties,
    ) -> Option<&'static str> {
        let hash = HeaderStrategy.payload_hash_override(req, props);
        if hash.is_none() {
            debug!("request is not sent over https, signing the payload hash instead");
        }
        hash
    }

    fn add_prerequisites(
        &self,
        req: &mut SigningRequest,
        cred: &Credential,
        checksum: &ContentChecksum,
        props: &SigningProperties,
    ) -> Result<()> {
        HeaderStrategy.add_prerequisites(req, cred, checksum, props)
    }

    fn add_signature(
        &self,
        req: &mut SigningRequest,
        cred: &Credential,
        canonical_request: &CanonicalRequest,
        signature: &str,
        props: &SigningProperties,
    ) -> Result<()> {
        HeaderStrategy.add_signature(req, cred, canonical_request, signature, props)
    }
}
