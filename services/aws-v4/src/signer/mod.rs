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

//! SigV4 signers.
//!
//! Every signer runs the same pipeline:
//!
//! `resolve properties -> [skip if anonymous] -> compute checksum ->
//! build canonical request -> derive scope and key -> compute signature ->
//! attach artifacts`
//!
//! The steps that differ between header signing, presigning and
//! unsigned-payload signing live behind [`SigV4Strategy`].

mod header;
pub use header::HeaderStrategy;
mod presigned;
pub use presigned::PresignedStrategy;
mod unsigned;
pub use unsigned::UnsignedPayloadStrategy;

use crate::canonical::CanonicalRequest;
use crate::checksum::{compute_async, compute_sync, ContentChecksum, SdkChecksum};
use crate::constants::X_AMZ_TRAILER;
use crate::properties::SigningProperties;
use crate::sign::{compute_signature, derive_signing_key, string_to_sign};
use crate::Credential;
use async_trait::async_trait;
use http::header::HOST;
use http::uri::Scheme;
use http::HeaderMap;
use httpsign_core::payload::{AsyncPayload, SyncPayload};
use httpsign_core::{
    HttpSigner, Identity, Result, SignRequest, SignedRequest, SignerProperties, SigningRequest,
};
use log::debug;
use std::fmt;
use std::fmt::Debug;

/// The hooks in which SigV4 signers differ.
pub trait SigV4Strategy: Debug + Send + Sync + 'static {
    /// Resolve and validate the properties of one request.
    fn resolve_properties(&self, props: &SignerProperties) -> Result<SigningProperties>;

    /// Content hash to sign instead of the payload's SHA-256.
    ///
    /// The payload is still read when a flexible checksum is requested.
    fn payload_hash_override(
        &self,
        _req: &SigningRequest,
        _props: &SigningProperties,
    ) -> Option<&'static str> {
        None
    }

    /// Add headers or query parameters that must be covered by the signature.
    fn add_prerequisites(
        &self,
        req: &mut SigningRequest,
        cred: &Credential,
        checksum: &ContentChecksum,
        props: &SigningProperties,
    ) -> Result<()>;

    /// Attach the signature to the request.
    fn add_signature(
        &self,
        req: &mut SigningRequest,
        cred: &Credential,
        canonical_request: &CanonicalRequest,
        signature: &str,
        props: &SigningProperties,
    ) -> Result<()>;
}

/// Every intermediate artifact of one signing call.
#[derive(Clone)]
pub struct SigV4RequestContext {
    /// Content hash and flexible checksum.
    pub content_checksum: ContentChecksum,
    /// The canonical request.
    pub canonical_request: CanonicalRequest,
    /// Hex SHA-256 of the canonical request.
    pub canonical_request_hash: String,
    /// The string to sign.
    pub string_to_sign: String,
    /// The derived signing key.
    pub signing_key: Vec<u8>,
    /// Hex encoded signature.
    pub signature: String,
    /// The request with every signing artifact attached.
    pub signed_request: SigningRequest,
}

impl Debug for SigV4RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigV4RequestContext")
            .field("content_checksum", &self.content_checksum)
            .field("canonical_request", &self.canonical_request)
            .field("canonical_request_hash", &self.canonical_request_hash)
            .field("string_to_sign", &self.string_to_sign)
            .field("signature", &self.signature)
            .field("signed_request", &self.signed_request)
            .finish_non_exhaustive()
    }
}

/// AWS SigV4 signer, parameterized by where the signature goes.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html)
#[derive(Debug, Clone, Default)]
pub struct AwsV4Signer<S> {
    strategy: S,
}

/// Signs with the `Authorization` header.
pub type AwsV4HeaderSigner = AwsV4Signer<HeaderStrategy>;
/// Signs with query parameters.
pub type AwsV4PresignedSigner = AwsV4Signer<PresignedStrategy>;
/// Signs with the `Authorization` header and an unsigned payload.
pub type AwsV4UnsignedPayloadSigner = AwsV4Signer<UnsignedPayloadStrategy>;

impl AwsV4Signer<HeaderStrategy> {
    /// Create a header signer.
    pub fn header() -> Self {
        Self::new(HeaderStrategy)
    }
}

impl AwsV4Signer<PresignedStrategy> {
    /// Create a presigning signer.
    pub fn presigned() -> Self {
        Self::new(PresignedStrategy)
    }
}

impl AwsV4Signer<UnsignedPayloadStrategy> {
    /// Create an unsigned-payload signer.
    pub fn unsigned_payload() -> Self {
        Self::new(UnsignedPayloadStrategy)
    }
}

impl<S: SigV4Strategy> AwsV4Signer<S> {
    /// Create a signer with the given strategy.
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Resolve and validate the properties of one request.
    pub fn resolve_properties(&self, props: &SignerProperties) -> Result<SigningProperties> {
        self.strategy.resolve_properties(props)
    }

    /// Start the flexible checksum requested by `props`.
    ///
    /// Returns `None` when no algorithm is configured, or when the request
    /// already carries the checksum header or announces it as a trailer.
    pub fn create_sdk_checksum(
        &self,
        req: &SigningRequest,
        props: &SigningProperties,
    ) -> Option<SdkChecksum> {
        let algorithm = props.checksum_algorithm?;
        let header_name = props.checksum_header_name.as_deref()?;

        if req.headers.contains_key(header_name) {
            debug!("checksum header {header_name} already present, skip computing");
            return None;
        }
        if announced_as_trailer(&req.headers, header_name) {
            debug!("checksum header {header_name} sent as trailer, skip computing");
            return None;
        }
        Some(algorithm.checksum())
    }

    /// Compute the content checksum of a blocking payload.
    pub fn create_checksum(
        &self,
        req: &SigningRequest,
        payload: Option<&SyncPayload>,
        props: &SigningProperties,
    ) -> Result<ContentChecksum> {
        let checksum = self.create_sdk_checksum(req, props);

        match self.strategy.payload_hash_override(req, props) {
            Some(hash) if checksum.is_none() => Ok(ContentChecksum {
                content_hash: hash.to_string(),
                checksum: None,
            }),
            Some(hash) => {
                let mut content = compute_sync(payload, checksum)?;
                content.content_hash = hash.to_string();
                Ok(content)
            }
            None => compute_sync(payload, checksum),
        }
    }

    /// Compute the content checksum of an async payload.
    pub async fn create_checksum_async(
        &self,
        req: &SigningRequest,
        payload: Option<&AsyncPayload>,
        props: &SigningProperties,
    ) -> Result<ContentChecksum> {
        let checksum = self.create_sdk_checksum(req, props);

        match self.strategy.payload_hash_override(req, props) {
            Some(hash) if checksum.is_none() => Ok(ContentChecksum {
                content_hash: hash.to_string(),
                checksum: None,
            }),
            Some(hash) => {
                let mut content = compute_async(payload, checksum).await?;
                content.content_hash = hash.to_string();
                Ok(content)
            }
            None => compute_async(payload, checksum).await,
        }
    }

    /// Sign `req` once its content checksum is known.
    pub fn process_request(
        &self,
        mut req: SigningRequest,
        cred: &Credential,
        content_checksum: ContentChecksum,
        props: &SigningProperties,
    ) -> Result<SigV4RequestContext> {
        self.strategy
            .add_prerequisites(&mut req, cred, &content_checksum, props)?;

        let canonical_request = CanonicalRequest::new(
            &req,
            &content_checksum.content_hash,
            props.canonical_options(),
        )?;
        debug!("calculated canonical request: {}", canonical_request.as_str());

        let canonical_request_hash = canonical_request.hash();
        debug!("calculated scope: {}", props.scope.scope());

        let string_to_sign = string_to_sign(&canonical_request_hash, &props.scope);
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = derive_signing_key(&cred.secret_access_key, &props.scope);
        let signature = compute_signature(&string_to_sign, &signing_key);

        self.strategy
            .add_signature(&mut req, cred, &canonical_request, &signature, props)?;

        Ok(SigV4RequestContext {
            content_checksum,
            canonical_request,
            canonical_request_hash,
            string_to_sign,
            signing_key,
            signature,
            signed_request: req,
        })
    }
}

#[async_trait]
impl<S: SigV4Strategy> HttpSigner for AwsV4Signer<S> {
    type Identity = Credential;

    fn sign(
        &self,
        req: SignRequest<Credential, SyncPayload>,
    ) -> Result<SignedRequest<SyncPayload>> {
        if req.identity.is_anonymous() {
            return Ok(req.into());
        }

        let props = self.resolve_properties(&req.properties)?;
        let checksum = self.create_checksum(&req.request, req.payload.as_ref(), &props)?;
        let ctx = self.process_request(req.request, &req.identity, checksum, &props)?;

        Ok(SignedRequest {
            request: ctx.signed_request,
            payload: req.payload,
        })
    }

    async fn sign_async(
        &self,
        req: SignRequest<Credential, AsyncPayload>,
    ) -> Result<SignedRequest<AsyncPayload>> {
        if req.identity.is_anonymous() {
            return Ok(req.into());
        }

        let props = self.resolve_properties(&req.properties)?;
        let checksum = self
            .create_checksum_async(&req.request, req.payload.as_ref(), &props)
            .await?;
        let ctx = self.process_request(req.request, &req.identity, checksum, &props)?;

        Ok(SignedRequest {
            request: ctx.signed_request,
            payload: req.payload,
        })
    }
}

/// Insert the `Host` header if absent, omitting the scheme's default port.
pub(crate) fn add_host_header(req: &mut SigningRequest) -> Result<()> {
    if req.headers.contains_key(HOST) {
        return Ok(());
    }

    let default_port = if req.scheme == Scheme::HTTPS { 443 } else { 80 };
    let host = match req.authority.port_u16() {
        Some(port) if port != default_port => format!("{}:{port}", req.authority.host()),
        _ => req.authority.host().to_string(),
    };
    req.header_insert(HOST, host, false)
}

fn announced_as_trailer(headers: &HeaderMap, header_name: &str) -> bool {
    headers
        .get_all(X_AMZ_TRAILER)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|v| v.trim().eq_ignore_ascii_case(header_name))
}
