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

use crate::payload::{AsyncPayload, SyncPayload};
use crate::{Context, Result, SignerProperties, SigningRequest};
use std::fmt::Debug;

/// Identity is the trait implemented by everything a signer signs with:
/// AWS credentials, bearer tokens, or the [`Anonymous`] marker.
pub trait Identity: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the identity is still usable.
    fn is_valid(&self) -> bool;

    /// Anonymous identities make every signer return the request unchanged.
    fn is_anonymous(&self) -> bool {
        false
    }
}

/// The identity of unauthenticated calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anonymous;

impl Identity for Anonymous {
    fn is_valid(&self) -> bool {
        true
    }

    fn is_anonymous(&self) -> bool {
        true
    }
}

/// ProvideCredential is the trait used by signer to load the identity from the environment.
///
/// Service may require different identity to sign the request, for example, AWS require
/// access key and secret key, while bearer auth only requires a token.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load the credential from current context.
    ///
    /// Returns `Ok(None)` when this provider has nothing to offer.
    async fn provide_credential(&self, ctx: &Context) -> anyhow::Result<Option<Self::Credential>>;
}

/// Everything a signer needs for one signing call.
#[derive(Debug, Clone)]
pub struct SignRequest<I, P> {
    /// The request to sign.
    pub request: SigningRequest,
    /// The request body, if any.
    pub payload: Option<P>,
    /// The identity to sign with.
    pub identity: I,
    /// Signer properties for this call.
    pub properties: SignerProperties,
}

impl<I, P> SignRequest<I, P> {
    /// Create a sign request without payload or properties.
    pub fn new(request: SigningRequest, identity: I) -> Self {
        Self {
            request,
            payload: None,
            identity,
            properties: SignerProperties::new(),
        }
    }

    /// Attach a payload.
    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Replace the signer properties.
    pub fn with_properties(mut self, properties: SignerProperties) -> Self {
        self.properties = properties;
        self
    }
}

/// The outcome of a signing call.
#[derive(Debug, Clone)]
pub struct SignedRequest<P> {
    /// The signed request.
    pub request: SigningRequest,
    /// The payload to send, which may differ from the one passed in.
    pub payload: Option<P>,
}

impl<I, P> From<SignRequest<I, P>> for SignedRequest<P> {
    /// Pass a request through unsigned.
    fn from(req: SignRequest<I, P>) -> Self {
        Self {
            request: req.request,
            payload: req.payload,
        }
    }
}

/// HttpSigner signs a request with an identity.
///
/// Implementations are stateless: every call gets its own intermediate
/// state, so a single signer can be shared across threads.
#[async_trait::async_trait]
pub trait HttpSigner: Debug + Send + Sync + 'static {
    /// Identity used by this signer.
    type Identity: Identity;

    /// Sign a request whose payload is read synchronously.
    fn sign(
        &self,
        req: SignRequest<Self::Identity, SyncPayload>,
    ) -> Result<SignedRequest<SyncPayload>>;

    /// Sign a request whose payload is a stream.
    ///
    /// Consuming the payload stream is the only suspension point. Dropping
    /// the returned future stops hashing and produces no signature.
    async fn sign_async(
        &self,
        req: SignRequest<Self::Identity, AsyncPayload>,
    ) -> Result<SignedRequest<AsyncPayload>>;
}
