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
use crate::{
    Context, Error, HttpSigner, Identity, ProvideCredential, Result, SignRequest,
    SignerProperties, SigningRequest,
};
use std::fmt;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign requests.
///
/// It loads the identity through a [`ProvideCredential`], caches it until it
/// becomes invalid, and hands each request to an [`HttpSigner`] together with
/// the default signer properties.
pub struct Signer<S: HttpSigner> {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = S::Identity>>,
    signer: Arc<S>,
    properties: SignerProperties,
    identity: Arc<Mutex<Option<S::Identity>>>,
}

impl<S: HttpSigner> Clone for Signer<S> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            provider: self.provider.clone(),
            signer: self.signer.clone(),
            properties: self.properties.clone(),
            identity: self.identity.clone(),
        }
    }
}

impl<S: HttpSigner> Debug for Signer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("provider", &self.provider)
            .field("signer", &self.signer)
            .field("properties", &self.properties)
            .finish()
    }
}

impl<S: HttpSigner> Signer<S> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = S::Identity>,
        signer: S,
    ) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),
            signer: Arc::new(signer),
            properties: SignerProperties::new(),
            identity: Arc::new(Mutex::new(None)),
        }
    }

    /// Set the properties every request is signed with.
    pub fn with_properties(mut self, properties: SignerProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Return the cached identity, loading a new one when it is missing or invalid.
    pub async fn identity(&self) -> Result<S::Identity> {
        let cached = self
            .identity
            .lock()
            .map_err(|_| Error::unexpected("identity cache lock poisoned"))?
            .clone();
        if let Some(identity) = cached.filter(|v| v.is_valid()) {
            return Ok(identity);
        }

        log::debug!("loading identity from {:?}", self.provider);
        let identity = self
            .provider
            .provide_credential(&self.ctx)
            .await?
            .ok_or_else(|| Error::credential_invalid("no valid credential found"))?;
        if !identity.is_valid() {
            return Err(Error::credential_expired(
                "credential provider returned an invalid credential",
            ));
        }

        *self
            .identity
            .lock()
            .map_err(|_| Error::unexpected("identity cache lock poisoned"))? =
            Some(identity.clone());
        Ok(identity)
    }

    /// Sign a request in place.
    ///
    /// Returns the payload to send along with the request.
    pub async fn sign(
        &self,
        parts: &mut http::request::Parts,
        payload: Option<SyncPayload>,
    ) -> Result<Option<SyncPayload>> {
        self.sign_with_properties(parts, payload, &SignerProperties::new())
            .await
    }

    /// Sign a request in place, overriding some of the default properties.
    ///
    /// On error `parts` is left untouched.
    pub async fn sign_with_properties(
        &self,
        parts: &mut http::request::Parts,
        payload: Option<SyncPayload>,
        properties: &SignerProperties,
    ) -> Result<Option<SyncPayload>> {
        let identity = self.identity().await?;
        if identity.is_anonymous() {
            return Ok(payload);
        }

        let req = SignRequest {
            request: SigningRequest::from_parts(parts)?,
            payload,
            identity,
            properties: self.properties.clone().merge(properties),
        };
        let signed = self.signer.sign(req)?;
        signed.request.apply(parts)?;
        Ok(signed.payload)
    }

    /// Sign a request whose payload is a stream.
    ///
    /// Dropping the returned future cancels signing: the payload stream is
    /// dropped mid-hash and `parts` is left untouched.
    pub async fn sign_async(
        &self,
        parts: &mut http::request::Parts,
        payload: Option<AsyncPayload>,
    ) -> Result<Option<AsyncPayload>> {
        self.sign_async_with_properties(parts, payload, &SignerProperties::new())
            .await
    }

    /// Sign a request whose payload is a stream, overriding some of the
    /// default properties.
    ///
    /// On error or cancellation `parts` is left untouched.
    pub async fn sign_async_with_properties(
        &self,
        parts: &mut http::request::Parts,
        payload: Option<AsyncPayload>,
        properties: &SignerProperties,
    ) -> Result<Option<AsyncPayload>> {
        let identity = self.identity().await?;
        if identity.is_anonymous() {
            return Ok(payload);
        }

        let req = SignRequest {
            request: SigningRequest::from_parts(parts)?,
            payload,
            identity,
            properties: self.properties.clone().merge(properties),
        };
        let signed = self.signer.sign_async(req).await?;
        signed.request.apply(parts)?;
        Ok(signed.payload)
    }
}
