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
    Anonymous, Context, HttpSigner, ProvideCredential, Result, SignRequest, SignedRequest,
};
use async_trait::async_trait;

/// Auth scheme for unauthenticated calls.
///
/// It signs nothing and always provides the [`Anonymous`] identity, so it
/// can be used as both halves of a [`crate::Signer`]:
///
/// ```
/// use httpsign_core::{Context, NoAuthSigner, Signer};
///
/// let signer = Signer::new(Context::new(), NoAuthSigner, NoAuthSigner);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthSigner;

#[async_trait]
impl ProvideCredential for NoAuthSigner {
    type Credential = Anonymous;

    async fn provide_credential(&self, _: &Context) -> anyhow::Result<Option<Anonymous>> {
        Ok(Some(Anonymous))
    }
}

#[async_trait]
impl HttpSigner for NoAuthSigner {
    type Identity = Anonymous;

    fn sign(&self, req: SignRequest<Anonymous, SyncPayload>) -> Result<SignedRequest<SyncPayload>> {
        Ok(req.into())
    }

    async fn sign_async(
        &self,
        req: SignRequest<Anonymous, AsyncPayload>,
    ) -> Result<SignedRequest<AsyncPayload>> {
        Ok(req.into())
    }
}
