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

use crate::Token;
use async_trait::async_trait;
use http::header::AUTHORIZATION;
use httpsign_core::payload::{AsyncPayload, SyncPayload};
use httpsign_core::{HttpSigner, Identity, Result, SignRequest, SignedRequest, SigningRequest};

/// BearerSigner sets `Authorization: Bearer <token>`.
///
/// Any existing `Authorization` header is replaced. Anonymous tokens leave
/// the request untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerSigner;

impl BearerSigner {
    fn authorize(req: &mut SigningRequest, token: &Token) -> Result<()> {
        req.header_insert(AUTHORIZATION, format!("Bearer {}", token.token), true)
    }
}

#[async_trait]
impl HttpSigner for BearerSigner {
    type Identity = Token;

    fn sign(&self, mut req: SignRequest<Token, SyncPayload>) -> Result<SignedRequest<SyncPayload>> {
        if req.identity.is_anonymous() {
            log::debug!("anonymous token, request is sent unsigned");
            return Ok(req.into());
        }
        Self::authorize(&mut req.request, &req.identity)?;
        Ok(req.into())
    }

    async fn sign_async(
        &self,
        mut req: SignRequest<Token, AsyncPayload>,
    ) -> Result<SignedRequest<AsyncPayload>> {
        if req.identity.is_anonymous() {
            log::debug!("anonymous token, request is sent unsigned");
            return Ok(req.into());
        }
        Self::authorize(&mut req.request, &req.identity)?;
        Ok(req.into())
    }
}
