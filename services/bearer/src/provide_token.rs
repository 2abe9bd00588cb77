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
use httpsign_core::{Context, ProvideCredential};

/// StaticTokenProvider always returns the token it was built with.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: Token,
}

impl StaticTokenProvider {
    /// Create a provider for a token that never expires.
    pub fn new(token: &str) -> Self {
        Self {
            token: Token::new(token),
        }
    }

    /// Provide the anonymous token, which disables signing.
    pub fn anonymous() -> Self {
        Self {
            token: Token::default(),
        }
    }
}

impl From<Token> for StaticTokenProvider {
    fn from(token: Token) -> Self {
        Self { token }
    }
}

#[async_trait]
impl ProvideCredential for StaticTokenProvider {
    type Credential = Token;

    async fn provide_credential(&self, _: &Context) -> anyhow::Result<Option<Self::Credential>> {
        Ok(Some(self.token.clone()))
    }
}
