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

use httpsign_core::time::{now, DateTime};
use httpsign_core::utils::Redact;
use httpsign_core::Identity;
use std::fmt::{self, Debug};

/// A bearer token.
///
/// The empty token is the anonymous identity.
#[derive(Clone, Default)]
pub struct Token {
    /// The token sent after `Bearer `.
    pub token: String,
    /// Expiration time for this token.
    pub expires_in: Option<DateTime>,
}

impl Token {
    /// Create a token that never expires.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_in: None,
        }
    }

    /// Set the expiration time.
    pub fn with_expires_in(mut self, expires_in: DateTime) -> Self {
        self.expires_in = Some(expires_in);
        self
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("token", &Redact::from(&self.token))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl Identity for Token {
    fn is_valid(&self) -> bool {
        if self.is_anonymous() {
            return true;
        }
        // Consider token invalid if it expires within 2 minutes.
        match self.expires_in {
            Some(expires_in) => expires_in > now() + chrono::TimeDelta::minutes(2),
            None => true,
        }
    }

    fn is_anonymous(&self) -> bool {
        self.token.is_empty()
    }
}
