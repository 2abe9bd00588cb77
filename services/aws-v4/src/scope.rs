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

use crate::constants::AWS4_TERMINATOR;
use httpsign_core::time::{format_date, format_iso8601, DateTime};

/// The date, region and service a signing key is bound to.
///
/// The date and the request timestamp are both derived from the same
/// instant, so they never diverge within one signing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialScope {
    region: String,
    service: String,
    instant: DateTime,
}

impl CredentialScope {
    /// Create a scope for the given region, service and signing instant.
    pub fn new(region: impl Into<String>, service: impl Into<String>, instant: DateTime) -> Self {
        Self {
            region: region.into(),
            service: service.into(),
            instant,
        }
    }

    /// Region name.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Service signing name.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Instant the request is signed at.
    pub fn instant(&self) -> DateTime {
        self.instant
    }

    /// Date part of the scope, formatted as `yyyyMMdd`.
    pub fn date(&self) -> String {
        format_date(self.instant)
    }

    /// Request timestamp, formatted as `yyyyMMddTHHmmssZ`.
    pub fn datetime(&self) -> String {
        format_iso8601(self.instant)
    }

    /// Scope string: `<date>/<region>/<service>/aws4_request`.
    pub fn scope(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.date(),
            self.region,
            self.service,
            AWS4_TERMINATOR
        )
    }
}
