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

//! Signing key derivation and signature computation.

use crate::constants::{AWS4_SIGNING_ALGORITHM, AWS4_TERMINATOR};
use crate::scope::CredentialScope;
use httpsign_core::hash::{hex_hmac_sha256, hmac_sha256};

/// Derive the signing key for `scope`.
///
/// The session token never takes part in the derivation.
pub fn derive_signing_key(secret_access_key: &str, scope: &CredentialScope) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret_access_key}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), scope.date().as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), scope.region().as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), scope.service().as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), AWS4_TERMINATOR.as_bytes())
}

/// Build the string to sign.
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313/<region>/<service>/aws4_request
/// <hashed_canonical_request>
/// ```
pub fn string_to_sign(canonical_request_hash: &str, scope: &CredentialScope) -> String {
    format!(
        "{AWS4_SIGNING_ALGORITHM}\n{}\n{}\n{canonical_request_hash}",
        scope.datetime(),
        scope.scope()
    )
}

/// Hex encoded signature of `string_to_sign`.
pub fn compute_signature(string_to_sign: &str, signing_key: &[u8]) -> String {
    hex_hmac_sha256(signing_key, string_to_sign.as_bytes())
}

/// Value of the `Authorization` header.
pub fn authorization_header(
    access_key_id: &str,
    scope: &CredentialScope,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "{AWS4_SIGNING_ALGORITHM} Credential={access_key_id}/{}, SignedHeaders={signed_headers}, Signature={signature}",
        scope.scope()
    )
}
