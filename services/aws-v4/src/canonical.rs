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

//! Canonical request construction.
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n
//! \n
//! SignedHeaders\n
//! HashedPayload
//! ```

use crate::constants::{AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, IGNORED_HEADERS};
use http::HeaderMap;
use httpsign_core::hash::hex_sha256;
use httpsign_core::{Error, Result, SigningRequest};
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use std::collections::BTreeMap;

/// Knobs of the canonicalization that vary between services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalOptions {
    /// Percent encode the path as received.
    ///
    /// When disabled the path is decoded first, so every character outside
    /// the unreserved set is encoded exactly once, as S3 expects.
    pub double_url_encode: bool,
    /// Collapse empty segments and resolve `.` and `..` in the path.
    pub normalize_path: bool,
}

impl Default for CanonicalOptions {
    fn default() -> Self {
        Self {
            double_url_encode: true,
            normalize_path: true,
        }
    }
}

/// A canonical request together with its signed header list.
#[derive(Debug, Clone)]
pub struct CanonicalRequest {
    canonical_request: String,
    signed_headers: String,
}

impl CanonicalRequest {
    /// Canonicalize `req` with the given content hash.
    pub fn new(req: &SigningRequest, content_hash: &str, options: CanonicalOptions) -> Result<Self> {
        let headers = canonical_headers(&req.headers)?;
        let signed_headers = headers.keys().cloned().collect::<Vec<_>>().join(";");

        // 256 is specially chosen to avoid reallocation for most requests.
        let mut f = String::with_capacity(256);
        f.push_str(req.method.as_str());
        f.push('\n');
        f.push_str(&canonical_uri(&req.path, options)?);
        f.push('\n');
        f.push_str(&canonical_query(&req.query));
        f.push('\n');
        for (name, value) in &headers {
            f.push_str(name);
            f.push(':');
            f.push_str(value);
            f.push('\n');
        }
        f.push('\n');
        f.push_str(&signed_headers);
        f.push('\n');
        f.push_str(content_hash);

        Ok(Self {
            canonical_request: f,
            signed_headers,
        })
    }

    /// The canonical request string.
    pub fn as_str(&self) -> &str {
        &self.canonical_request
    }

    /// Sorted, `;` joined names of the signed headers.
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }

    /// Hex SHA-256 of the canonical request.
    pub fn hash(&self) -> String {
        hex_sha256(self.canonical_request.as_bytes())
    }
}

/// Canonical form of an encoded request path.
///
/// Fails with `RequestInvalid` when the decoded path is not valid UTF-8.
pub fn canonical_uri(path: &str, options: CanonicalOptions) -> Result<String> {
    let path = if path.is_empty() { "/" } else { path };
    let path = if options.normalize_path {
        normalize_path(path)
    } else {
        path.to_string()
    };

    if options.double_url_encode {
        return Ok(utf8_percent_encode(&path, &AWS_URI_ENCODE_SET).to_string());
    }

    let decoded = percent_decode_str(&path).decode_utf8().map_err(|e| {
        Error::request_invalid(format!("request path is not valid utf-8: {path}")).with_source(e)
    })?;
    Ok(utf8_percent_encode(&decoded, &AWS_URI_ENCODE_SET).to_string())
}

/// Remove empty and `.` segments and resolve `..` segments.
///
/// `..` never climbs above the root. A trailing slash is kept, including
/// the one implied by a trailing `.` or `..` segment.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            v => segments.push(v),
        }
    }

    let mut normalized = String::with_capacity(path.len());
    normalized.push('/');
    normalized.push_str(&segments.join("/"));

    let trailing_slash = path.ends_with('/') || path.ends_with("/.") || path.ends_with("/..");
    if trailing_slash && !segments.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Canonical query string built from decoded query pairs.
///
/// Pairs with an empty name are dropped, the rest are encoded and sorted by
/// key then value. A key without value is written as `key=`.
pub fn canonical_query(query: &[(String, String)]) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect();
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Headers to sign, keyed by lowercase name in sorted order.
///
/// Values are trimmed, inner whitespace runs collapse to one space and
/// repeated headers are joined with `,`.
pub fn canonical_headers(headers: &HeaderMap) -> Result<BTreeMap<String, String>> {
    let mut canonical = BTreeMap::new();

    for name in headers.keys() {
        if IGNORED_HEADERS.contains(&name.as_str()) {
            continue;
        }

        let mut values = Vec::new();
        for value in headers.get_all(name) {
            values.push(
                value
                    .to_str()?
                    .split_ascii_whitespace()
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }
        canonical.insert(name.as_str().to_string(), values.join(","));
    }

    Ok(canonical)
}
