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

use http::header::HeaderName;
use http::uri::Authority;
use http::uri::Scheme;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

use crate::{Error, Result};

/// Characters escaped when writing query pairs back into a URI.
///
/// Everything except the RFC 3986 unreserved characters.
pub const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// An HTTP request as seen by a signer.
///
/// The query is kept decoded. It is percent encoded again with
/// [`QUERY_ENCODE_SET`] when the request is applied back to
/// `http::request::Parts`.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, still percent encoded.
    pub path: String,
    /// Decoded query pairs in request order.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing request from `http::request::Parts` without modifying them.
    pub fn from_parts(parts: &http::request::Parts) -> Result<Self> {
        let authority = parts.uri.authority().cloned().ok_or_else(|| {
            Error::request_invalid("request without authority is invalid for signing")
        })?;
        let path = match parts.uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: parts.uri.scheme().cloned().unwrap_or(Scheme::HTTP),
            authority,
            path,
            query: parts
                .uri
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
            headers: parts.headers.clone(),
        })
    }

    /// Build the URI this request points to.
    pub fn uri(&self) -> Result<Uri> {
        let mut paq = self.path.clone();
        let query = self.query_string();
        if !query.is_empty() {
            paq.push('?');
            paq.push_str(&query);
        }

        let uri = Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(paq)
            .build()?;
        Ok(uri)
    }

    /// Apply the signing request back to `http::request::Parts`.
    ///
    /// `parts` is left untouched if the request can't be turned into a valid URI.
    pub fn apply(self, parts: &mut http::request::Parts) -> Result<()> {
        let uri = self.uri()?;

        parts.method = self.method;
        parts.uri = uri;
        parts.headers = self.headers;
        Ok(())
    }

    /// Whether the request is sent over TLS.
    #[inline]
    pub fn is_https(&self) -> bool {
        self.scheme == Scheme::HTTPS
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Encode the query in request order.
    ///
    /// Pairs with an empty value are written as a bare key.
    pub fn query_string(&self) -> String {
        let mut s = String::new();
        for (i, (k, v)) in self.query.iter().enumerate() {
            if i > 0 {
                s.push('&');
            }
            s.extend(utf8_percent_encode(k, QUERY_ENCODE_SET));
            if !v.is_empty() {
                s.push('=');
                s.extend(utf8_percent_encode(v, QUERY_ENCODE_SET));
            }
        }
        s
    }

    /// Insert a header, marking it sensitive when it carries a secret.
    pub fn header_insert(
        &mut self,
        key: HeaderName,
        value: impl AsRef<str>,
        sensitive: bool,
    ) -> Result<()> {
        let mut value = HeaderValue::from_str(value.as_ref())?;
        value.set_sensitive(sensitive);
        self.headers.insert(key, value);
        Ok(())
    }
}
