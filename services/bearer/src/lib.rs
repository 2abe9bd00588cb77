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

//! Bearer token signing.
//!
//! A [`BearerSigner`] sets `Authorization: Bearer <token>` and leaves
//! everything else in the request alone: no canonicalization and no
//! payload hashing.
//!
//! ```no_run
//! use httpsign_bearer::{BearerSigner, StaticTokenProvider};
//! use httpsign_core::{Context, Signer};
//!
//! # async fn example() -> httpsign_core::Result<()> {
//! let signer = Signer::new(Context::new(), StaticTokenProvider::new("my-token"), BearerSigner);
//!
//! let mut parts = http::Request::get("https://api.example.com/v1/items")
//!     .body(())?
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod token;
pub use token::Token;
mod provide_token;
pub use provide_token::StaticTokenProvider;
mod signer;
pub use signer::BearerSigner;
