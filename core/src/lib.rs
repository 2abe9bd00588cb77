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

//! Core components for signing HTTP requests.
//!
//! This crate provides the types and traits shared by every signer in the
//! httpsign family.
//!
//! ## Overview
//!
//! - **Identity**: what a request is signed with. [`Anonymous`] is the
//!   identity of unauthenticated calls and makes every signer a no-op.
//! - **HttpSigner**: turns a [`SignRequest`] (request, payload, identity and
//!   [`SignerProperties`]) into a [`SignedRequest`], with a blocking and an
//!   async entry point.
//! - **ProvideCredential**: loads an identity from a [`Context`].
//! - **Signer**: the orchestrator that caches the identity and applies the
//!   signed request back to `http::request::Parts`.
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use httpsign_core::payload::{AsyncPayload, SyncPayload};
//! use httpsign_core::{
//!     Context, HttpSigner, Identity, ProvideCredential, Result, SignRequest, SignedRequest,
//!     Signer,
//! };
//!
//! #[derive(Clone, Debug)]
//! struct ApiKey(String);
//!
//! impl Identity for ApiKey {
//!     fn is_valid(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct EnvApiKey;
//!
//! #[async_trait]
//! impl ProvideCredential for EnvApiKey {
//!     type Credential = ApiKey;
//!
//!     async fn provide_credential(&self, ctx: &Context) -> anyhow::Result<Option<ApiKey>> {
//!         Ok(ctx.env_var("MY_API_KEY").map(ApiKey))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct ApiKeySigner;
//!
//! #[async_trait]
//! impl HttpSigner for ApiKeySigner {
//!     type Identity = ApiKey;
//!
//!     fn sign(&self, mut req: SignRequest<ApiKey, SyncPayload>) -> Result<SignedRequest<SyncPayload>> {
//!         req.request
//!             .header_insert("x-api-key".parse()?, &req.identity.0, true)?;
//!         Ok(req.into())
//!     }
//!
//!     async fn sign_async(
//!         &self,
//!         mut req: SignRequest<ApiKey, AsyncPayload>,
//!     ) -> Result<SignedRequest<AsyncPayload>> {
//!         req.request
//!             .header_insert("x-api-key".parse()?, &req.identity.0, true)?;
//!         Ok(req.into())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::new(), EnvApiKey, ApiKeySigner);
//!
//! let mut parts = http::Request::get("https://example.com")
//!     .body(())?
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod payload;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod context;
pub use context::{Context, Env, OsEnv, StaticEnv};
mod property;
pub use property::{SignerProperties, SignerProperty};
mod request;
pub use request::{SigningRequest, QUERY_ENCODE_SET};
mod api;
pub use api::{Anonymous, HttpSigner, Identity, ProvideCredential, SignRequest, SignedRequest};
mod signer;
pub use signer::Signer;
mod no_auth;
pub use no_auth::NoAuthSigner;
