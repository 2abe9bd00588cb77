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

//! AWS SigV4 signing.
//!
//! Three signers share one pipeline and differ in where the signature
//! goes:
//!
//! - [`AwsV4HeaderSigner`]: the `Authorization` header.
//! - [`AwsV4PresignedSigner`]: query parameters of a presigned URL.
//! - [`AwsV4UnsignedPayloadSigner`]: the `Authorization` header, with the
//!   payload left out of the signature over HTTPS.
//!
//! ## Example
//!
//! ```no_run
//! use httpsign_aws_v4::{AwsV4Signer, Config, DefaultCredentialProvider};
//! use httpsign_core::{Context, Result, Signer};
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new();
//! let config = Config::from_env(&ctx)
//!     .with_service("s3")
//!     .with_double_url_encode(false)
//!     .with_normalize_path(false);
//! let signer = Signer::new(ctx, DefaultCredentialProvider::new(), AwsV4Signer::header())
//!     .with_properties(config.into_properties());
//!
//! let mut parts = http::Request::get("https://examplebucket.s3.amazonaws.com/test.txt")
//!     .body(())?
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;

mod credential;
pub use credential::Credential;
mod provide_credential;
pub use provide_credential::*;

mod config;
pub use config::Config;
mod scope;
pub use scope::CredentialScope;
pub mod properties;
pub use properties::SigningProperties;
pub mod checksum;
pub use checksum::{ChecksumAlgorithm, ContentChecksum, SdkChecksum};
pub mod canonical;
pub use canonical::{CanonicalOptions, CanonicalRequest};
pub mod sign;

mod signer;
pub use signer::{
    AwsV4HeaderSigner, AwsV4PresignedSigner, AwsV4Signer, AwsV4UnsignedPayloadSigner,
    HeaderStrategy, PresignedStrategy, SigV4RequestContext, SigV4Strategy,
    UnsignedPayloadStrategy,
};
