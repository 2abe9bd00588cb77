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

//! AWS SigV4 support with convenience APIs.

pub use httpsign_aws_v4::*;

use crate::{default_context, Signer};

/// AWS signer with the header strategy.
pub type DefaultSigner = Signer<AwsV4HeaderSigner>;

/// Create a header signer for `service` in `region`.
///
/// Credentials come from [`DefaultCredentialProvider`] and the remaining
/// settings from [`Config::from_env`].
///
/// ```no_run
/// # async fn example() -> httpsign::Result<()> {
/// let signer = httpsign::aws::default_signer("dynamodb", "us-east-1");
///
/// let mut parts = http::Request::post("https://dynamodb.us-east-1.amazonaws.com/")
///     .header("x-amz-target", "DynamoDB_20120810.ListTables")
///     .body(())?
///     .into_parts()
///     .0;
/// signer.sign(&mut parts, None).await?;
/// # Ok(())
/// # }
/// ```
pub fn default_signer(service: &str, region: &str) -> DefaultSigner {
    let ctx = default_context();
    let config = Config::from_env(&ctx)
        .with_service(service)
        .with_region(region);
    Signer::new(ctx, DefaultCredentialProvider::new(), AwsV4Signer::header())
        .with_properties(config.into_properties())
}

/// Create a presigning signer for `service` in `region`.
pub fn default_presigner(service: &str, region: &str) -> Signer<AwsV4PresignedSigner> {
    let ctx = default_context();
    let config = Config::from_env(&ctx)
        .with_service(service)
        .with_region(region);
    Signer::new(ctx, DefaultCredentialProvider::new(), AwsV4Signer::presigned())
        .with_properties(config.into_properties())
}
