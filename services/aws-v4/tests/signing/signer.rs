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

//! End-to-end signing through [`Signer`].

use super::*;
use httpsign_aws_v4::{Config, DefaultCredentialProvider, StaticCredentialProvider};
use httpsign_core::{Context, Signer, StaticEnv};
use pretty_assertions::assert_eq;

const EXPECTED: &str = "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/s3/aws4_request, \
     SignedHeaders=host;x-amz-date, \
     Signature=f0e8ef31e6da816f73e7b38700c8b8ce5ac6fb8223e120d5fffc23d17f590177";

fn s3_properties() -> SignerProperties {
    let instant = chrono::DateTime::from_timestamp(1_440_938_160, 0).expect("timestamp must be valid");
    Config::new("s3", "us-east-1")
        .into_properties()
        .with(REQUEST_SIGNING_INSTANT, instant)
}

#[tokio::test]
async fn test_signer_with_static_credential() -> Result<()> {
    init();

    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new(EXAMPLE_ACCESS_KEY, EXAMPLE_SECRET_KEY),
        AwsV4Signer::header(),
    )
    .with_properties(s3_properties());

    let mut parts = example_parts("https");
    signer.sign(&mut parts, None).await?;

    assert_eq!(parts.headers["authorization"], EXPECTED);
    assert_eq!(parts.headers["x-amz-date"], "20150830T123600Z");
    assert_eq!(parts.headers["host"], "examplebucket.s3.amazonaws.com");
    Ok(())
}

#[tokio::test]
async fn test_signer_with_env_credential() -> Result<()> {
    init();

    let ctx = Context::new().with_env(StaticEnv::from_pairs([
        ("AWS_ACCESS_KEY_ID", EXAMPLE_ACCESS_KEY),
        ("AWS_SECRET_ACCESS_KEY", EXAMPLE_SECRET_KEY),
        ("AWS_SESSION_TOKEN", "session"),
    ]));
    let signer = Signer::new(ctx, DefaultCredentialProvider::new(), AwsV4Signer::header())
        .with_properties(s3_properties());

    let mut parts = example_parts("https");
    signer.sign(&mut parts, None).await?;

    assert_eq!(parts.headers["x-amz-security-token"], "session");
    assert!(parts.headers["x-amz-security-token"].is_sensitive());
    assert!(parts.headers["authorization"]
        .to_str()?
        .contains("SignedHeaders=host;x-amz-date;x-amz-security-token,"));
    Ok(())
}

#[tokio::test]
async fn test_signer_async_matches_sync() -> Result<()> {
    init();

    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new(EXAMPLE_ACCESS_KEY, EXAMPLE_SECRET_KEY),
        AwsV4Signer::header(),
    )
    .with_properties(s3_properties());

    let mut parts = example_parts("https");
    signer.sign_async(&mut parts, None).await?;

    assert_eq!(parts.headers["authorization"], EXPECTED);
    Ok(())
}

#[tokio::test]
async fn test_signer_presigns_uri() -> Result<()> {
    init();

    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new(EXAMPLE_ACCESS_KEY, EXAMPLE_SECRET_KEY),
        AwsV4Signer::presigned(),
    )
    .with_properties(s3_properties());

    let mut parts = example_parts("https");
    signer
        .sign_with_properties(
            &mut parts,
            None,
            &SignerProperties::new().with(EXPIRATION_DURATION, std::time::Duration::from_secs(3600)),
        )
        .await?;

    let query = parts.uri.query().expect("query must be set");
    assert!(query.starts_with("X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Date=20150830T123600Z&"));
    assert!(query.contains("&X-Amz-Expires=3600&"));
    assert!(!parts.headers.contains_key("authorization"));
    Ok(())
}

#[tokio::test]
async fn test_signer_without_credential_fails() -> Result<()> {
    let signer = Signer::new(Context::new(), DefaultCredentialProvider::new(), AwsV4Signer::header())
        .with_properties(s3_properties());

    let mut parts = example_parts("https");
    let err = signer.sign(&mut parts, None).await.unwrap_err();

    assert!(err.is_credential_error());
    assert!(parts.headers.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_signer_with_anonymous_credential() -> Result<()> {
    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::anonymous(),
        AwsV4Signer::header(),
    )
    .with_properties(s3_properties());

    let mut parts = example_parts("https");
    signer.sign(&mut parts, None).await?;

    assert!(parts.headers.is_empty());
    assert_eq!(parts.uri.query(), None);
    Ok(())
}
