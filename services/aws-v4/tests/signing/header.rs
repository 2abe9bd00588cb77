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

use super::*;
use httpsign_aws_v4::ChecksumAlgorithm;
use httpsign_core::ErrorKind;
use pretty_assertions::assert_eq;
use std::time::Duration;

fn sign_basic(parts: &Parts, cred: Credential, properties: SignerProperties) -> Result<SigningRequest> {
    sign_sync(&AwsV4Signer::header(), parts, Some(BODY), cred, properties)
}

#[test]
fn test_signing() -> Result<()> {
    init();

    let req = sign_basic(
        &basic_parts(|b| b),
        Credential::new("access", "secret"),
        basic_properties(),
    )?;

    assert_eq!(
        authorization(&req),
        format!(
            "{ACCESS_AUTHORIZATION}SignedHeaders=host;x-amz-archive-description;x-amz-date, \
             Signature=77fe7c02927966018667f21d1dc3dfad9057e58401cbb9ed64f1b7868288e35a"
        )
    );
    assert_eq!(req.headers["x-amz-date"], "19810216T063000Z");
    assert!(req.headers["authorization"].is_sensitive());
    assert!(!req.headers.contains_key("x-amz-content-sha256"));
    Ok(())
}

#[tokio::test]
async fn test_async_signing() -> Result<()> {
    init();

    let req = sign_async(
        &AwsV4Signer::header(),
        &basic_parts(|b| b),
        Some(BODY),
        Credential::new("access", "secret"),
        basic_properties(),
    )
    .await?;

    assert_eq!(
        authorization(&req),
        format!(
            "{ACCESS_AUTHORIZATION}SignedHeaders=host;x-amz-archive-description;x-amz-date, \
             Signature=77fe7c02927966018667f21d1dc3dfad9057e58401cbb9ed64f1b7868288e35a"
        )
    );
    Ok(())
}

#[test]
fn test_signing_with_header() -> Result<()> {
    let req = sign_basic(
        &basic_parts(|b| b.header("x-amz-sha256", "required")),
        Credential::new("access", "secret"),
        basic_properties(),
    )?;

    assert_eq!(
        authorization(&req),
        format!(
            "{ACCESS_AUTHORIZATION}SignedHeaders=host;x-amz-archive-description;x-amz-date;x-amz-sha256, \
             Signature=e73e20539446307a5dc71252dbd5b97e861f1d1267456abda3ebd8d57e519951"
        )
    );
    Ok(())
}

#[test]
fn test_query_param_without_value_is_signed_with_trailing_equals() -> Result<()> {
    let req = sign_basic(
        &basic_parts(|b| b.uri("http://demo.us-east-1.amazonaws.com/?Foo")),
        Credential::new("access", "secret"),
        basic_properties(),
    )?;

    assert!(authorization(&req).ends_with(
        "Signature=c45a3ff1f028e83017f3812c06b4440f0b3240264258f6e18cd683b816990ba4"
    ));
    Ok(())
}

#[test]
fn test_query_param_with_empty_name_is_not_signed() -> Result<()> {
    let req = sign_basic(
        &basic_parts(|b| b.uri("http://demo.us-east-1.amazonaws.com/?=")),
        Credential::new("akid", "skid"),
        basic_properties(),
    )?;

    assert_eq!(
        authorization(&req),
        format!(
            "{AKID_AUTHORIZATION}SignedHeaders=host;x-amz-archive-description;x-amz-date, \
             Signature=581d0042389009a28d461124138f1fe8eeb8daed87611d2a2b47fd3d68d81d73"
        )
    );
    Ok(())
}

#[test]
fn test_trace_id_is_not_signed() -> Result<()> {
    let req = sign_basic(
        &basic_parts(|b| {
            b.header(
                "X-Amzn-Trace-Id",
                " Root=1-584b150a-708479cb060007ffbf3ee1da;Parent=36d3dbcfd150aac9;Sampled=1",
            )
        }),
        Credential::new("akid", "skid"),
        basic_properties(),
    )?;

    assert_eq!(
        authorization(&req),
        format!(
            "{AKID_AUTHORIZATION}SignedHeaders=host;x-amz-archive-description;x-amz-date, \
             Signature=581d0042389009a28d461124138f1fe8eeb8daed87611d2a2b47fd3d68d81d73"
        )
    );
    assert!(req.headers.contains_key("x-amzn-trace-id"));
    Ok(())
}

#[test]
fn test_multi_value_headers_are_comma_separated() -> Result<()> {
    let req = sign_basic(
        &basic_parts(|b| b.header("foo", "bar").header("foo", "baz")),
        Credential::new("akid", "skid"),
        basic_properties(),
    )?;

    assert_eq!(
        authorization(&req),
        format!(
            "{AKID_AUTHORIZATION}SignedHeaders=foo;host;x-amz-archive-description;x-amz-date, \
             Signature=1253bc1751048ea299e688cbe07a2224292e5cc606a079cb40459ad987793c19"
        )
    );
    Ok(())
}

#[test]
fn test_header_values_with_extra_whitespace_are_trimmed() -> Result<()> {
    let req = sign_basic(
        &basic_parts(|b| {
            b.header("My-header1", "    a   b   c  ")
                .header("My-Header2", "    \"a   b   c\"  ")
        }),
        Credential::new("akid", "skid"),
        basic_properties(),
    )?;

    assert_eq!(
        authorization(&req),
        format!(
            "{AKID_AUTHORIZATION}SignedHeaders=host;my-header1;my-header2;x-amz-archive-description;x-amz-date, \
             Signature=6d3520e3397e7aba593d8ebd8361fc4405e90aed71bc4c7a09dcacb6f72460b9"
        )
    );
    Ok(())
}

#[test]
fn test_session_token_is_signed() -> Result<()> {
    let req = sign_basic(
        &basic_parts(|b| b),
        Credential::new("access", "secret").with_session_token("token"),
        basic_properties(),
    )?;

    assert_eq!(
        authorization(&req),
        format!(
            "{ACCESS_AUTHORIZATION}SignedHeaders=host;x-amz-archive-description;x-amz-date;x-amz-security-token, \
             Signature=f44a6c23e168c186a982f20322655a932659db5b75b0917f55eb4519a8e7169e"
        )
    );
    assert_eq!(req.headers["x-amz-security-token"], "token");
    assert!(req.headers["x-amz-security-token"].is_sensitive());
    Ok(())
}

#[test]
fn test_crc32_checksum_without_content_sha256_header() -> Result<()> {
    let req = sign_basic(
        &basic_parts(|b| b),
        Credential::new("access", "secret"),
        basic_properties()
            .with(CHECKSUM_HEADER_NAME, "x-amzn-header-crc".to_string())
            .with(CHECKSUM_ALGORITHM, ChecksumAlgorithm::Crc32),
    )?;

    assert_eq!(
        authorization(&req),
        format!(
            "{ACCESS_AUTHORIZATION}SignedHeaders=host;x-amz-archive-description;x-amz-date;x-amzn-header-crc, \
             Signature=c1804802dc623d1689e7d0a7f9f5caee3588cc8d3df4495425129dbd52965d1f"
        )
    );
    assert_eq!(req.headers["x-amzn-header-crc"], "oL+a/g==");
    assert!(!req.headers.contains_key("x-amz-content-sha256"));
    Ok(())
}

#[test]
fn test_crc32_checksum_with_content_sha256_placeholder() -> Result<()> {
    let req = sign_basic(
        &basic_parts(|b| b.header("x-amz-content-sha256", "required")),
        Credential::new("access", "secret"),
        basic_properties()
            .with(CHECKSUM_HEADER_NAME, "x-amzn-header-crc".to_string())
            .with(CHECKSUM_ALGORITHM, ChecksumAlgorithm::Crc32),
    )?;

    assert_eq!(
        authorization(&req),
        format!(
            "{ACCESS_AUTHORIZATION}SignedHeaders=host;x-amz-archive-description;x-amz-content-sha256;x-amz-date;x-amzn-header-crc, \
             Signature=bc931232666f226854cdd9c9962dc03d791cf4024f5ca032fab996c1d15e4a5d"
        )
    );
    assert_eq!(req.headers["x-amzn-header-crc"], "oL+a/g==");
    assert_eq!(
        req.headers["x-amz-content-sha256"],
        hex::encode(httpsign_core::hash::sha256(BODY))
    );
    Ok(())
}

#[test]
fn test_crc32_checksum_with_header_already_present() -> Result<()> {
    let req = sign_basic(
        &basic_parts(|b| b.header("x-amzn-header-crc", "preCalculatedChecksum")),
        Credential::new("access", "secret"),
        basic_properties()
            .with(CHECKSUM_HEADER_NAME, "x-amzn-header-crc".to_string())
            .with(CHECKSUM_ALGORITHM, ChecksumAlgorithm::Crc32),
    )?;

    assert_eq!(
        authorization(&req),
        format!(
            "{ACCESS_AUTHORIZATION}SignedHeaders=host;x-amz-archive-description;x-amz-date;x-amzn-header-crc, \
             Signature=f6fad563460f2ac50fe2ab5f5f5d77a787e357897ac6e9bb116ff12d30f45589"
        )
    );
    assert_eq!(req.headers["x-amzn-header-crc"], "preCalculatedChecksum");
    assert!(!req.headers.contains_key("x-amz-content-sha256"));
    Ok(())
}

#[test]
fn test_crc32_checksum_with_trailer_already_present() -> Result<()> {
    let req = sign_basic(
        &basic_parts(|b| b.header("x-amz-trailer", "x-amzn-header-crc")),
        Credential::new("access", "secret"),
        basic_properties()
            .with(CHECKSUM_HEADER_NAME, "x-amzn-header-crc".to_string())
            .with(CHECKSUM_ALGORITHM, ChecksumAlgorithm::Crc32),
    )?;

    assert!(!req.headers.contains_key("x-amzn-header-crc"));
    assert_eq!(req.headers["x-amz-trailer"], "x-amzn-header-crc");
    assert!(!req.headers.contains_key("x-amz-content-sha256"));
    assert_eq!(
        authorization(&req),
        format!(
            "{ACCESS_AUTHORIZATION}SignedHeaders=host;x-amz-archive-description;x-amz-date;x-amz-trailer, \
             Signature=3436c4bc175d31e87a591802e64756cebf2d1c6c2054d26ca3dc91bdd3de303e"
        )
    );
    Ok(())
}

#[test]
fn test_default_checksum_header_name() -> Result<()> {
    let req = sign_basic(
        &basic_parts(|b| b),
        Credential::new("access", "secret"),
        basic_properties().with(CHECKSUM_ALGORITHM, ChecksumAlgorithm::Crc32),
    )?;

    assert_eq!(req.headers["x-amz-checksum-crc32"], "oL+a/g==");
    assert!(authorization(&req).contains("x-amz-checksum-crc32"));
    Ok(())
}

#[test]
fn test_checksum_header_without_algorithm_fails() {
    let err = sign_basic(
        &basic_parts(|b| b),
        Credential::new("access", "secret"),
        basic_properties().with(CHECKSUM_HEADER_NAME, "x-amzn-header-crc".to_string()),
    )
    .unwrap_err();

    let err = err.downcast::<httpsign_core::Error>().unwrap();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

#[test]
fn test_expiration_is_rejected() {
    let err = sign_basic(
        &basic_parts(|b| b),
        Credential::new("access", "secret"),
        basic_properties().with(EXPIRATION_DURATION, Duration::from_secs(60)),
    )
    .unwrap_err();

    let err = err.downcast::<httpsign_core::Error>().unwrap();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
}

#[test]
fn test_anonymous_credential_leaves_request_untouched() -> Result<()> {
    let parts = basic_parts(|b| b.uri("http://demo.us-east-1.amazonaws.com/?Foo"));

    // Missing region and service don't matter when nothing is signed.
    let req = sign_basic(&parts, Credential::anonymous(), SignerProperties::new())?;

    assert_eq!(req.headers, parts.headers);
    assert_eq!(req.query, vec![("Foo".to_string(), "".to_string())]);
    assert!(!req.headers.contains_key("authorization"));
    Ok(())
}

#[test]
fn test_missing_region_fails() {
    let err = sign_basic(
        &basic_parts(|b| b),
        Credential::new("access", "secret"),
        SignerProperties::new().with(SERVICE_SIGNING_NAME, "demo".to_string()),
    )
    .unwrap_err();

    let err = err.downcast::<httpsign_core::Error>().unwrap();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

#[test]
fn test_signing_is_deterministic() -> Result<()> {
    let parts = basic_parts(|b| b.header("foo", "bar"));

    let first = sign_basic(&parts, Credential::new("access", "secret"), basic_properties())?;
    let second = sign_basic(&parts, Credential::new("access", "secret"), basic_properties())?;

    assert_eq!(authorization(&first), authorization(&second));
    assert_eq!(first.headers, second.headers);
    Ok(())
}
