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

//! Sign an S3 upload with a header signature, then presign a download URL.
//!
//! Credentials and region are read from `AWS_ACCESS_KEY_ID`,
//! `AWS_SECRET_ACCESS_KEY` and `AWS_REGION`.

use bytes::Bytes;
use httpsign_aws_v4::properties::EXPIRATION_DURATION;
use httpsign_aws_v4::{AwsV4Signer, ChecksumAlgorithm, Config, DefaultCredentialProvider};
use httpsign_core::payload::SyncPayload;
use httpsign_core::{Context, OsEnv, Signer, SignerProperties};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let ctx = Context::new().with_env(OsEnv);
    let config = Config::from_env(&ctx)
        .with_service("s3")
        .with_checksum_algorithm(ChecksumAlgorithm::Crc32);
    let region = config.region.clone().unwrap_or_else(|| "us-east-1".to_string());

    let signer = Signer::new(
        ctx.clone(),
        DefaultCredentialProvider::new(),
        AwsV4Signer::header(),
    )
    .with_properties(config.clone().into_properties());

    let url = format!("https://examplebucket.s3.{region}.amazonaws.com/hello.txt");
    let mut upload = http::Request::put(&url)
        .header("x-amz-content-sha256", "required")
        .body(())?
        .into_parts()
        .0;
    let body: SyncPayload = Arc::new(Bytes::from_static(b"Hello, World!"));
    signer.sign(&mut upload, Some(body)).await?;

    println!("PUT {}", upload.uri);
    for (name, value) in &upload.headers {
        println!("  {name}: {value:?}");
    }

    let presigner = Signer::new(ctx, DefaultCredentialProvider::new(), AwsV4Signer::presigned())
        .with_properties(config.into_properties());
    let mut download = http::Request::get(&url).body(())?.into_parts().0;
    presigner
        .sign_with_properties(
            &mut download,
            None,
            &SignerProperties::new().with(EXPIRATION_DURATION, Duration::from_secs(3600)),
        )
        .await?;

    println!("GET {}", download.uri);
    Ok(())
}
