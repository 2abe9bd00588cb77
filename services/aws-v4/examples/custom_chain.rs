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

//! Build a credential chain with a provider of our own.

use async_trait::async_trait;
use httpsign_aws_v4::{
    AwsV4Signer, Config, Credential, EnvCredentialProvider, ProvideCredentialChain,
};
use httpsign_core::{Context, OsEnv, ProvideCredential, Signer};

#[derive(Debug)]
struct VaultCredentialProvider {
    access_key: String,
    secret_key: String,
}

#[async_trait]
impl ProvideCredential for VaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> anyhow::Result<Option<Self::Credential>> {
        Ok(Some(Credential::new(&self.access_key, &self.secret_key)))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let ctx = Context::new().with_env(OsEnv);
    let chain = ProvideCredentialChain::new()
        .push(EnvCredentialProvider::new())
        .push(VaultCredentialProvider {
            access_key: "vault_key".to_string(),
            secret_key: "vault_secret".to_string(),
        });

    let signer = Signer::new(ctx, chain, AwsV4Signer::header())
        .with_properties(Config::new("dynamodb", "us-east-1").into_properties());

    let mut req = http::Request::post("https://dynamodb.us-east-1.amazonaws.com/")
        .header("x-amz-target", "DynamoDB_20120810.ListTables")
        .body(())?
        .into_parts()
        .0;
    signer.sign(&mut req, None).await?;

    println!("{:?}", req.headers);
    Ok(())
}
