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

//! Content hash and flexible checksum computation.
//!
//! The SigV4 content hash is always SHA-256. A flexible checksum
//! (`x-amz-checksum-*`) may be computed over the same bytes in the same
//! pass.

use crate::constants::X_AMZ_CHECKSUM_PREFIX;
use bytes::Bytes;
use futures::channel::oneshot;
use futures::stream::BoxStream;
use futures::StreamExt;
use httpsign_core::hash::base64_encode;
use httpsign_core::payload::{AsyncPayload, SyncPayload};
use httpsign_core::{Error, Result};
use sha2::Digest;
use sha2::Sha256;
use std::fmt;
use std::fmt::Debug;
use std::io;
use std::io::Read;
use std::str::FromStr;

/// Payload streams are hashed in chunks of this size.
const READ_CHUNK_SIZE: usize = 16 * 1024;

/// Algorithms supported by the flexible checksum header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    /// SHA-256.
    Sha256,
    /// SHA-1.
    Sha1,
    /// CRC-32 (IEEE 802.3).
    Crc32,
    /// CRC-32C (Castagnoli).
    Crc32c,
    /// MD5.
    Md5,
}

impl ChecksumAlgorithm {
    /// Name used in headers and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "SHA256",
            Self::Sha1 => "SHA1",
            Self::Crc32 => "CRC32",
            Self::Crc32c => "CRC32C",
            Self::Md5 => "MD5",
        }
    }

    /// Default header carrying this checksum, e.g. `x-amz-checksum-crc32`.
    pub fn header_name(&self) -> String {
        format!(
            "{X_AMZ_CHECKSUM_PREFIX}{}",
            self.as_str().to_ascii_lowercase()
        )
    }

    /// Start a new checksum computation.
    pub fn checksum(&self) -> SdkChecksum {
        let state = match self {
            Self::Sha256 => ChecksumState::Sha256(Sha256::new()),
            Self::Sha1 => ChecksumState::Sha1(sha1::Sha1::new()),
            Self::Crc32 => ChecksumState::Crc32(crc32fast::Hasher::new()),
            Self::Crc32c => ChecksumState::Crc32c(0),
            Self::Md5 => ChecksumState::Md5(md5::Md5::new()),
        };
        SdkChecksum {
            algorithm: *self,
            state,
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SHA256" => Ok(Self::Sha256),
            "SHA1" => Ok(Self::Sha1),
            "CRC32" => Ok(Self::Crc32),
            "CRC32C" => Ok(Self::Crc32c),
            "MD5" => Ok(Self::Md5),
            _ => Err(Error::config_invalid(format!(
                "unknown checksum algorithm: {s}"
            ))),
        }
    }
}

#[derive(Clone)]
enum ChecksumState {
    Sha256(Sha256),
    Sha1(sha1::Sha1),
    Crc32(crc32fast::Hasher),
    Crc32c(u32),
    Md5(md5::Md5),
}

/// A running flexible checksum.
#[derive(Clone)]
pub struct SdkChecksum {
    algorithm: ChecksumAlgorithm,
    state: ChecksumState,
}

impl SdkChecksum {
    /// Algorithm of this checksum.
    pub fn algorithm(&self) -> ChecksumAlgorithm {
        self.algorithm
    }

    /// Feed more bytes.
    pub fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            ChecksumState::Sha256(h) => h.update(data),
            ChecksumState::Sha1(h) => h.update(data),
            ChecksumState::Crc32(h) => h.update(data),
            ChecksumState::Crc32c(v) => *v = crc32c::crc32c_append(*v, data),
            ChecksumState::Md5(h) => h.update(data),
        }
    }

    /// Checksum of everything fed so far.
    ///
    /// CRC values are returned big-endian.
    pub fn checksum_bytes(&self) -> Vec<u8> {
        match &self.state {
            ChecksumState::Sha256(h) => h.clone().finalize().to_vec(),
            ChecksumState::Sha1(h) => h.clone().finalize().to_vec(),
            ChecksumState::Crc32(h) => h.clone().finalize().to_be_bytes().to_vec(),
            ChecksumState::Crc32c(v) => v.to_be_bytes().to_vec(),
            ChecksumState::Md5(h) => h.clone().finalize().to_vec(),
        }
    }

    /// Base64 encoded checksum, as sent in the checksum header.
    pub fn base64(&self) -> String {
        base64_encode(&self.checksum_bytes())
    }
}

impl Debug for SdkChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkChecksum")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// The hex SHA-256 content hash of a payload, paired with the flexible
/// checksum computed alongside it.
#[derive(Debug, Clone)]
pub struct ContentChecksum {
    /// Hex encoded content hash, or a sentinel such as `UNSIGNED-PAYLOAD`.
    pub content_hash: String,
    /// Flexible checksum, if one was requested.
    pub checksum: Option<SdkChecksum>,
}

/// Hash a blocking payload.
///
/// A fresh stream is opened from the provider on every call. A missing
/// payload hashes as the empty string.
pub fn compute_sync(
    payload: Option<&SyncPayload>,
    mut checksum: Option<SdkChecksum>,
) -> Result<ContentChecksum> {
    let mut hasher = Sha256::new();

    if let Some(payload) = payload {
        let mut stream = payload.new_stream()?;
        let mut buf = vec![0; READ_CHUNK_SIZE];
        loop {
            let n = match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    return Err(Error::payload_unreadable("failed to read payload").with_source(err))
                }
            };
            hasher.update(&buf[..n]);
            if let Some(checksum) = checksum.as_mut() {
                checksum.update(&buf[..n]);
            }
        }
    }

    Ok(ContentChecksum {
        content_hash: hex::encode(hasher.finalize()),
        checksum,
    })
}

/// Consumes a payload stream and resolves a single result slot with its
/// [`ContentChecksum`].
pub struct DigestComputingSubscriber {
    hasher: Sha256,
    checksum: Option<SdkChecksum>,
    slot: oneshot::Sender<Result<ContentChecksum>>,
}

impl DigestComputingSubscriber {
    /// Create a subscriber and the receiving end of its result slot.
    pub fn new(
        checksum: Option<SdkChecksum>,
    ) -> (Self, oneshot::Receiver<Result<ContentChecksum>>) {
        let (slot, digest) = oneshot::channel();
        let subscriber = Self {
            hasher: Sha256::new(),
            checksum,
            slot,
        };
        (subscriber, digest)
    }

    /// Feed one chunk of the payload.
    pub fn on_next(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
        if let Some(checksum) = self.checksum.as_mut() {
            checksum.update(chunk);
        }
    }

    /// The payload failed: resolve the slot with the error.
    pub fn on_error(self, err: io::Error) {
        // The receiver is gone when the caller stopped waiting.
        let _ = self.slot.send(Err(
            Error::payload_unreadable("failed to read payload stream").with_source(err)
        ));
    }

    /// The payload is complete: resolve the slot with the digest.
    pub fn on_complete(self) {
        let _ = self.slot.send(Ok(ContentChecksum {
            content_hash: hex::encode(self.hasher.finalize()),
            checksum: self.checksum,
        }));
    }

    /// Drive the subscriber over `stream` until it ends or fails.
    pub async fn consume(mut self, mut stream: BoxStream<'static, io::Result<Bytes>>) {
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(chunk) => self.on_next(&chunk),
                Err(err) => return self.on_error(err),
            }
        }
        self.on_complete()
    }
}

impl Debug for DigestComputingSubscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestComputingSubscriber")
            .field("checksum", &self.checksum)
            .finish_non_exhaustive()
    }
}

/// Hash an async payload without blocking the calling thread.
///
/// Dropping the returned future drops the payload stream with it: hashing
/// stops at the last chunk polled and no digest is produced.
///
/// Subscribing twice to a one-shot payload fails with
/// [`ErrorKind::PayloadUnreadable`](httpsign_core::ErrorKind::PayloadUnreadable).
pub async fn compute_async(
    payload: Option<&AsyncPayload>,
    checksum: Option<SdkChecksum>,
) -> Result<ContentChecksum> {
    let (subscriber, digest) = DigestComputingSubscriber::new(checksum);

    match payload {
        Some(payload) => subscriber.consume(payload.subscribe()?).await,
        None => subscriber.on_complete(),
    }

    digest
        .await
        .map_err(|_| Error::unexpected("digest subscriber dropped before completing"))?
}
