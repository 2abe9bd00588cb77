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

//! Request payload providers.
//!
//! Signers that hash the body need to read it without stealing it from the
//! transport. Blocking bodies are modelled as [`ContentStreamProvider`],
//! which opens a fresh reader on every call, so a retried request hashes
//! the same bytes again. Async bodies are [`AsyncContentProvider`]s, which
//! hand out a stream of chunks per subscription.

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::Stream;
use futures::StreamExt;
use std::fmt;
use std::fmt::Debug;
use std::io;
use std::io::Read;
use std::sync::Arc;
use std::sync::Mutex;

/// Blocking payload that can be read any number of times.
pub trait ContentStreamProvider: Debug + Send + Sync + 'static {
    /// Open a new reader positioned at the start of the payload.
    fn new_stream(&self) -> io::Result<Box<dyn Read + Send>>;
}

/// Shared blocking payload.
pub type SyncPayload = Arc<dyn ContentStreamProvider>;

impl ContentStreamProvider for Bytes {
    fn new_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(io::Cursor::new(self.clone())))
    }
}

impl ContentStreamProvider for Vec<u8> {
    fn new_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(io::Cursor::new(self.clone())))
    }
}

impl ContentStreamProvider for String {
    fn new_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(io::Cursor::new(self.clone().into_bytes())))
    }
}

impl ContentStreamProvider for &'static [u8] {
    fn new_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(*self))
    }
}

/// Payload opened by calling a closure, e.g. reopening a file.
pub struct FnContentStreamProvider<F> {
    open: F,
}

impl<F, R> FnContentStreamProvider<F>
where
    F: Fn() -> io::Result<R> + Send + Sync + 'static,
    R: Read + Send + 'static,
{
    /// Wrap `open`, which must return a fresh reader on every call.
    pub fn new(open: F) -> Self {
        Self { open }
    }
}

impl<F> Debug for FnContentStreamProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnContentStreamProvider").finish_non_exhaustive()
    }
}

impl<F, R> ContentStreamProvider for FnContentStreamProvider<F>
where
    F: Fn() -> io::Result<R> + Send + Sync + 'static,
    R: Read + Send + 'static,
{
    fn new_stream(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new((self.open)()?))
    }
}

/// Async payload delivered as a stream of byte chunks.
pub trait AsyncContentProvider: Debug + Send + Sync + 'static {
    /// Subscribe to the payload.
    ///
    /// Replayable providers return a new stream on every call; one-shot
    /// providers fail every call after the first.
    fn subscribe(&self) -> io::Result<BoxStream<'static, io::Result<Bytes>>>;
}

/// Shared async payload.
pub type AsyncPayload = Arc<dyn AsyncContentProvider>;

impl AsyncContentProvider for Bytes {
    fn subscribe(&self) -> io::Result<BoxStream<'static, io::Result<Bytes>>> {
        Ok(futures::stream::once(futures::future::ready(Ok(self.clone()))).boxed())
    }
}

impl AsyncContentProvider for Vec<Bytes> {
    fn subscribe(&self) -> io::Result<BoxStream<'static, io::Result<Bytes>>> {
        Ok(futures::stream::iter(self.clone().into_iter().map(Ok)).boxed())
    }
}

/// Async payload backed by a stream that can only be consumed once.
pub struct SingleSubscriberPayload {
    stream: Mutex<Option<BoxStream<'static, io::Result<Bytes>>>>,
}

impl SingleSubscriberPayload {
    /// Wrap a one-shot stream.
    pub fn new(stream: impl Stream<Item = io::Result<Bytes>> + Send + 'static) -> Self {
        Self {
            stream: Mutex::new(Some(stream.boxed())),
        }
    }

    /// Whether the stream has been handed out already.
    pub fn is_subscribed(&self) -> bool {
        self.stream.lock().map(|v| v.is_none()).unwrap_or(true)
    }
}

impl Debug for SingleSubscriberPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleSubscriberPayload")
            .field("subscribed", &self.is_subscribed())
            .finish()
    }
}

impl AsyncContentProvider for SingleSubscriberPayload {
    fn subscribe(&self) -> io::Result<BoxStream<'static, io::Result<Bytes>>> {
        let mut stream = self
            .stream
            .lock()
            .map_err(|_| io::Error::other("payload lock poisoned"))?;

        stream
            .take()
            .ok_or_else(|| io::Error::other("payload only supports a single subscriber"))
    }
}
