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

//! Open-ended, typed signer properties.
//!
//! Signers accept a [`SignerProperties`] bag alongside every request. Keys
//! are [`SignerProperty`] constants that carry the value type, so the bag is
//! loosely typed as a whole but every lookup is checked.

use crate::{Error, Result};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

/// A typed key into [`SignerProperties`].
pub struct SignerProperty<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SignerProperty<T> {
    /// Declare a property key.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// Name of this property.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for SignerProperty<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SignerProperty<T> {}

impl<T> Debug for SignerProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignerProperty({})", self.name)
    }
}

/// A bag of signer properties.
///
/// Cloning is cheap: values are reference counted.
#[derive(Clone, Default)]
pub struct SignerProperties {
    values: HashMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

impl SignerProperties {
    /// Create an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property.
    pub fn put<T: Send + Sync + 'static>(&mut self, key: SignerProperty<T>, value: T) {
        self.values.insert(key.name, Arc::new(value));
    }

    /// Builder style [`SignerProperties::put`].
    pub fn with<T: Send + Sync + 'static>(mut self, key: SignerProperty<T>, value: T) -> Self {
        self.put(key, value);
        self
    }

    /// Remove a property, returning whether it was present.
    pub fn remove<T>(&mut self, key: SignerProperty<T>) -> bool {
        self.values.remove(key.name).is_some()
    }

    /// Look up a property.
    ///
    /// Returns `None` if the key is absent or holds a value of another type.
    pub fn get<T: Send + Sync + 'static>(&self, key: SignerProperty<T>) -> Option<&T> {
        self.values.get(key.name)?.downcast_ref::<T>()
    }

    /// Look up a property that must be present.
    pub fn get_required<T: Send + Sync + 'static>(&self, key: SignerProperty<T>) -> Result<&T> {
        self.get(key).ok_or_else(|| {
            Error::config_invalid(format!("required signer property {} is missing", key.name))
        })
    }

    /// Check whether a property is set.
    pub fn contains<T>(&self, key: SignerProperty<T>) -> bool {
        self.values.contains_key(key.name)
    }

    /// Copy every property of `other` into `self`; `other` wins on conflict.
    pub fn merge(mut self, other: &SignerProperties) -> Self {
        for (k, v) in &other.values {
            self.values.insert(*k, v.clone());
        }
        self
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Debug for SignerProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.values.keys().collect();
        keys.sort_unstable();
        f.debug_struct("SignerProperties")
            .field("keys", &keys)
            .finish()
    }
}
