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

use std::fmt::{Debug, Formatter};

use smallpics_core::hash::{base64_hmac_sha256, hex_decode};
use smallpics_core::Result;

use crate::config::SecretEncoding;

/// Key material used to sign URLs.
#[derive(Clone)]
pub struct SigningKey {
    key: Vec<u8>,
    salt: Vec<u8>,
}

impl SigningKey {
    /// Create a signing key from its configured string form.
    ///
    /// Returns `ConfigInvalid` if `encoding` is hex and a value does not decode.
    pub fn new(secret: &str, salt: Option<&str>, encoding: SecretEncoding) -> Result<Self> {
        let decode = |v: &str| -> Result<Vec<u8>> {
            match encoding {
                SecretEncoding::Raw => Ok(v.as_bytes().to_vec()),
                SecretEncoding::Hex => hex_decode(v),
            }
        };

        Ok(Self {
            key: decode(secret)?,
            salt: salt.map(decode).transpose()?.unwrap_or_default(),
        })
    }

    /// Sign `content`.
    ///
    /// The signature is `base64(hmac_sha256(key, salt + content))` with `+`, `/`
    /// and `=` removed so it can be put into a query without escaping.
    pub fn sign(&self, content: &str) -> String {
        let mut sig = base64_hmac_sha256(&self.key, &self.salt, content.as_bytes());
        sig.retain(|c| !matches!(c, '+' | '/' | '='));
        sig
    }

    /// Check `signature` against the signature of `content` in constant time.
    pub fn verify(&self, content: &str, signature: &str) -> bool {
        let expected = self.sign(content);
        if expected.len() != signature.len() {
            return false;
        }

        let mut result = 0u8;
        for (x, y) in expected.bytes().zip(signature.bytes()) {
            result |= x ^ y;
        }
        result == 0
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("key", &"<redacted>")
            .field("salt", &"<redacted>")
            .finish()
    }
}
