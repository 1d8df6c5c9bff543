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

use log::debug;
use smallpics_core::{Error, Result};
use smallpics_options::TransformOptions;

use crate::canonical::CanonicalUrl;
use crate::config::{Canonicalization, Config, SignatureParam};
use crate::key::SigningKey;

/// UrlSigner builds image transform URLs and signs them when a secret is configured.
///
/// A signer holds no mutable state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct UrlSigner {
    host: String,
    path_prefix: String,
    key: Option<SigningKey>,
    canonicalization: Canonicalization,
    signature_param: SignatureParam,
}

impl UrlSigner {
    /// Create a signer from config.
    ///
    /// Returns `ConfigInvalid` if the host is missing or a hex encoded secret
    /// or salt can't be decoded.
    pub fn new(config: Config) -> Result<Self> {
        let host = config
            .host
            .as_deref()
            .map(|v| v.trim_end_matches('/'))
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("host is required"))?
            .to_string();

        let key = match config.secret.as_deref() {
            Some(secret) => Some(SigningKey::new(
                secret,
                config.salt.as_deref(),
                config.secret_encoding.unwrap_or_default(),
            )?),
            None => None,
        };

        Ok(Self {
            host,
            path_prefix: config
                .path_prefix
                .unwrap_or_default()
                .trim_matches('/')
                .to_string(),
            key,
            canonicalization: config.canonicalization.unwrap_or_default(),
            signature_param: config.signature_param.unwrap_or_default(),
        })
    }

    /// Build the URL that transforms `source` with `options`.
    ///
    /// Without a secret the unsigned URL is returned as assembled, including a
    /// bare trailing `?` when no option is set.
    pub fn build_url(&self, source: &str, options: Option<&TransformOptions>) -> Result<String> {
        let unsigned = self.unsigned_url(source, options);

        let Some(key) = &self.key else {
            return Ok(unsigned);
        };
        let param = self.signature_param.as_str();

        match self.canonicalization {
            Canonicalization::RawConcatenation => {
                debug!("string to sign: {unsigned}");
                let signature = key.sign(&unsigned);

                let sep = if unsigned.ends_with('?') { "" } else { "&" };
                Ok(format!("{unsigned}{sep}{param}={signature}"))
            }
            Canonicalization::SortedDecodedCanonical => {
                let canonical = CanonicalUrl::parse(&unsigned)?;
                let string_to_sign = canonical.string_to_sign()?;
                debug!("string to sign: {string_to_sign}");

                let signature = key.sign(&string_to_sign);
                Ok(canonical.to_signed_url(param, &signature))
            }
        }
    }

    /// Check the signature embedded in a URL built by [`UrlSigner::build_url`].
    ///
    /// Returns `Ok(false)` if the URL carries no signature or it doesn't match.
    /// Returns `ConfigInvalid` if no secret is configured.
    pub fn verify_url(&self, url: &str) -> Result<bool> {
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| Error::config_invalid("a secret is required to verify urls"))?;
        let param = self.signature_param.as_str();

        match self.canonicalization {
            Canonicalization::RawConcatenation => {
                let Some((unsigned, signature)) = split_raw_signature(url, param) else {
                    return Ok(false);
                };
                debug!("string to sign: {unsigned}");
                Ok(key.verify(unsigned, signature))
            }
            Canonicalization::SortedDecodedCanonical => {
                let canonical = CanonicalUrl::parse(url)?;
                let Some(signature) = canonical.signature(param) else {
                    return Ok(false);
                };
                let string_to_sign = canonical.string_to_sign()?;
                debug!("string to sign: {string_to_sign}");
                Ok(key.verify(&string_to_sign, signature))
            }
        }
    }

    fn unsigned_url(&self, source: &str, options: Option<&TransformOptions>) -> String {
        let source = source.trim_matches('/');
        let query = options
            .map(TransformOptions::to_canonical_string)
            .unwrap_or_default();

        if self.path_prefix.is_empty() {
            format!("{}/{source}?{query}", self.host)
        } else {
            format!("{}/{}/{source}?{query}", self.host, self.path_prefix)
        }
    }
}

/// Split `url` at its last `&param=` or `?param=`.
///
/// The returned unsigned part keeps a `?` separator, so it matches what was signed.
fn split_raw_signature<'a>(url: &'a str, param: &str) -> Option<(&'a str, &'a str)> {
    let amp = format!("&{param}=");
    let question = format!("?{param}=");

    let by_amp = url.rfind(&amp).map(|idx| (idx, idx, idx + amp.len()));
    let by_question = url
        .rfind(&question)
        .map(|idx| (idx, idx + 1, idx + question.len()));

    let (_, end, start) = match (by_amp, by_question) {
        (Some(a), Some(q)) => {
            if a.0 > q.0 {
                a
            } else {
                q
            }
        }
        (a, q) => a.or(q)?,
    };
    Some((&url[..end], &url[start..]))
}
