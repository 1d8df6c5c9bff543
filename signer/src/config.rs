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

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use log::warn;
use serde::Deserialize;
use smallpics_core::{utils::Redact, Context, Error, Result};

use super::constants::*;

/// How the secret and salt strings are turned into bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    /// Use the UTF-8 bytes of the string.
    #[default]
    Raw,
    /// Decode the string as hex.
    Hex,
}

/// Which string is fed to the HMAC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Canonicalization {
    /// Sign the unsigned URL exactly as it was assembled.
    #[serde(rename = "raw")]
    RawConcatenation,
    /// Sign the percent-decoded URL with its query sorted by key.
    #[default]
    #[serde(rename = "sorted")]
    SortedDecodedCanonical,
}

/// Name of the query parameter carrying the signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureParam {
    /// `s`
    #[default]
    S,
    /// `signature`
    Signature,
}

impl SecretEncoding {
    /// The value used in env and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretEncoding::Raw => "raw",
            SecretEncoding::Hex => "hex",
        }
    }
}

impl Canonicalization {
    /// The value used in env and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Canonicalization::RawConcatenation => "raw",
            Canonicalization::SortedDecodedCanonical => "sorted",
        }
    }
}

impl SignatureParam {
    /// The query key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureParam::S => "s",
            SignatureParam::Signature => "signature",
        }
    }
}

macro_rules! config_value {
    ($name:ident, $field:literal, [$($variant:ident),+]) => {
        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                $(
                    if s == $name::$variant.as_str() {
                        return Ok($name::$variant);
                    }
                )+
                Err(Error::config_invalid(format!(
                    "\"{s}\" is not a valid {}, expected one of: {}",
                    $field,
                    [$($name::$variant.as_str()),+].join(", ")
                )))
            }
        }
    };
}

config_value!(SecretEncoding, "secret encoding", [Raw, Hex]);
config_value!(
    Canonicalization,
    "canonicalization",
    [RawConcatenation, SortedDecodedCanonical]
);
config_value!(SignatureParam, "signature param", [S, Signature]);

/// Config carries all the configuration of a [`UrlSigner`](crate::UrlSigner).
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SMALLPICS_HOST`]
    ///
    /// A host is required, for example `https://images.example.com`.
    pub host: Option<String>,
    /// `secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SMALLPICS_SECRET`]
    ///
    /// URLs are left unsigned without a secret.
    pub secret: Option<String>,
    /// `salt` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SMALLPICS_SALT`]
    pub salt: Option<String>,
    /// `path_prefix` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SMALLPICS_PATH_PREFIX`]
    pub path_prefix: Option<String>,
    /// `secret_encoding` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SMALLPICS_SECRET_ENCODING`]
    /// - [`SecretEncoding::Raw`]
    pub secret_encoding: Option<SecretEncoding>,
    /// `canonicalization` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SMALLPICS_CANONICALIZATION`]
    /// - [`Canonicalization::SortedDecodedCanonical`]
    pub canonicalization: Option<Canonicalization>,
    /// `signature_param` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SMALLPICS_SIGNATURE_PARAM`]
    /// - [`SignatureParam::S`]
    pub signature_param: Option<SignatureParam>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set salt
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    /// Set path_prefix
    pub fn with_path_prefix(mut self, path_prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(path_prefix.into());
        self
    }

    /// Set secret_encoding
    pub fn with_secret_encoding(mut self, encoding: SecretEncoding) -> Self {
        self.secret_encoding = Some(encoding);
        self
    }

    /// Set canonicalization
    pub fn with_canonicalization(mut self, canonicalization: Canonicalization) -> Self {
        self.canonicalization = Some(canonicalization);
        self
    }

    /// Set signature_param
    pub fn with_signature_param(mut self, param: SignatureParam) -> Self {
        self.signature_param = Some(param);
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set are kept. Invalid enum values are
    /// ignored with a warning.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(SMALLPICS_HOST) {
            self.host.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SMALLPICS_SECRET) {
            self.secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SMALLPICS_SALT) {
            self.salt.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SMALLPICS_PATH_PREFIX) {
            self.path_prefix.get_or_insert(v);
        }
        if self.secret_encoding.is_none() {
            self.secret_encoding = env_value(ctx, SMALLPICS_SECRET_ENCODING);
        }
        if self.canonicalization.is_none() {
            self.canonicalization = env_value(ctx, SMALLPICS_CANONICALIZATION);
        }
        if self.signature_param.is_none() {
            self.signature_param = env_value(ctx, SMALLPICS_SIGNATURE_PARAM);
        }

        self
    }
}

fn env_value<T: FromStr<Err = Error>>(ctx: &Context, key: &str) -> Option<T> {
    let v = ctx.env_var(key)?;
    match v.parse() {
        Ok(v) => Some(v),
        Err(err) => {
            warn!("ignoring env {key}: {err}");
            None
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("secret", &self.secret.as_ref().map(Redact::from))
            .field("salt", &self.salt.as_ref().map(Redact::from))
            .field("path_prefix", &self.path_prefix)
            .field("secret_encoding", &self.secret_encoding)
            .field("canonicalization", &self.canonicalization)
            .field("signature_param", &self.signature_param)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallpics_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    fn env_ctx(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter(
                envs.iter()
                    .map(|(k, v)| (k.to_string(), v.to_string())),
            ),
        })
    }

    #[test]
    fn test_from_env() {
        let ctx = env_ctx(&[
            (SMALLPICS_HOST, "https://images.example.com"),
            (SMALLPICS_SECRET, "my-secret-value"),
            (SMALLPICS_SALT, "73616c74"),
            (SMALLPICS_PATH_PREFIX, "t"),
            (SMALLPICS_SECRET_ENCODING, "hex"),
            (SMALLPICS_CANONICALIZATION, "raw"),
            (SMALLPICS_SIGNATURE_PARAM, "signature"),
        ]);

        let cfg = Config::new().from_env(&ctx);
        assert_eq!(cfg.host.as_deref(), Some("https://images.example.com"));
        assert_eq!(cfg.secret.as_deref(), Some("my-secret-value"));
        assert_eq!(cfg.salt.as_deref(), Some("73616c74"));
        assert_eq!(cfg.path_prefix.as_deref(), Some("t"));
        assert_eq!(cfg.secret_encoding, Some(SecretEncoding::Hex));
        assert_eq!(
            cfg.canonicalization,
            Some(Canonicalization::RawConcatenation)
        );
        assert_eq!(cfg.signature_param, Some(SignatureParam::Signature));
    }

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let ctx = env_ctx(&[
            (SMALLPICS_HOST, "https://env.example.com"),
            (SMALLPICS_SIGNATURE_PARAM, "signature"),
        ]);

        let cfg = Config::new()
            .with_host("https://images.example.com")
            .with_signature_param(SignatureParam::S)
            .from_env(&ctx);
        assert_eq!(cfg.host.as_deref(), Some("https://images.example.com"));
        assert_eq!(cfg.signature_param, Some(SignatureParam::S));
    }

    #[test]
    fn test_from_env_ignores_invalid_values() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = env_ctx(&[
            (SMALLPICS_SECRET_ENCODING, "base64"),
            (SMALLPICS_CANONICALIZATION, "Sorted"),
        ]);

        let cfg = Config::new().from_env(&ctx);
        assert_eq!(cfg.secret_encoding, None);
        assert_eq!(cfg.canonicalization, None);
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(
            "sorted".parse::<Canonicalization>().unwrap(),
            Canonicalization::SortedDecodedCanonical
        );
        assert_eq!(SignatureParam::Signature.to_string(), "signature");

        let err = "md5".parse::<SecretEncoding>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.to_string().contains("raw, hex"));
    }

    #[test]
    fn test_deserialize() {
        let cfg: Config = toml::from_str(
            r#"
host = "https://images.example.com"
secret = "my-secret-value"
canonicalization = "raw"
signature_param = "signature"
"#,
        )
        .unwrap();
        assert_eq!(cfg.host.as_deref(), Some("https://images.example.com"));
        assert_eq!(
            cfg.canonicalization,
            Some(Canonicalization::RawConcatenation)
        );
        assert_eq!(cfg.signature_param, Some(SignatureParam::Signature));
        assert_eq!(cfg.salt, None);

        let cfg: Config = serde_json::from_str(r#"{"secret_encoding": "hex"}"#).unwrap();
        assert_eq!(cfg.secret_encoding, Some(SecretEncoding::Hex));
        assert_eq!(cfg.host, None);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cfg = Config::new()
            .with_host("https://images.example.com")
            .with_secret("my-secret-value")
            .with_salt("pepper");

        let s = format!("{cfg:?}");
        assert!(s.contains("https://images.example.com"));
        assert!(!s.contains("my-secret-value"));
        assert!(s.contains("my-***lue"));
        assert!(!s.contains("pepper"));
    }
}
