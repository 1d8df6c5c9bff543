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

//! Build and sign image transform URLs.
//!
//! ## Example
//!
//! ```
//! use smallpics_options::TransformOptions;
//! use smallpics_signer::{Config, UrlSigner};
//!
//! # fn main() -> smallpics_core::Result<()> {
//! let signer = UrlSigner::new(
//!     Config::new()
//!         .with_host("https://images.example.com")
//!         .with_secret("my-secret-value"),
//! )?;
//!
//! let mut options = TransformOptions::new();
//! options.set_width(300).set_height(400);
//!
//! let url = signer.build_url("images/image.jpg", Some(&options))?;
//! assert_eq!(
//!     url,
//!     "https://images.example.com/images/image.jpg?h=400&w=300&s=zUweQjgXXIPf89xQ6ZwWKiR6oaKLrb8uY3NZWQz7xCY"
//! );
//! assert!(signer.verify_url(&url)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
pub use config::{Canonicalization, Config, SecretEncoding, SignatureParam};

mod key;
pub use key::SigningKey;

mod signer;
pub use signer::UrlSigner;

mod canonical;

pub mod constants;
