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

//! Core components for building signed image transformation URLs.
//!
//! This crate provides the foundational types shared by the smallpics crates.
//!
//! ## Overview
//!
//! - **Error**: a single error type whose [`ErrorKind`] tells callers what went wrong
//! - **Context**: a container that holds the environment implementation used to load configuration
//! - **Hash**: the HMAC-SHA256 and base64 primitives the URL signer is built on
//!
//! ## Example
//!
//! ```
//! use smallpics_core::{Context, StaticEnv};
//! use std::collections::HashMap;
//!
//! let ctx = Context::new().with_env(StaticEnv {
//!     envs: HashMap::from([("SMALLPICS_HOST".to_string(), "https://img.example.com".to_string())]),
//! });
//!
//! assert_eq!(
//!     ctx.env_var("SMALLPICS_HOST").as_deref(),
//!     Some("https://img.example.com")
//! );
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::NoopEnv;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};
