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

//! Env values read by `Config::from_env`.

pub const SMALLPICS_HOST: &str = "SMALLPICS_HOST";
pub const SMALLPICS_SECRET: &str = "SMALLPICS_SECRET";
pub const SMALLPICS_SALT: &str = "SMALLPICS_SALT";
pub const SMALLPICS_PATH_PREFIX: &str = "SMALLPICS_PATH_PREFIX";
pub const SMALLPICS_SECRET_ENCODING: &str = "SMALLPICS_SECRET_ENCODING";
pub const SMALLPICS_CANONICALIZATION: &str = "SMALLPICS_CANONICALIZATION";
pub const SMALLPICS_SIGNATURE_PARAM: &str = "SMALLPICS_SIGNATURE_PARAM";
