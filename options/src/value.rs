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

use std::fmt;

/// A serialized transform parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Integer parameter.
    Int(i64),
    /// Float parameter, rendered with the shortest round-trip representation.
    Float(f64),
    /// String parameter, including enum values and composite encodings.
    Str(String),
}

impl OptionValue {
    /// Read as integer. Strings holding an integer are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Int(v) => Some(*v),
            OptionValue::Float(_) => None,
            OptionValue::Str(s) => s.parse().ok(),
        }
    }

    /// Read as float. Integers and numeric strings are accepted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Int(v) => Some(*v as f64),
            OptionValue::Float(v) => Some(*v),
            OptionValue::Str(s) => s.parse().ok(),
        }
    }

    /// Read as string. Only string values are returned.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Int(v) => write!(f, "{v}"),
            OptionValue::Float(v) => write!(f, "{v}"),
            OptionValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}
