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

//! Typed transform parameters for image URLs.
//!
//! [`TransformOptions`] collects parameters through chained setters (or
//! [`TransformOptions::from_map`]) and serializes them into the query string
//! understood by the image service.

pub mod constants;

mod enums;
pub use enums::{
    BorderMethod, CropPosition, Filter, Fit, Flip, Format, IntoVariant, Orientation,
    WatermarkPosition,
};

mod composite;
pub use composite::{Border, Crop, FitValue};

mod value;
pub use value::OptionValue;

mod options;
pub use options::TransformOptions;

mod input;
