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

//! Query keys understood by the image service.
//!
//! These are the wire contract with the downstream service and must match byte-for-byte.

pub const ORIGIN: &str = "origin";
pub const ORIENTATION: &str = "or";
pub const FLIP: &str = "flip";
pub const CROP: &str = "crop";
pub const WIDTH: &str = "w";
pub const HEIGHT: &str = "h";
pub const FIT: &str = "fit";
pub const DEVICE_PIXEL_RATIO: &str = "dpr";
pub const BRIGHTNESS: &str = "bri";
pub const CONTRAST: &str = "con";
pub const GAMMA: &str = "gam";
pub const SHARPEN: &str = "sharp";
pub const BLUR: &str = "blur";
pub const PIXELATE: &str = "pixel";
pub const FILTER: &str = "filt";
pub const WATERMARK_PATH: &str = "mark";
pub const WATERMARK_ORIGIN: &str = "markorigin";
pub const WATERMARK_WIDTH: &str = "markw";
pub const WATERMARK_HEIGHT: &str = "markh";
pub const WATERMARK_FIT: &str = "markfit";
pub const WATERMARK_X_OFFSET: &str = "markx";
pub const WATERMARK_Y_OFFSET: &str = "marky";
pub const WATERMARK_PADDING: &str = "markpad";
pub const WATERMARK_POSITION: &str = "markpos";
pub const WATERMARK_ALPHA: &str = "markalpha";
pub const BACKGROUND: &str = "bg";
pub const BORDER: &str = "border";
pub const QUALITY: &str = "q";
pub const FORMAT: &str = "fm";
pub const INTERLACE: &str = "interlace";

/// Every key above, used to recognise keys when parsing a query string.
pub const ALL_KEYS: [&str; 30] = [
    ORIGIN,
    ORIENTATION,
    FLIP,
    CROP,
    WIDTH,
    HEIGHT,
    FIT,
    DEVICE_PIXEL_RATIO,
    BRIGHTNESS,
    CONTRAST,
    GAMMA,
    SHARPEN,
    BLUR,
    PIXELATE,
    FILTER,
    WATERMARK_PATH,
    WATERMARK_ORIGIN,
    WATERMARK_WIDTH,
    WATERMARK_HEIGHT,
    WATERMARK_FIT,
    WATERMARK_X_OFFSET,
    WATERMARK_Y_OFFSET,
    WATERMARK_PADDING,
    WATERMARK_POSITION,
    WATERMARK_ALPHA,
    BACKGROUND,
    BORDER,
    QUALITY,
    FORMAT,
    INTERLACE,
];

/// Device pixel ratio used when the ratio is requested without a value.
pub const DEFAULT_DEVICE_PIXEL_RATIO: i64 = 1;
