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

//! Bulk construction of [`TransformOptions`] from a generic key/value map.

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use smallpics_core::{Error, Result};

use crate::constants::DEFAULT_DEVICE_PIXEL_RATIO;
use crate::enums::CropPosition;
use crate::enums::IntoVariant;
use crate::options::TransformOptions;

type Setter = fn(&mut TransformOptions, &Args<'_>) -> Result<()>;

/// Setter per parameter name, in PascalCase.
///
/// Argument names are the ones accepted when a parameter is given as an object.
static SETTERS: [(&str, Setter); 30] = [
    ("Origin", |o, a| {
        o.set_origin(a.string(0, "origin")?);
        Ok(())
    }),
    ("Orientation", |o, a| {
        let orientation = a.required(0, "orientation")?;
        match orientation {
            Value::Number(_) => o.set_orientation(a.int(0, "orientation")?)?,
            _ => o.set_orientation(a.string(0, "orientation")?.as_str())?,
        };
        Ok(())
    }),
    ("Flip", |o, a| {
        o.set_flip(a.string(0, "flip")?)?;
        Ok(())
    }),
    ("Crop", |o, a| {
        o.set_crop(
            a.int(0, "width")?,
            a.int(1, "height")?,
            a.int(2, "x")?,
            a.int(3, "y")?,
        );
        Ok(())
    }),
    ("Width", |o, a| {
        o.set_width(a.int(0, "width")?);
        Ok(())
    }),
    ("Height", |o, a| {
        o.set_height(a.int(0, "height")?);
        Ok(())
    }),
    ("Fit", |o, a| {
        let (crop_position, focal_point, zoom) = a.fit_args()?;
        o.set_fit_with(a.string(0, "fit")?, crop_position, focal_point, zoom)?;
        Ok(())
    }),
    ("DevicePixelRatio", |o, a| {
        let ratio = a.optional_int(0, "devicePixelRatio")?;
        o.set_device_pixel_ratio(ratio.unwrap_or(DEFAULT_DEVICE_PIXEL_RATIO));
        Ok(())
    }),
    ("Brightness", |o, a| {
        o.set_brightness(a.int(0, "brightness")?);
        Ok(())
    }),
    ("Contrast", |o, a| {
        o.set_contrast(a.int(0, "contrast")?);
        Ok(())
    }),
    ("Gamma", |o, a| {
        o.set_gamma(a.float(0, "gamma")?);
        Ok(())
    }),
    ("Sharpen", |o, a| {
        o.set_sharpen(a.int(0, "sharpen")?);
        Ok(())
    }),
    ("Blur", |o, a| {
        o.set_blur(a.int(0, "blur")?);
        Ok(())
    }),
    ("Pixelate", |o, a| {
        o.set_pixelate(a.int(0, "pixelate")?);
        Ok(())
    }),
    ("Filter", |o, a| {
        o.set_filter(a.string(0, "filter")?);
        Ok(())
    }),
    ("WatermarkPath", |o, a| {
        o.set_watermark_path(a.string(0, "watermarkPath")?);
        Ok(())
    }),
    ("WatermarkOrigin", |o, a| {
        o.set_watermark_origin(a.string(0, "watermarkOrigin")?);
        Ok(())
    }),
    ("WatermarkWidth", |o, a| {
        o.set_watermark_width(a.int(0, "watermarkWidth")?);
        Ok(())
    }),
    ("WatermarkHeight", |o, a| {
        o.set_watermark_height(a.int(0, "watermarkHeight")?);
        Ok(())
    }),
    ("WatermarkFit", |o, a| {
        let (crop_position, focal_point, zoom) = a.fit_args()?;
        o.set_watermark_fit_with(a.string(0, "fit")?, crop_position, focal_point, zoom)?;
        Ok(())
    }),
    ("WatermarkXOffset", |o, a| {
        o.set_watermark_x_offset(a.int(0, "watermarkXOffset")?);
        Ok(())
    }),
    ("WatermarkYOffset", |o, a| {
        o.set_watermark_y_offset(a.int(0, "watermarkYOffset")?);
        Ok(())
    }),
    ("WatermarkPadding", |o, a| {
        o.set_watermark_padding(a.int(0, "watermarkPadding")?);
        Ok(())
    }),
    ("WatermarkPosition", |o, a| {
        o.set_watermark_position(a.string(0, "watermarkPosition")?)?;
        Ok(())
    }),
    ("WatermarkAlpha", |o, a| {
        o.set_watermark_alpha(a.int(0, "watermarkAlpha")?);
        Ok(())
    }),
    ("Background", |o, a| {
        o.set_background(a.string(0, "background")?);
        Ok(())
    }),
    ("Border", |o, a| {
        o.set_border(
            a.string(0, "width")?,
            a.string(1, "color")?,
            a.string(2, "borderMethod")?,
        )?;
        Ok(())
    }),
    ("Quality", |o, a| {
        o.set_quality(a.int(0, "quality")?);
        Ok(())
    }),
    ("Format", |o, a| {
        o.set_format(a.string(0, "format")?)?;
        Ok(())
    }),
    ("Interlaced", |o, a| {
        o.set_interlaced(a.bool(0, "interlaced")?);
        Ok(())
    }),
];

static SETTER_INDEX: Lazy<HashMap<&'static str, Setter>> =
    Lazy::new(|| SETTERS.iter().copied().collect());

impl TransformOptions {
    /// Build options from a generic map such as a decoded JSON object.
    ///
    /// Keys are normalized to PascalCase (`watermark_alpha`, `watermark alpha`
    /// and `watermarkAlpha` all select the watermark alpha setter) and unknown
    /// keys are ignored. Arrays are spread as positional arguments, objects
    /// as named arguments and any other value is the only argument.
    ///
    /// ```
    /// use serde_json::json;
    /// use smallpics_options::TransformOptions;
    ///
    /// # fn main() -> smallpics_core::Result<()> {
    /// let input = json!({
    ///     "width": 300,
    ///     "border": {"width": 10, "color": "000000", "borderMethod": "overlay"},
    /// });
    /// let options = TransformOptions::from_map(input.as_object().unwrap())?;
    ///
    /// assert_eq!(options.to_canonical_string(), "w=300&border=10,000000,overlay");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_map(input: &Map<String, Value>) -> Result<Self> {
        let mut options = Self::new();
        for (key, value) in input {
            let name = to_pascal_case(key);
            match SETTER_INDEX.get(name.as_str()) {
                Some(setter) => setter(&mut options, &Args(value))
                    .map_err(|err| match err.kind() {
                        smallpics_core::ErrorKind::InvalidInput => Error::invalid_input(format!(
                            "option \"{key}\": {}",
                            err.message()
                        )),
                        _ => err,
                    })?,
                None => debug!("ignore unknown option: {key}"),
            }
        }
        Ok(options)
    }

    /// Names accepted by [`from_map`](Self::from_map), in PascalCase.
    pub fn setter_names() -> impl Iterator<Item = &'static str> {
        SETTERS.iter().map(|(name, _)| *name)
    }
}

/// `snake_case` or space separated words to PascalCase.
///
/// Only the first letter of each word is upper-cased, so `watermarkAlpha`
/// becomes `WatermarkAlpha`.
fn to_pascal_case(input: &str) -> String {
    let mut s = String::with_capacity(input.len());
    let mut word_start = true;
    for c in input.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c == ' ' {
            word_start = true;
            continue;
        }
        if word_start {
            s.push(c.to_ascii_uppercase());
        } else {
            s.push(c);
        }
        word_start = c.is_ascii_whitespace();
    }
    s
}

/// Arguments of one setter call.
struct Args<'a>(&'a Value);

impl<'a> Args<'a> {
    fn get(&self, index: usize, name: &str) -> Option<&'a Value> {
        let v = match self.0 {
            Value::Array(items) => items.get(index),
            Value::Object(map) => map.get(name),
            v => (index == 0).then_some(v),
        };
        v.filter(|v| !v.is_null())
    }

    fn required(&self, index: usize, name: &str) -> Result<&'a Value> {
        self.get(index, name)
            .ok_or_else(|| Error::invalid_input(format!("missing argument \"{name}\"")))
    }

    fn optional_int(&self, index: usize, name: &str) -> Result<Option<i64>> {
        let Some(v) = self.get(index, name) else {
            return Ok(None);
        };
        let int = match v {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        };
        int.map(Some).ok_or_else(|| {
            Error::invalid_input(format!("argument \"{name}\" must be an integer, got {v}"))
        })
    }

    fn int(&self, index: usize, name: &str) -> Result<i64> {
        self.required(index, name)?;
        self.optional_int(index, name)?
            .ok_or_else(|| Error::invalid_input(format!("missing argument \"{name}\"")))
    }

    fn float(&self, index: usize, name: &str) -> Result<f64> {
        let v = self.required(index, name)?;
        let float = match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        float.ok_or_else(|| {
            Error::invalid_input(format!("argument \"{name}\" must be a number, got {v}"))
        })
    }

    fn optional_string(&self, index: usize, name: &str) -> Result<Option<String>> {
        match self.get(index, name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(v) => Err(Error::invalid_input(format!(
                "argument \"{name}\" must be a string, got {v}"
            ))),
        }
    }

    fn string(&self, index: usize, name: &str) -> Result<String> {
        self.required(index, name)?;
        self.optional_string(index, name)?
            .ok_or_else(|| Error::invalid_input(format!("missing argument \"{name}\"")))
    }

    fn bool(&self, index: usize, name: &str) -> Result<bool> {
        let v = self.required(index, name)?;
        match v {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) if n.as_i64() == Some(0) => Ok(false),
            Value::Number(n) if n.as_i64() == Some(1) => Ok(true),
            Value::String(s) if s == "1" || s == "true" => Ok(true),
            Value::String(s) if s == "0" || s == "false" || s.is_empty() => Ok(false),
            v => Err(Error::invalid_input(format!(
                "argument \"{name}\" must be a boolean, got {v}"
            ))),
        }
    }

    /// Trailing arguments shared by fit and watermark fit.
    ///
    /// A focal point is only kept when both coordinates are given.
    #[allow(clippy::type_complexity)]
    fn fit_args(&self) -> Result<(Option<CropPosition>, Option<(i64, i64)>, Option<i64>)> {
        let crop_position: Option<CropPosition> = self
            .optional_string(1, "cropPosition")?
            .map(|v| IntoVariant::<CropPosition>::into_variant(v, "crop position"))
            .transpose()?;
        let focal_x = self.optional_int(2, "focalPointX")?;
        let focal_y = self.optional_int(3, "focalPointY")?;
        let zoom = self.optional_int(4, "zoom")?;

        Ok((crop_position, focal_x.zip(focal_y), zoom))
    }
}
