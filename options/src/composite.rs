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

//! Parameters made of several values folded into one query value.
//!
//! Fixed-arity tuples are joined with `,` and variable-arity ones with `-`.

use std::str::FromStr;

use smallpics_core::{Error, Result};

use crate::enums::{BorderMethod, CropPosition, Fit};

/// Fit policy together with its optional arguments.
///
/// ## Format
///
/// ```text
/// crop[-<focal x>-<focal y>][-<zoom>]    crop fit
/// cover-<position>                       cover fit, position defaults to center
/// <fit>                                  any other fit
/// ```
///
/// The trailing integers of a crop fit are read by position. A crop fit with
/// only a zoom encodes as `crop-<zoom>` and reads back as a focal x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitValue {
    /// `Fit::Crop`, optionally around a focal point and zoomed.
    Crop {
        /// Focal point x.
        focal_x: Option<i64>,
        /// Focal point y.
        focal_y: Option<i64>,
        /// Zoom factor.
        zoom: Option<i64>,
    },
    /// `Fit::Cover` anchored at a crop position.
    Cover(CropPosition),
    /// Any fit without arguments.
    Plain(Fit),
}

impl FitValue {
    /// Build a fit value, dropping the arguments that do not apply to `fit`.
    ///
    /// The crop position only applies to cover fits, focal point and zoom only to crop fits.
    pub fn new(
        fit: Fit,
        crop_position: Option<CropPosition>,
        focal_point: Option<(i64, i64)>,
        zoom: Option<i64>,
    ) -> Self {
        match fit {
            Fit::Crop => FitValue::Crop {
                focal_x: focal_point.map(|(x, _)| x),
                focal_y: focal_point.map(|(_, y)| y),
                zoom,
            },
            Fit::Cover => FitValue::Cover(crop_position.unwrap_or(CropPosition::Center)),
            fit => FitValue::Plain(fit),
        }
    }

    /// The fit policy.
    pub fn fit(&self) -> Fit {
        match self {
            FitValue::Crop { .. } => Fit::Crop,
            FitValue::Cover(_) => Fit::Cover,
            FitValue::Plain(fit) => *fit,
        }
    }

    /// The crop position of a cover fit.
    pub fn crop_position(&self) -> Option<CropPosition> {
        match self {
            FitValue::Cover(position) => Some(*position),
            _ => None,
        }
    }

    /// The focal point of a crop fit, when both coordinates are known.
    pub fn focal_point(&self) -> Option<(i64, i64)> {
        match self {
            FitValue::Crop {
                focal_x, focal_y, ..
            } => focal_x.zip(*focal_y),
            _ => None,
        }
    }

    /// The zoom of a crop fit.
    pub fn zoom(&self) -> Option<i64> {
        match self {
            FitValue::Crop { zoom, .. } => *zoom,
            _ => None,
        }
    }

    /// Encode into the query value.
    pub fn encode(&self) -> String {
        match self {
            FitValue::Crop {
                focal_x,
                focal_y,
                zoom,
            } => {
                let mut s = Fit::Crop.as_str().to_string();
                if let Some((x, y)) = focal_x.zip(*focal_y) {
                    s.push_str(&format!("-{x}-{y}"));
                }
                if let Some(zoom) = zoom {
                    s.push_str(&format!("-{zoom}"));
                }
                s
            }
            FitValue::Cover(position) => position.as_str().to_string(),
            FitValue::Plain(fit) => fit.as_str().to_string(),
        }
    }

    /// Decode a query value.
    ///
    /// Crop arguments are read as focal x, focal y and zoom in that order,
    /// missing ones are `None`. A `-` directly after a separator is the sign
    /// of the next integer, so `crop--10-20` has a focal x of -10.
    pub fn decode(value: &str) -> Result<Self> {
        if let Some(rest) = value.strip_prefix(Fit::Crop.as_str()) {
            let args = match rest {
                "" => Vec::new(),
                _ => match rest.strip_prefix('-') {
                    Some(rest) => parse_signed_ints("fit", value, rest)?,
                    None => {
                        return Err(Error::malformed_composite_value(format!(
                            "fit value \"{value}\" is not a crop fit"
                        )))
                    }
                },
            };
            if args.len() > 3 {
                return Err(Error::malformed_composite_value(format!(
                    "fit value \"{value}\" has too many arguments"
                )));
            }

            let mut args = args.into_iter();
            return Ok(FitValue::Crop {
                focal_x: args.next(),
                focal_y: args.next(),
                zoom: args.next(),
            });
        }

        if let Ok(position) = CropPosition::from_str(value) {
            return Ok(FitValue::Cover(position));
        }

        match Fit::from_str(value) {
            Ok(fit) => Ok(FitValue::new(fit, None, None, None)),
            Err(err) => Err(Error::malformed_composite_value(format!(
                "fit value \"{value}\" is not a known fit"
            ))
            .with_source(err)),
        }
    }
}

impl From<Fit> for FitValue {
    fn from(fit: Fit) -> Self {
        FitValue::new(fit, None, None, None)
    }
}

/// Source rectangle cut out before resizing, encoded as `w,h,x,y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crop {
    pub width: i64,
    pub height: i64,
    pub x: i64,
    pub y: i64,
}

impl Crop {
    /// Create a new crop rectangle.
    pub fn new(width: i64, height: i64, x: i64, y: i64) -> Self {
        Self {
            width,
            height,
            x,
            y,
        }
    }

    /// Encode into the query value.
    pub fn encode(&self) -> String {
        format!("{},{},{},{}", self.width, self.height, self.x, self.y)
    }

    /// Decode a query value.
    pub fn decode(value: &str) -> Result<Self> {
        let parts = value
            .split(',')
            .map(|v| parse_int("crop", value, v))
            .collect::<Result<Vec<_>>>()?;

        match parts.as_slice() {
            [width, height, x, y] => Ok(Crop::new(*width, *height, *x, *y)),
            _ => Err(Error::malformed_composite_value(format!(
                "crop value \"{value}\" must have 4 fields, got {}",
                parts.len()
            ))),
        }
    }
}

impl From<Crop> for [i64; 4] {
    fn from(crop: Crop) -> Self {
        [crop.width, crop.height, crop.x, crop.y]
    }
}

/// Border drawn around the image, encoded as `width,color,method`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    /// Pixels (`10`) or a percentage of the image width or height (`5w`, `2h`).
    pub width: String,
    /// Hex color.
    pub color: String,
    pub method: BorderMethod,
}

impl Border {
    /// Create a new border.
    pub fn new(width: impl Into<String>, color: impl Into<String>, method: BorderMethod) -> Self {
        Self {
            width: width.into(),
            color: color.into(),
            method,
        }
    }

    /// Encode into the query value.
    pub fn encode(&self) -> String {
        format!("{},{},{}", self.width, self.color, self.method)
    }

    /// Decode a query value.
    pub fn decode(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.split(',').collect();
        let [width, color, method] = parts.as_slice() else {
            return Err(Error::malformed_composite_value(format!(
                "border value \"{value}\" must have 3 fields, got {}",
                parts.len()
            )));
        };

        let method = BorderMethod::from_str(method).map_err(|err| {
            Error::malformed_composite_value(format!(
                "border value \"{value}\" has an unknown method"
            ))
            .with_source(err)
        })?;

        Ok(Border::new(*width, *color, method))
    }
}

/// Parse `-` separated integers where an empty part negates the next one.
fn parse_signed_ints(field: &str, value: &str, parts: &str) -> Result<Vec<i64>> {
    let mut ints = Vec::new();
    let mut negative = false;
    for part in parts.split('-') {
        if part.is_empty() && !negative {
            negative = true;
            continue;
        }
        let int = parse_int(field, value, part)?;
        ints.push(if negative { -int } else { int });
        negative = false;
    }
    if negative {
        return Err(Error::malformed_composite_value(format!(
            "{field} value \"{value}\" ends with a separator"
        )));
    }
    Ok(ints)
}

fn parse_int(field: &str, value: &str, part: &str) -> Result<i64> {
    part.parse().map_err(|_| {
        Error::malformed_composite_value(format!(
            "{field} value \"{value}\" contains non-integer part \"{part}\""
        ))
    })
}
