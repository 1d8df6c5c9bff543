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

//! Value tables for enum-backed transform parameters.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use smallpics_core::{Error, Result};

/// Conversion accepted by enum-backed setters.
///
/// Setters take either the typed variant or its wire string. Strings outside
/// the closed set fail with [`ErrorKind::InvalidEnumValue`](smallpics_core::ErrorKind::InvalidEnumValue)
/// naming `field`.
pub trait IntoVariant<T> {
    /// Convert into `T`, reporting `field` on failure.
    fn into_variant(self, field: &str) -> Result<T>;
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// All variants, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value sent over the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            fn parse_for(field: &str, s: &str) -> Result<Self> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(Error::invalid_enum_value(field, s, &[$($value),+])),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_for(stringify!($name), s)
            }
        }

        impl IntoVariant<$name> for $name {
            fn into_variant(self, _: &str) -> Result<$name> {
                Ok(self)
            }
        }

        impl IntoVariant<$name> for &str {
            fn into_variant(self, field: &str) -> Result<$name> {
                $name::parse_for(field, self)
            }
        }

        impl IntoVariant<$name> for &String {
            fn into_variant(self, field: &str) -> Result<$name> {
                $name::parse_for(field, self)
            }
        }

        impl IntoVariant<$name> for String {
            fn into_variant(self, field: &str) -> Result<$name> {
                $name::parse_for(field, &self)
            }
        }
    };
}

wire_enum! {
    /// How an image is resized to the target dimensions.
    pub enum Fit {
        /// Fit within the boundaries without cropping or distorting. The service default.
        Contain => "contain",
        /// Like `Contain`, but never upscales.
        Max => "max",
        /// Fit within the boundaries and fill the remaining space with the background color.
        Fill => "fill",
        /// Like `Fill`, upscaling smaller images.
        FillMax => "fill-max",
        /// Stretch to the exact dimensions, ignoring the aspect ratio.
        Stretch => "stretch",
        /// Fill the boundaries and crop the excess. See [`CropPosition`].
        Cover => "cover",
        /// Fill the boundaries and crop around an optional focal point.
        Crop => "crop",
    }
}

wire_enum! {
    /// Which part of the image is kept by a cover fit.
    pub enum CropPosition {
        TopLeft => "cover-top-left",
        Top => "cover-top",
        TopRight => "cover-top-right",
        Left => "cover-left",
        Center => "cover-center",
        Right => "cover-right",
        BottomLeft => "cover-bottom-left",
        Bottom => "cover-bottom",
        BottomRight => "cover-bottom-right",
    }
}

impl IntoVariant<Option<CropPosition>> for Option<CropPosition> {
    fn into_variant(self, _: &str) -> Result<Option<CropPosition>> {
        Ok(self)
    }
}

impl IntoVariant<Option<CropPosition>> for CropPosition {
    fn into_variant(self, _: &str) -> Result<Option<CropPosition>> {
        Ok(Some(self))
    }
}

impl IntoVariant<Option<CropPosition>> for &str {
    fn into_variant(self, field: &str) -> Result<Option<CropPosition>> {
        CropPosition::parse_for(field, self).map(Some)
    }
}

impl IntoVariant<Option<CropPosition>> for String {
    fn into_variant(self, field: &str) -> Result<Option<CropPosition>> {
        CropPosition::parse_for(field, &self).map(Some)
    }
}

wire_enum! {
    /// How a border is applied.
    pub enum BorderMethod {
        Overlay => "overlay",
        Shrink => "shrink",
        Pad => "pad",
    }
}

wire_enum! {
    /// Output encoding.
    pub enum Format {
        Jpg => "jpg",
        /// Progressive jpeg.
        Pjpg => "pjpg",
        Png => "png",
        Gif => "gif",
        Webp => "webp",
        Avif => "avif",
    }
}

wire_enum! {
    /// Where a watermark is anchored.
    pub enum WatermarkPosition {
        TopLeft => "top-left",
        Top => "top",
        TopRight => "top-right",
        Left => "left",
        Center => "center",
        Right => "right",
        BottomLeft => "bottom-left",
        Bottom => "bottom",
        BottomRight => "bottom-right",
    }
}

wire_enum! {
    /// Mirror axis.
    pub enum Flip {
        Vertical => "v",
        Horizontal => "h",
        Both => "both",
    }
}

/// Rotation applied before any other transform.
///
/// Angles are passed through as given; the service expects 0, 90, 180 or 270.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Rotate according to the EXIF orientation.
    Auto,
    /// Rotate by the given number of degrees.
    Angle(i64),
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Auto => f.write_str("auto"),
            Orientation::Angle(v) => write!(f, "{v}"),
        }
    }
}

impl Orientation {
    fn parse_for(field: &str, s: &str) -> Result<Self> {
        if s == "auto" {
            return Ok(Orientation::Auto);
        }
        s.parse::<i64>()
            .map(Orientation::Angle)
            .map_err(|_| Error::invalid_enum_value(field, s, &["auto", "0", "90", "180", "270"]))
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_for("Orientation", s)
    }
}

impl IntoVariant<Orientation> for Orientation {
    fn into_variant(self, _: &str) -> Result<Orientation> {
        Ok(self)
    }
}

impl IntoVariant<Orientation> for i32 {
    fn into_variant(self, _: &str) -> Result<Orientation> {
        Ok(Orientation::Angle(self.into()))
    }
}

impl IntoVariant<Orientation> for i64 {
    fn into_variant(self, _: &str) -> Result<Orientation> {
        Ok(Orientation::Angle(self))
    }
}

impl IntoVariant<Orientation> for &str {
    fn into_variant(self, field: &str) -> Result<Orientation> {
        Orientation::parse_for(field, self)
    }
}

/// An image filter identifier such as `grayscale`.
///
/// The set of filters is open: any identifier is forwarded to the service as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter(Cow<'static, str>);

impl Filter {
    pub const GRAYSCALE: Filter = Filter(Cow::Borrowed("grayscale"));
    pub const SEPIA: Filter = Filter(Cow::Borrowed("sepia"));

    /// Create a filter from any identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Filter(Cow::Owned(name.into()))
    }

    /// The value sent over the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Filter::new(value)
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        Filter::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallpics_core::ErrorKind;
    use test_case::test_case;

    #[test]
    fn test_wire_values() {
        let fits: Vec<_> = Fit::ALL.iter().map(|v| v.as_str()).collect();
        assert_eq!(
            fits,
            ["contain", "max", "fill", "fill-max", "stretch", "cover", "crop"]
        );
        assert_eq!(CropPosition::ALL.len(), 9);
        assert!(CropPosition::ALL
            .iter()
            .all(|v| v.as_str().starts_with("cover-")));
        assert_eq!(CropPosition::Center.as_str(), "cover-center");
        assert_eq!(Format::Pjpg.to_string(), "pjpg");
        assert_eq!(BorderMethod::ALL.len(), 3);
    }

    #[test_case("webp", Format::Webp)]
    #[test_case("avif", Format::Avif)]
    #[test_case("jpg", Format::Jpg)]
    fn test_parse_format(input: &str, expected: Format) {
        assert_eq!(input.parse::<Format>().unwrap(), expected);
    }

    #[test]
    fn test_reject_unknown_value() {
        let err = IntoVariant::<Format>::into_variant("bogus", "format").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEnumValue);
        assert!(err.to_string().contains("format"));
        assert!(err.to_string().contains("jpg, pjpg, png, gif, webp, avif"));

        // Values are case sensitive.
        assert!("WEBP".parse::<Format>().is_err());
        assert!("Cover-Center".parse::<CropPosition>().is_err());
    }

    #[test_case("auto", Orientation::Auto)]
    #[test_case("90", Orientation::Angle(90))]
    #[test_case("270", Orientation::Angle(270))]
    fn test_parse_orientation(input: &str, expected: Orientation) {
        assert_eq!(input.parse::<Orientation>().unwrap(), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn test_optional_crop_position() {
        let position: Option<CropPosition> = "cover-top".into_variant("crop position").unwrap();
        assert_eq!(position, Some(CropPosition::Top));
        let position: Option<CropPosition> = None.into_variant("crop position").unwrap();
        assert_eq!(position, None);

        let err = IntoVariant::<Option<CropPosition>>::into_variant("top", "crop position")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEnumValue);
        assert!(err.to_string().contains("crop position"));
    }

    #[test]
    fn test_filter_is_open() {
        assert_eq!(Filter::from("grayscale"), Filter::GRAYSCALE);
        assert_eq!(Filter::new("duotone").as_str(), "duotone");
    }
}
