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
use std::fmt::Display;

use log::debug;
use smallpics_core::Result;

use crate::composite::{Border, Crop, FitValue};
use crate::constants::*;
use crate::enums::*;
use crate::value::OptionValue;

/// Transform parameters of one image request.
///
/// Parameters are kept in the order they were first set. Setting a parameter
/// again overwrites its value in place.
///
/// ```
/// use smallpics_options::{Fit, TransformOptions};
///
/// # fn main() -> smallpics_core::Result<()> {
/// let mut options = TransformOptions::new();
/// options.set_width(300).set_height(400).set_fit(Fit::Fill)?;
///
/// assert_eq!(options.to_canonical_string(), "w=300&h=400&fit=fill");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformOptions {
    options: Vec<(&'static str, OptionValue)>,
}

impl TransformOptions {
    /// Create an empty set of options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a query string such as the output of
    /// [`to_canonical_string`](Self::to_canonical_string).
    ///
    /// Unknown keys are ignored. Values are stored as given without
    /// validation, so composite getters may report malformed values.
    pub fn from_query(query: &str) -> Self {
        let mut options = Self::new();
        for (k, v) in form_urlencoded::parse(query.as_bytes()) {
            match ALL_KEYS.iter().find(|key| **key == k) {
                Some(key) => {
                    options.insert(*key, v.into_owned());
                }
                None => debug!("ignore unknown query key: {k}"),
            }
        }
        options
    }

    /// Serialize as `key=value` pairs joined with `&`, in insertion order.
    ///
    /// Values are not percent-encoded.
    pub fn to_canonical_string(&self) -> String {
        let mut s = String::new();
        for (idx, (k, v)) in self.options.iter().enumerate() {
            if idx > 0 {
                s.push('&');
            }
            s.push_str(k);
            s.push('=');
            s.push_str(&v.to_string());
        }
        s
    }

    /// Number of parameters set.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterate over the serialized parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &OptionValue)> + '_ {
        self.options.iter().map(|(k, v)| (*k, v))
    }

    /// Get the serialized value of a query key.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    fn insert(&mut self, key: &'static str, value: impl Into<OptionValue>) -> &mut Self {
        let value = value.into();
        match self.options.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.options.push((key, value)),
        }
        self
    }

    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(OptionValue::as_i64)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_str)
    }

    fn set_base_fit(
        &mut self,
        key: &'static str,
        field: &str,
        fit: impl IntoVariant<Fit>,
        crop_position: impl IntoVariant<Option<CropPosition>>,
        focal_point: Option<(i64, i64)>,
        zoom: Option<i64>,
    ) -> Result<&mut Self> {
        let fit = fit.into_variant(field)?;
        let crop_position = crop_position.into_variant("crop position")?;
        let value = FitValue::new(fit, crop_position, focal_point, zoom);
        Ok(self.insert(key, value.encode()))
    }

    fn get_base_fit(&self, key: &str) -> Result<Option<FitValue>> {
        self.get(key)
            .map(|v| FitValue::decode(&v.to_string()))
            .transpose()
    }
}

impl TransformOptions {
    /// Set the origin the source image is fetched from.
    pub fn set_origin(&mut self, origin: impl Into<String>) -> &mut Self {
        self.insert(ORIGIN, origin.into())
    }

    /// Get origin
    pub fn origin(&self) -> Option<&str> {
        self.get_str(ORIGIN)
    }

    /// Set orientation, either `"auto"` or an angle.
    pub fn set_orientation(
        &mut self,
        orientation: impl IntoVariant<Orientation>,
    ) -> Result<&mut Self> {
        Ok(match orientation.into_variant("orientation")? {
            Orientation::Auto => self.insert(ORIENTATION, "auto"),
            Orientation::Angle(v) => self.insert(ORIENTATION, v),
        })
    }

    /// Get orientation
    pub fn orientation(&self) -> Option<Orientation> {
        self.get(ORIENTATION)
            .and_then(|v| v.to_string().parse().ok())
    }

    /// Set flip
    pub fn set_flip(&mut self, flip: impl IntoVariant<Flip>) -> Result<&mut Self> {
        let flip = flip.into_variant("flip")?;
        Ok(self.insert(FLIP, flip.as_str()))
    }

    /// Get flip
    pub fn flip(&self) -> Option<Flip> {
        self.get_str(FLIP).and_then(|v| v.parse().ok())
    }

    /// Set crop
    pub fn set_crop(&mut self, width: i64, height: i64, x: i64, y: i64) -> &mut Self {
        self.insert(CROP, Crop::new(width, height, x, y).encode())
    }

    /// Get crop
    pub fn crop(&self) -> Result<Option<Crop>> {
        self.get(CROP)
            .map(|v| Crop::decode(&v.to_string()))
            .transpose()
    }

    /// Set width
    pub fn set_width(&mut self, width: i64) -> &mut Self {
        self.insert(WIDTH, width)
    }

    /// Get width
    pub fn width(&self) -> Option<i64> {
        self.get_i64(WIDTH)
    }

    /// Set height
    pub fn set_height(&mut self, height: i64) -> &mut Self {
        self.insert(HEIGHT, height)
    }

    /// Get height
    pub fn height(&self) -> Option<i64> {
        self.get_i64(HEIGHT)
    }

    /// Set fit without arguments.
    ///
    /// A cover fit is anchored at [`CropPosition::Center`].
    pub fn set_fit(&mut self, fit: impl IntoVariant<Fit>) -> Result<&mut Self> {
        self.set_base_fit(FIT, "fit", fit, None, None, None)
    }

    /// Set fit with its arguments.
    ///
    /// `crop_position` is a [`CropPosition`], its wire string or `None` and
    /// only applies to [`Fit::Cover`]. `focal_point` and `zoom` only apply to
    /// [`Fit::Crop`]. Arguments that do not apply are dropped.
    pub fn set_fit_with(
        &mut self,
        fit: impl IntoVariant<Fit>,
        crop_position: impl IntoVariant<Option<CropPosition>>,
        focal_point: Option<(i64, i64)>,
        zoom: Option<i64>,
    ) -> Result<&mut Self> {
        self.set_base_fit(FIT, "fit", fit, crop_position, focal_point, zoom)
    }

    /// Get fit
    pub fn fit(&self) -> Result<Option<FitValue>> {
        self.get_base_fit(FIT)
    }

    /// Set device pixel ratio
    pub fn set_device_pixel_ratio(&mut self, device_pixel_ratio: i64) -> &mut Self {
        self.insert(DEVICE_PIXEL_RATIO, device_pixel_ratio)
    }

    /// Get device pixel ratio
    pub fn device_pixel_ratio(&self) -> Option<i64> {
        self.get_i64(DEVICE_PIXEL_RATIO)
    }

    /// Set brightness
    pub fn set_brightness(&mut self, brightness: i64) -> &mut Self {
        self.insert(BRIGHTNESS, brightness)
    }

    /// Get brightness
    pub fn brightness(&self) -> Option<i64> {
        self.get_i64(BRIGHTNESS)
    }

    /// Set contrast
    pub fn set_contrast(&mut self, contrast: i64) -> &mut Self {
        self.insert(CONTRAST, contrast)
    }

    /// Get contrast
    pub fn contrast(&self) -> Option<i64> {
        self.get_i64(CONTRAST)
    }

    /// Set gamma
    pub fn set_gamma(&mut self, gamma: f64) -> &mut Self {
        self.insert(GAMMA, gamma)
    }

    /// Get gamma
    pub fn gamma(&self) -> Option<f64> {
        self.get(GAMMA).and_then(OptionValue::as_f64)
    }

    /// Set sharpen
    pub fn set_sharpen(&mut self, sharpen: i64) -> &mut Self {
        self.insert(SHARPEN, sharpen)
    }

    /// Get sharpen
    pub fn sharpen(&self) -> Option<i64> {
        self.get_i64(SHARPEN)
    }

    /// Set blur
    pub fn set_blur(&mut self, blur: i64) -> &mut Self {
        self.insert(BLUR, blur)
    }

    /// Get blur
    pub fn blur(&self) -> Option<i64> {
        self.get_i64(BLUR)
    }

    /// Set pixelate
    pub fn set_pixelate(&mut self, pixelate: i64) -> &mut Self {
        self.insert(PIXELATE, pixelate)
    }

    /// Get pixelate
    pub fn pixelate(&self) -> Option<i64> {
        self.get_i64(PIXELATE)
    }

    /// Set filter
    pub fn set_filter(&mut self, filter: impl Into<Filter>) -> &mut Self {
        let filter = filter.into();
        self.insert(FILTER, filter.as_str())
    }

    /// Get filter
    pub fn filter(&self) -> Option<Filter> {
        self.get_str(FILTER)
            .filter(|v| !v.is_empty())
            .map(Filter::from)
    }

    /// Set the path or URL of the watermark image. It is sent unescaped.
    pub fn set_watermark_path(&mut self, watermark_path: impl Into<String>) -> &mut Self {
        self.insert(WATERMARK_PATH, watermark_path.into())
    }

    /// Get watermark path
    pub fn watermark_path(&self) -> Option<&str> {
        self.get_str(WATERMARK_PATH)
    }

    /// Set watermark origin
    pub fn set_watermark_origin(&mut self, watermark_origin: impl Into<String>) -> &mut Self {
        self.insert(WATERMARK_ORIGIN, watermark_origin.into())
    }

    /// Get watermark origin
    pub fn watermark_origin(&self) -> Option<&str> {
        self.get_str(WATERMARK_ORIGIN)
    }

    /// Set watermark width
    pub fn set_watermark_width(&mut self, watermark_width: i64) -> &mut Self {
        self.insert(WATERMARK_WIDTH, watermark_width)
    }

    /// Get watermark width
    pub fn watermark_width(&self) -> Option<i64> {
        self.get_i64(WATERMARK_WIDTH)
    }

    /// Set watermark height
    pub fn set_watermark_height(&mut self, watermark_height: i64) -> &mut Self {
        self.insert(WATERMARK_HEIGHT, watermark_height)
    }

    /// Get watermark height
    pub fn watermark_height(&self) -> Option<i64> {
        self.get_i64(WATERMARK_HEIGHT)
    }

    /// Set watermark fit without arguments.
    pub fn set_watermark_fit(&mut self, fit: impl IntoVariant<Fit>) -> Result<&mut Self> {
        self.set_base_fit(WATERMARK_FIT, "watermark fit", fit, None, None, None)
    }

    /// Set watermark fit with its arguments, see [`set_fit_with`](Self::set_fit_with).
    pub fn set_watermark_fit_with(
        &mut self,
        fit: impl IntoVariant<Fit>,
        crop_position: impl IntoVariant<Option<CropPosition>>,
        focal_point: Option<(i64, i64)>,
        zoom: Option<i64>,
    ) -> Result<&mut Self> {
        self.set_base_fit(
            WATERMARK_FIT,
            "watermark fit",
            fit,
            crop_position,
            focal_point,
            zoom,
        )
    }

    /// Get watermark fit
    pub fn watermark_fit(&self) -> Result<Option<FitValue>> {
        self.get_base_fit(WATERMARK_FIT)
    }

    /// Set watermark x offset
    pub fn set_watermark_x_offset(&mut self, watermark_x_offset: i64) -> &mut Self {
        self.insert(WATERMARK_X_OFFSET, watermark_x_offset)
    }

    /// Get watermark x offset
    pub fn watermark_x_offset(&self) -> Option<i64> {
        self.get_i64(WATERMARK_X_OFFSET)
    }

    /// Set watermark y offset
    pub fn set_watermark_y_offset(&mut self, watermark_y_offset: i64) -> &mut Self {
        self.insert(WATERMARK_Y_OFFSET, watermark_y_offset)
    }

    /// Get watermark y offset
    pub fn watermark_y_offset(&self) -> Option<i64> {
        self.get_i64(WATERMARK_Y_OFFSET)
    }

    /// Set watermark padding
    pub fn set_watermark_padding(&mut self, watermark_padding: i64) -> &mut Self {
        self.insert(WATERMARK_PADDING, watermark_padding)
    }

    /// Get watermark padding
    pub fn watermark_padding(&self) -> Option<i64> {
        self.get_i64(WATERMARK_PADDING)
    }

    /// Set watermark position
    pub fn set_watermark_position(
        &mut self,
        watermark_position: impl IntoVariant<WatermarkPosition>,
    ) -> Result<&mut Self> {
        let position = watermark_position.into_variant("watermark position")?;
        Ok(self.insert(WATERMARK_POSITION, position.as_str()))
    }

    /// Get watermark position
    pub fn watermark_position(&self) -> Option<WatermarkPosition> {
        self.get_str(WATERMARK_POSITION)
            .and_then(|v| v.parse().ok())
    }

    /// Set watermark alpha
    pub fn set_watermark_alpha(&mut self, watermark_alpha: i64) -> &mut Self {
        self.insert(WATERMARK_ALPHA, watermark_alpha)
    }

    /// Get watermark alpha
    pub fn watermark_alpha(&self) -> Option<i64> {
        self.get_i64(WATERMARK_ALPHA)
    }

    /// Set background color
    pub fn set_background(&mut self, background: impl Into<String>) -> &mut Self {
        self.insert(BACKGROUND, background.into())
    }

    /// Get background color
    pub fn background(&self) -> Option<&str> {
        self.get_str(BACKGROUND)
    }

    /// Set border
    ///
    /// To use a relative width, pass a percentage (between 0 and 100) followed
    /// by `w` (image width) or `h` (image height). For example, `"5w"` is 5% of
    /// the width of the main image.
    pub fn set_border(
        &mut self,
        width: impl Display,
        color: impl Into<String>,
        method: impl IntoVariant<BorderMethod>,
    ) -> Result<&mut Self> {
        let method = method.into_variant("border method")?;
        let border = Border::new(width.to_string(), color, method);
        Ok(self.insert(BORDER, border.encode()))
    }

    /// Get border
    pub fn border(&self) -> Result<Option<Border>> {
        self.get(BORDER)
            .map(|v| Border::decode(&v.to_string()))
            .transpose()
    }

    /// Set quality
    pub fn set_quality(&mut self, quality: i64) -> &mut Self {
        self.insert(QUALITY, quality)
    }

    /// Get quality
    pub fn quality(&self) -> Option<i64> {
        self.get_i64(QUALITY)
    }

    /// Set output format
    pub fn set_format(&mut self, format: impl IntoVariant<Format>) -> Result<&mut Self> {
        let format = format.into_variant("format")?;
        Ok(self.insert(FORMAT, format.as_str()))
    }

    /// Get output format
    pub fn format(&self) -> Option<Format> {
        self.get_str(FORMAT).and_then(|v| v.parse().ok())
    }

    /// Set interlaced, sent as `1` or `0`.
    pub fn set_interlaced(&mut self, interlaced: bool) -> &mut Self {
        self.insert(INTERLACE, if interlaced { "1" } else { "0" })
    }

    /// Get interlaced
    pub fn interlaced(&self) -> Option<bool> {
        self.get_str(INTERLACE).map(|v| v == "1")
    }
}

impl Display for TransformOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallpics_core::ErrorKind;

    #[test]
    fn test_setters_keep_call_order() -> Result<()> {
        let mut options = TransformOptions::new();
        options
            .set_width(300)
            .set_height(400)
            .set_fit("fill")?
            .set_watermark_position("center")?;

        assert_eq!(
            options.to_canonical_string(),
            "w=300&h=400&fit=fill&markpos=center"
        );

        let mut reversed = TransformOptions::new();
        reversed.set_height(400).set_width(300);
        assert_eq!(reversed.to_canonical_string(), "h=400&w=300");
        Ok(())
    }

    #[test]
    fn test_complex_options() -> Result<()> {
        let mut options = TransformOptions::new();
        options
            .set_sharpen(5)
            .set_fit("fill")?
            .set_watermark_position("center")?
            .set_watermark_alpha(50)
            .set_quality(80)
            .set_format("png")?
            .set_border(10, "000000", "overlay")?;

        assert_eq!(
            options.to_canonical_string(),
            "sharp=5&fit=fill&markpos=center&markalpha=50&q=80&fm=png&border=10,000000,overlay"
        );
        assert_eq!(options.to_string(), options.to_canonical_string());
        assert_eq!(options.len(), 7);
        Ok(())
    }

    #[test]
    fn test_reset_overwrites_in_place() -> Result<()> {
        let mut options = TransformOptions::new();
        options.set_interlaced(true);
        assert_eq!(options.to_canonical_string(), "interlace=1");

        options.set_interlaced(false);
        assert_eq!(options.to_canonical_string(), "interlace=0");

        options.set_width(10).set_quality(50).set_width(20);
        assert_eq!(options.to_canonical_string(), "interlace=0&w=20&q=50");
        assert_eq!(options.interlaced(), Some(false));
        Ok(())
    }

    #[test]
    fn test_empty_options() {
        let options = TransformOptions::new();
        assert!(options.is_empty());
        assert_eq!(options.to_canonical_string(), "");
        assert_eq!(options.width(), None);
        assert_eq!(options.fit().unwrap(), None);
        assert_eq!(options.crop().unwrap(), None);
        assert_eq!(options.border().unwrap(), None);
        assert_eq!(options.format(), None);
        assert_eq!(options.interlaced(), None);
    }

    #[test]
    fn test_basic_getters() -> Result<()> {
        let mut options = TransformOptions::new();
        options
            .set_width(300)
            .set_height(400)
            .set_quality(85)
            .set_format("webp")?;

        assert_eq!(options.width(), Some(300));
        assert_eq!(options.height(), Some(400));
        assert_eq!(options.quality(), Some(85));
        assert_eq!(options.format(), Some(Format::Webp));
        Ok(())
    }

    #[test]
    fn test_enum_rejection() {
        let mut options = TransformOptions::new();

        let err = options.set_format("bogus").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEnumValue);
        assert!(err.to_string().contains("format"));

        let err = options.set_border(10, "000000", "glow").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEnumValue);
        assert!(err.to_string().contains("border method"));

        let err = options.set_watermark_fit("squash").unwrap_err();
        assert!(err.to_string().contains("watermark fit"));

        assert!(options.set_watermark_position("middle").is_err());
        assert!(options.set_flip("x").is_err());
        assert!(options.set_orientation("sideways").is_err());

        // Nothing is stored on failure.
        assert!(options.is_empty());
    }

    #[test]
    fn test_enhancements() {
        let mut options = TransformOptions::new();
        options
            .set_filter("grayscale")
            .set_brightness(10)
            .set_contrast(15)
            .set_gamma(1.2)
            .set_sharpen(3)
            .set_blur(2)
            .set_pixelate(5);

        assert_eq!(options.filter(), Some(Filter::GRAYSCALE));
        assert_eq!(options.brightness(), Some(10));
        assert_eq!(options.contrast(), Some(15));
        assert_eq!(options.gamma(), Some(1.2));
        assert_eq!(options.sharpen(), Some(3));
        assert_eq!(options.blur(), Some(2));
        assert_eq!(options.pixelate(), Some(5));
        assert_eq!(
            options.to_canonical_string(),
            "filt=grayscale&bri=10&con=15&gam=1.2&sharp=3&blur=2&pixel=5"
        );
    }

    #[test]
    fn test_crop_and_fit() -> Result<()> {
        let mut options = TransformOptions::new();
        options.set_crop(100, 200, 10, 20).set_fit(Fit::Contain)?;

        assert_eq!(
            options.crop()?.map(<[i64; 4]>::from),
            Some([100, 200, 10, 20])
        );
        assert_eq!(options.fit()?, Some(FitValue::Plain(Fit::Contain)));
        assert_eq!(options.to_canonical_string(), "crop=100,200,10,20&fit=contain");
        Ok(())
    }

    #[test]
    fn test_cover_fit_defaults_to_center() -> Result<()> {
        let mut options = TransformOptions::new();
        options.set_fit(Fit::Cover)?;

        assert_eq!(options.get(FIT), Some(&OptionValue::from("cover-center")));
        let fit = options.fit()?.unwrap();
        assert_eq!(fit.fit(), Fit::Cover);
        assert_eq!(fit.crop_position(), Some(CropPosition::Center));
        assert_eq!(fit.focal_point(), None);
        assert_eq!(fit.zoom(), None);
        Ok(())
    }

    #[test]
    fn test_crop_fit_with_focal_point() -> Result<()> {
        let mut options = TransformOptions::new();
        options.set_fit_with(Fit::Crop, None, Some((10, 20)), Some(2))?;

        assert_eq!(options.to_canonical_string(), "fit=crop-10-20-2");
        let fit = options.fit()?.unwrap();
        assert_eq!(fit.fit(), Fit::Crop);
        assert_eq!(fit.crop_position(), None);
        assert_eq!(fit.focal_point(), Some((10, 20)));
        assert_eq!(fit.zoom(), Some(2));
        Ok(())
    }

    #[test]
    fn test_fit_with_crop_position_string() -> Result<()> {
        let mut options = TransformOptions::new();
        options.set_fit_with(Fit::Cover, "cover-top", None, None)?;
        assert_eq!(options.to_canonical_string(), "fit=cover-top");

        options.set_watermark_fit_with("cover", CropPosition::Left, None, None)?;
        assert_eq!(
            options.to_canonical_string(),
            "fit=cover-top&markfit=cover-left"
        );

        let err = options
            .set_fit_with(Fit::Cover, "top", None, None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEnumValue);
        assert_eq!(options.to_canonical_string(), "fit=cover-top&markfit=cover-left");
        Ok(())
    }

    #[test]
    fn test_watermark() -> Result<()> {
        let mut options = TransformOptions::new();
        options
            .set_watermark_path("/path/to/watermark.png")
            .set_watermark_origin("https://assets.example.com")
            .set_watermark_width(100)
            .set_watermark_height(50)
            .set_watermark_fit_with("cover", Some(CropPosition::BottomRight), None, None)?
            .set_watermark_x_offset(10)
            .set_watermark_y_offset(20)
            .set_watermark_padding(5)
            .set_watermark_position(WatermarkPosition::BottomRight)?
            .set_watermark_alpha(50);

        assert_eq!(options.watermark_path(), Some("/path/to/watermark.png"));
        assert_eq!(options.watermark_origin(), Some("https://assets.example.com"));
        assert_eq!(options.watermark_width(), Some(100));
        assert_eq!(options.watermark_height(), Some(50));
        assert_eq!(
            options.watermark_fit()?,
            Some(FitValue::Cover(CropPosition::BottomRight))
        );
        assert_eq!(options.watermark_x_offset(), Some(10));
        assert_eq!(options.watermark_y_offset(), Some(20));
        assert_eq!(options.watermark_padding(), Some(5));
        assert_eq!(
            options.watermark_position(),
            Some(WatermarkPosition::BottomRight)
        );
        assert_eq!(options.watermark_alpha(), Some(50));
        assert_eq!(
            options.to_canonical_string(),
            "mark=/path/to/watermark.png&markorigin=https://assets.example.com&markw=100&markh=50\
             &markfit=cover-bottom-right&markx=10&marky=20&markpad=5&markpos=bottom-right&markalpha=50"
        );
        Ok(())
    }

    #[test]
    fn test_background_and_border() -> Result<()> {
        let mut options = TransformOptions::new();
        options
            .set_background("ffffff")
            .set_border(5, "ff0000", BorderMethod::Overlay)?;

        assert_eq!(options.background(), Some("ffffff"));
        let border = options.border()?.unwrap();
        assert_eq!(border.width, "5");
        assert_eq!(border.color, "ff0000");
        assert_eq!(border.method, BorderMethod::Overlay);

        options.set_border("5w", "000000", "shrink")?;
        assert_eq!(options.border()?.unwrap().width, "5w");
        assert_eq!(options.to_canonical_string(), "bg=ffffff&border=5w,000000,shrink");
        Ok(())
    }

    #[test]
    fn test_geometry() -> Result<()> {
        let mut options = TransformOptions::new();
        options
            .set_origin("https://origin.example.com")
            .set_orientation(90)?
            .set_flip("h")?
            .set_device_pixel_ratio(2);

        assert_eq!(options.origin(), Some("https://origin.example.com"));
        assert_eq!(options.orientation(), Some(Orientation::Angle(90)));
        assert_eq!(options.flip(), Some(Flip::Horizontal));
        assert_eq!(options.device_pixel_ratio(), Some(2));

        options.set_orientation("auto")?;
        assert_eq!(options.orientation(), Some(Orientation::Auto));
        assert_eq!(
            options.to_canonical_string(),
            "origin=https://origin.example.com&or=auto&flip=h&dpr=2"
        );
        Ok(())
    }

    #[test]
    fn test_negative_values_are_accepted() {
        let mut options = TransformOptions::new();
        options.set_width(-1).set_quality(1000);
        assert_eq!(options.to_canonical_string(), "w=-1&q=1000");
    }

    #[test]
    fn test_from_query() -> Result<()> {
        let query = "w=300&h=400&fit=crop-10-20&border=5,ff0000,overlay&s=abc&unknown=1";
        let options = TransformOptions::from_query(query);

        assert_eq!(
            options.to_canonical_string(),
            "w=300&h=400&fit=crop-10-20&border=5,ff0000,overlay"
        );
        assert_eq!(options.width(), Some(300));
        assert_eq!(options.fit()?.unwrap().focal_point(), Some((10, 20)));
        assert_eq!(options.border()?.unwrap().method, BorderMethod::Overlay);
        Ok(())
    }

    #[test]
    fn test_from_query_keeps_malformed_values() {
        let options = TransformOptions::from_query("crop=1,2&border=10&fit=squash");

        assert_eq!(
            options.crop().unwrap_err().kind(),
            ErrorKind::MalformedCompositeValue
        );
        assert_eq!(
            options.border().unwrap_err().kind(),
            ErrorKind::MalformedCompositeValue
        );
        assert_eq!(
            options.fit().unwrap_err().kind(),
            ErrorKind::MalformedCompositeValue
        );
    }
}
