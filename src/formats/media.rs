//! Still images through the `image` crate
//!
//! Arrays are `|u1` pixels shaped `[height, width]` (grayscale) or
//! `[height, width, channels]` with 1 to 4 channels. Decoding returns the
//! same layout; images with other sample types are converted to 8 bits.

use super::{IMAGE_JPEG, IMAGE_PNG, unexpected};
use crate::config::{Options, invalid};
use crate::error::{Error, Result};
use crate::registry::{Decoder, Encoder};
use crate::types::{Array, DType, Node, TypeTag};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, GrayAlphaImage, GrayImage, ImageError, ImageFormat, RgbImage, RgbaImage};

const DEFAULT_QUALITY: u8 = 100;

fn codec_error(format: &str, err: ImageError) -> Error {
    Error::Codec {
        format: format.to_string(),
        source: Box::new(err),
    }
}

fn to_image(format: &'static str, value: &Node) -> Result<DynamicImage> {
    let arr = match value {
        Node::Array(arr) => arr,
        other => return Err(unexpected(format, "array", other)),
    };
    if arr.tag().dtype != DType::U8 {
        return Err(Error::InvalidLayout(format!(
            "{format} needs |u1 pixels, got {}",
            arr.tag()
        )));
    }

    let bad_shape = || {
        Error::InvalidLayout(format!(
            "{format} needs shape [h, w] or [h, w, 1..=4], got {:?}",
            arr.shape()
        ))
    };
    let (height, width, channels) = match *arr.shape() {
        [h, w] => (h, w, 1),
        [h, w, c @ 1..=4] => (h, w, c),
        _ => return Err(bad_shape()),
    };
    let height = u32::try_from(height).map_err(|_| bad_shape())?;
    let width = u32::try_from(width).map_err(|_| bad_shape())?;

    let pixels = arr
        .bytes()
        .ok_or_else(|| Error::NotContiguous {
            shape: arr.shape().to_vec(),
            strides: arr.strides().to_vec(),
        })?
        .to_vec();
    let image = match channels {
        1 => GrayImage::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(width, height, pixels).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8),
        _ => RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8),
    };
    image.ok_or_else(bad_shape)
}

fn from_image(image: DynamicImage) -> Result<Node> {
    let (width, height) = (u64::from(image.width()), u64::from(image.height()));
    let (channels, pixels) = match image {
        DynamicImage::ImageLuma8(buf) => (None, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (Some(2), buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (Some(3), buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (Some(4), buf.into_raw()),
        other if other.color().has_alpha() => (Some(4), other.to_rgba8().into_raw()),
        other => (Some(3), other.to_rgb8().into_raw()),
    };

    let mut shape = vec![height, width];
    shape.extend(channels);
    Ok(Node::Array(Array::new(TypeTag::native(DType::U8), shape, pixels)?))
}

fn decode(format: &'static str, kind: ImageFormat, bytes: &[u8]) -> Result<Node> {
    let image =
        image::load_from_memory_with_format(bytes, kind).map_err(|err| codec_error(format, err))?;
    from_image(image)
}

/// Lossless PNG
#[derive(Debug, Clone, Copy, Default)]
pub struct Png;

impl Encoder for Png {
    fn encode(&self, value: &Node, _options: &Options) -> Result<Vec<u8>> {
        let image = to_image(IMAGE_PNG, value)?;
        let mut out = Vec::new();
        image
            .write_with_encoder(PngEncoder::new(&mut out))
            .map_err(|err| codec_error(IMAGE_PNG, err))?;
        Ok(out)
    }
}

impl Decoder for Png {
    fn decode(&self, bytes: &[u8], _options: &Options) -> Result<Node> {
        decode(IMAGE_PNG, ImageFormat::Png, bytes)
    }
}

/// Lossy JPEG
///
/// Options: `quality`, 1 to 100 (default 100). Only grayscale and RGB
/// images can be written.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jpeg;

impl Encoder for Jpeg {
    fn encode(&self, value: &Node, options: &Options) -> Result<Vec<u8>> {
        let quality = match options.get_usize("quality")? {
            None => DEFAULT_QUALITY,
            Some(q @ 1..=100) => q as u8,
            Some(q) => return Err(invalid("quality", format!("expected 1 to 100, got {q}"))),
        };
        let image = to_image(IMAGE_JPEG, value)?;
        let mut out = Vec::new();
        image
            .write_with_encoder(JpegEncoder::new_with_quality(&mut out, quality))
            .map_err(|err| codec_error(IMAGE_JPEG, err))?;
        Ok(out)
    }
}

impl Decoder for Jpeg {
    fn decode(&self, bytes: &[u8], _options: &Options) -> Result<Node> {
        decode(IMAGE_JPEG, ImageFormat::Jpeg, bytes)
    }
}
