// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/input.rs - 图像输入与解码
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::io::Cursor;

use image::{DynamicImage, ImageReader};
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, frame::FrameError, url_file_path};

#[derive(Error, Debug)]
pub enum InvalidImageError {
  #[error("Empty image data")]
  Empty,
  #[error("Image decoding error: {0}")]
  DecodeError(#[from] image::ImageError),
  #[error("Image format detection error: {0}")]
  FormatError(#[from] std::io::Error),
  #[error("Image has zero dimension: {width}x{height}")]
  ZeroDimension { width: u32, height: u32 },
  #[error("Image does not fit the input tensor: {0}")]
  FrameError(#[from] FrameError),
}

/// 解码上传的原始字节，只接受宽高都非零的图像
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, InvalidImageError> {
  if bytes.is_empty() {
    return Err(InvalidImageError::Empty);
  }

  let image = ImageReader::new(Cursor::new(bytes))
    .with_guessed_format()?
    .decode()?;
  ensure_dimensions(&image)?;

  debug!(
    "图像解码完成: {}x{} {:?}",
    image.width(),
    image.height(),
    image.color()
  );
  Ok(image)
}

pub fn ensure_dimensions(image: &DynamicImage) -> Result<(), InvalidImageError> {
  let (width, height) = (image.width(), image.height());
  if width == 0 || height == 0 {
    return Err(InvalidImageError::ZeroDimension { width, height });
  }
  Ok(())
}

#[derive(Error, Debug)]
pub enum ImageFileInputError {
  #[error("URI schema mismatch")]
  SchemaMismatch,
  #[error("I/O error: {0}")]
  IoError(std::io::Error),
  #[error("Invalid image: {0}")]
  InvalidImage(InvalidImageError),
}

impl From<std::io::Error> for ImageFileInputError {
  fn from(err: std::io::Error) -> Self {
    ImageFileInputError::IoError(err)
  }
}

impl From<InvalidImageError> for ImageFileInputError {
  fn from(err: InvalidImageError) -> Self {
    ImageFileInputError::InvalidImage(err)
  }
}

/// 单张图像输入，迭代一次后即耗尽
pub struct ImageFileInput {
  image: Option<DynamicImage>,
}

impl FromUrlWithScheme for ImageFileInput {
  const SCHEME: &'static str = "image";
}

impl FromUrl for ImageFileInput {
  type Error = ImageFileInputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      error!(
        "URI scheme mismatch: expected '{}', found '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(ImageFileInputError::SchemaMismatch);
    }

    let bytes = std::fs::read(url_file_path(url))?;
    Self::from_bytes(&bytes)
  }
}

impl ImageFileInput {
  pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageFileInputError> {
    let image = decode_image(bytes)?;
    Ok(Self::from_image(image))
  }

  pub fn from_image(image: DynamicImage) -> Self {
    ImageFileInput { image: Some(image) }
  }
}

impl Iterator for ImageFileInput {
  type Item = DynamicImage;

  fn next(&mut self) -> Option<Self::Item> {
    self.image.take()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{ImageFormat, Rgb, RgbImage};

  fn png_bytes(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
      .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
      .unwrap();
    bytes
  }

  #[test]
  fn test_decode_rejects_empty_bytes() {
    assert!(matches!(decode_image(&[]), Err(InvalidImageError::Empty)));
  }

  #[test]
  fn test_decode_rejects_corrupt_bytes() {
    let err = decode_image(b"definitely not a photo").unwrap_err();
    assert!(matches!(err, InvalidImageError::DecodeError(_)));

    // PNG 文件头正确但内容被截断
    let mut truncated = png_bytes(&RgbImage::new(8, 8));
    truncated.truncate(20);
    assert!(decode_image(&truncated).is_err());
  }

  #[test]
  fn test_decode_png() {
    let source = RgbImage::from_pixel(5, 3, Rgb([1, 2, 3]));
    let image = decode_image(&png_bytes(&source)).unwrap();
    assert_eq!((image.width(), image.height()), (5, 3));
    assert_eq!(image.to_rgb8(), source);
  }

  #[test]
  fn test_zero_dimension_is_invalid() {
    let image = DynamicImage::new_rgb8(0, 10);
    assert!(matches!(
      ensure_dimensions(&image),
      Err(InvalidImageError::ZeroDimension {
        width: 0,
        height: 10
      })
    ));
  }

  #[test]
  fn test_image_file_input_reads_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bottle.png");
    std::fs::write(&path, png_bytes(&RgbImage::new(6, 4))).unwrap();

    let url = Url::from_file_path(&path).unwrap();
    let url = Url::parse(&url.as_str().replacen("file:", "image:", 1)).unwrap();
    let mut input = ImageFileInput::from_url(&url).unwrap();

    assert_eq!(input.next().map(|i| i.width()), Some(6));
    assert!(input.next().is_none());
  }

  #[test]
  fn test_image_file_input_scheme_mismatch() {
    let url = Url::parse("video:///tmp/bottle.mp4").unwrap();
    assert!(matches!(
      ImageFileInput::from_url(&url),
      Err(ImageFileInputError::SchemaMismatch)
    ));
  }
}
