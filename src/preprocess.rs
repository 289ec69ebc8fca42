// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/preprocess.rs - 图像预处理
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

use image::{
  DynamicImage, RgbImage,
  imageops::{self, FilterType},
};
use tracing::debug;

use crate::{
  frame::{NhwcTensor, NormalizedTensor},
  input::{InvalidImageError, ensure_dimensions},
};

/// 把任意尺寸的图像转换为 W×H 的归一化张量
///
/// 先在原图上取与目标同宽高比的居中区域，再把该区域缩放到 W×H，不会拉伸变形。
/// 缩放只作用于裁剪后的区域，细长图像也不会放大出超大的中间图。
#[derive(Debug, Clone, Copy)]
pub struct Preprocessor<const W: u32, const H: u32> {
  filter: FilterType,
}

impl<const W: u32, const H: u32> Default for Preprocessor<W, H> {
  fn default() -> Self {
    Self {
      filter: FilterType::Lanczos3,
    }
  }
}

impl<const W: u32, const H: u32> Preprocessor<W, H> {
  pub fn with_filter(mut self, filter: FilterType) -> Self {
    self.filter = filter;
    self
  }

  pub fn filter(&self) -> FilterType {
    self.filter
  }

  /// 原图中与 W×H 同宽高比的最大居中区域，返回 (x, y, 宽, 高)
  pub fn crop_box(width: u32, height: u32) -> (u32, u32, u32, u32) {
    let (w, h) = (width as u64, height as u64);
    let (crop_w, crop_h) = if w * H as u64 > h * W as u64 {
      let crop_w = (h * W as u64 + H as u64 / 2) / H as u64;
      (crop_w.clamp(1, w), h)
    } else {
      let crop_h = (w * H as u64 + W as u64 / 2) / W as u64;
      (w, crop_h.clamp(1, h))
    };
    let (crop_w, crop_h) = (crop_w as u32, crop_h as u32);
    ((width - crop_w) / 2, (height - crop_h) / 2, crop_w, crop_h)
  }

  /// 居中裁剪到目标宽高比，再缩放到 W×H
  pub fn fit(&self, image: &DynamicImage) -> Result<RgbImage, InvalidImageError> {
    ensure_dimensions(image)?;

    let (x, y, crop_w, crop_h) = Self::crop_box(image.width(), image.height());
    debug!(
      "裁剪图像: {}x{} -> ({}, {}) {}x{}, 缩放到 {}x{}",
      image.width(),
      image.height(),
      x,
      y,
      crop_w,
      crop_h,
      W,
      H
    );

    // 灰度复制为三通道，RGBA 丢弃透明通道
    let cropped = image.crop_imm(x, y, crop_w, crop_h).to_rgb8();
    if cropped.dimensions() == (W, H) {
      return Ok(cropped);
    }
    Ok(imageops::resize(&cropped, W, H, self.filter))
  }

  pub fn run(&self, image: &DynamicImage) -> Result<NhwcTensor<W, H>, InvalidImageError> {
    let fitted = self.fit(image)?;
    let tensor = NhwcTensor::from_rgb_image(&fitted)?;
    debug!("预处理完成，张量形状: {:?}", tensor.shape());
    Ok(tensor)
  }
}

/// 生成分类模型所需的 (1, 224, 224, 3) 输入
pub fn preprocess(image: &DynamicImage) -> Result<NormalizedTensor, InvalidImageError> {
  Preprocessor::default().run(image)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::frame::INPUT_SIZE;
  use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};

  fn assert_all(tensor: &NormalizedTensor, expected: f32) {
    assert!(
      tensor
        .as_slice()
        .iter()
        .all(|v| (v - expected).abs() < 1e-6),
      "张量中存在不等于 {} 的值",
      expected
    );
  }

  #[test]
  fn test_any_size_yields_fixed_shape_in_range() {
    let sizes = [(1, 1), (224, 224), (300, 100), (100, 300), (640, 480), (225, 2000)];
    for (w, h) in sizes {
      let image = DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
      }));
      let tensor = preprocess(&image).unwrap();
      assert_eq!(tensor.shape(), [1, 224, 224, 3], "输入尺寸 {}x{}", w, h);
      assert!(tensor.as_slice().iter().all(|v| (-1.0..=1.0).contains(v)));
    }
  }

  #[test]
  fn test_black_image_is_minus_one() {
    let image = DynamicImage::ImageRgb8(RgbImage::new(320, 240));
    let tensor = preprocess(&image).unwrap();
    assert!(tensor.as_slice().iter().all(|&v| v == -1.0));
  }

  #[test]
  fn test_white_image_is_upper_bound() {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(500, 400, Rgb([255, 255, 255])));
    let tensor = preprocess(&image).unwrap();
    assert_all(&tensor, 255.0 / 127.5 - 1.0);
  }

  #[test]
  fn test_grayscale_replicated_to_three_planes() {
    let image = DynamicImage::ImageLuma8(GrayImage::from_fn(240, 260, |x, y| {
      Luma([((x * 7 + y * 3) % 256) as u8])
    }));
    let tensor = preprocess(&image).unwrap();
    for y in (0..224).step_by(13) {
      for x in (0..224).step_by(11) {
        let r = tensor.get(y, x, 0).unwrap();
        assert_eq!(tensor.get(y, x, 1), Some(r));
        assert_eq!(tensor.get(y, x, 2), Some(r));
      }
    }
  }

  #[test]
  fn test_alpha_channel_is_dropped() {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(224, 224, Rgba([255, 0, 0, 0])));
    let tensor = preprocess(&image).unwrap();
    assert_eq!(tensor.get(100, 100, 0), Some(1.0));
    assert_eq!(tensor.get(100, 100, 1), Some(-1.0));
    assert_eq!(tensor.get(100, 100, 2), Some(-1.0));
  }

  #[test]
  fn test_wide_image_is_center_cropped() {
    // 三等分的横向图像：左红、中绿、右蓝，短边已经是 224
    let image = DynamicImage::ImageRgb8(RgbImage::from_fn(672, 224, |x, _| match x / 224 {
      0 => Rgb([255, 0, 0]),
      1 => Rgb([0, 255, 0]),
      _ => Rgb([0, 0, 255]),
    }));
    let fitted = Preprocessor::<INPUT_SIZE, INPUT_SIZE>::default()
      .fit(&image)
      .unwrap();
    assert_eq!(fitted.dimensions(), (224, 224));
    assert!(fitted.pixels().all(|p| *p == Rgb([0, 255, 0])));
  }

  #[test]
  fn test_tall_image_keeps_aspect() {
    // 上半白、下半黑的 100x400 图像，取中间 100x100 后放大，两种颜色各占一半
    let image = DynamicImage::ImageRgb8(RgbImage::from_fn(100, 400, |_, y| {
      if y < 200 {
        Rgb([255, 255, 255])
      } else {
        Rgb([0, 0, 0])
      }
    }));
    let fitted = Preprocessor::<INPUT_SIZE, INPUT_SIZE>::default()
      .fit(&image)
      .unwrap();
    assert_eq!(fitted.get_pixel(112, 5), &Rgb([255, 255, 255]));
    assert_eq!(fitted.get_pixel(112, 218), &Rgb([0, 0, 0]));
  }

  #[test]
  fn test_extreme_aspect_ratio_stays_small() {
    for (w, h) in [(1, 20000), (20000, 1)] {
      let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([255, 255, 255])));
      let tensor = preprocess(&image).unwrap();
      assert_eq!(tensor.shape(), [1, 224, 224, 3], "输入尺寸 {}x{}", w, h);
      assert_all(&tensor, 1.0);
    }
  }

  #[test]
  fn test_crop_box_is_centered_in_source() {
    type Square = Preprocessor<INPUT_SIZE, INPUT_SIZE>;
    assert_eq!(Square::crop_box(1, 20000), (0, 9999, 1, 1));
    assert_eq!(Square::crop_box(20000, 1), (9999, 0, 1, 1));
    assert_eq!(Square::crop_box(640, 480), (80, 0, 480, 480));
    assert_eq!(Square::crop_box(100, 400), (0, 150, 100, 100));
    assert_eq!(Square::crop_box(300, 300), (0, 0, 300, 300));

    type Wide = Preprocessor<32, 16>;
    assert_eq!(Wide::crop_box(50, 50), (0, 12, 50, 25));
    assert_eq!(Wide::crop_box(100, 10), (40, 0, 20, 10));
  }

  #[test]
  fn test_downscaled_input_matches_direct_input() {
    let large = RgbImage::from_fn(448, 448, |x, y| {
      Rgb([(x / 2) as u8, (y / 2) as u8, ((x ^ y) % 256) as u8])
    });
    let downscaled = imageops::resize(&large, 224, 224, FilterType::Lanczos3);

    let from_large = preprocess(&DynamicImage::ImageRgb8(large)).unwrap();
    let from_small = preprocess(&DynamicImage::ImageRgb8(downscaled)).unwrap();
    assert_eq!(from_large, from_small);
  }

  #[test]
  fn test_zero_sized_image_is_rejected() {
    let image = DynamicImage::new_rgb8(224, 0);
    assert!(matches!(
      preprocess(&image),
      Err(InvalidImageError::ZeroDimension { .. })
    ));
  }

  #[test]
  fn test_custom_filter_and_size() {
    let preprocessor = Preprocessor::<32, 16>::default().with_filter(FilterType::Nearest);
    assert_eq!(preprocessor.filter(), FilterType::Nearest);
    let tensor = preprocessor
      .run(&DynamicImage::ImageRgb8(RgbImage::new(50, 50)))
      .unwrap();
    assert_eq!(tensor.shape(), [1, 16, 32, 3]);
  }
}
