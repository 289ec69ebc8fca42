// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/frame.rs - NHWC 归一化张量定义
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

use image::RgbImage;
use thiserror::Error;

pub const RGB_CHANNELS: usize = 3;

/// 分类模型的输入边长
pub const INPUT_SIZE: u32 = 224;

/// 批大小为 1 的 (1, 224, 224, 3) 输入张量
pub type NormalizedTensor = NhwcTensor<INPUT_SIZE, INPUT_SIZE>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
  #[error("数据长度不匹配: 期望长度 {expected}, 实际长度 {actual}")]
  LengthMismatch { expected: usize, actual: usize },
  #[error("图像尺寸不匹配: 期望 {expected_width}x{expected_height}, 实际 {width}x{height}")]
  DimensionMismatch {
    expected_width: u32,
    expected_height: u32,
    width: u32,
    height: u32,
  },
}

/// 将 0..=255 的像素值映射到 [-1, 1]
pub fn normalize_channel(value: u8) -> f32 {
  value as f32 / 127.5 - 1.0
}

/// 按 NHWC 排列、批大小为 1 的 f32 张量
#[derive(Debug, Clone, PartialEq)]
pub struct NhwcTensor<const W: u32, const H: u32> {
  data: Box<[f32]>,
}

impl<const W: u32, const H: u32> NhwcTensor<W, H> {
  pub const LEN: usize = RGB_CHANNELS * W as usize * H as usize;

  /// 打包已经是 W×H 的 RGB 图像并逐元素归一化
  pub fn from_rgb_image(image: &RgbImage) -> Result<Self, FrameError> {
    let (width, height) = image.dimensions();
    if (width, height) != (W, H) {
      return Err(FrameError::DimensionMismatch {
        expected_width: W,
        expected_height: H,
        width,
        height,
      });
    }

    // RgbImage 的原始缓冲区按行存放交错的 RGB，正好是 HWC 顺序
    let data: Vec<f32> = image.as_raw().iter().copied().map(normalize_channel).collect();
    Self::try_from(data)
  }

  pub fn shape(&self) -> [usize; 4] {
    [1, H as usize, W as usize, RGB_CHANNELS]
  }

  pub fn height(&self) -> usize {
    H as usize
  }

  pub fn width(&self) -> usize {
    W as usize
  }

  pub fn channels(&self) -> usize {
    RGB_CHANNELS
  }

  pub fn as_slice(&self) -> &[f32] {
    &self.data
  }

  pub fn get(&self, y: usize, x: usize, c: usize) -> Option<f32> {
    if y >= self.height() || x >= self.width() || c >= RGB_CHANNELS {
      return None;
    }
    let index = (y * self.width() + x) * RGB_CHANNELS + c;
    self.data.get(index).copied()
  }
}

impl<const W: u32, const H: u32> TryFrom<Vec<f32>> for NhwcTensor<W, H> {
  type Error = FrameError;

  fn try_from(data: Vec<f32>) -> Result<Self, Self::Error> {
    if data.len() != Self::LEN {
      return Err(FrameError::LengthMismatch {
        expected: Self::LEN,
        actual: data.len(),
      });
    }

    Ok(Self {
      data: data.into_boxed_slice(),
    })
  }
}

impl<const W: u32, const H: u32> AsRef<[f32]> for NhwcTensor<W, H> {
  fn as_ref(&self) -> &[f32] {
    &self.data
  }
}
