// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/model.rs - 模型
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

use thiserror::Error;

use crate::{
  category::{Category, LabelMap},
  frame::NhwcTensor,
};

/// 已加载的分类模型：输入张量，输出每个类别的分数
pub trait Model {
  type Error: std::error::Error + Send + Sync + 'static;

  /// 模型期望的 NHWC 输入形状
  fn input_shape(&self) -> [usize; 4];

  fn labels(&self) -> &LabelMap {
    LabelMap::standard_ref()
  }

  fn infer<const W: u32, const H: u32>(
    &self,
    input: &NhwcTensor<W, H>,
  ) -> Result<Box<[f32]>, Self::Error>;
}

/// 模型加载器，加载失败后可以再次调用
pub trait ModelBuilder {
  type Model: Model;
  type Error: std::error::Error + Send + Sync + 'static;

  fn build(&self) -> Result<Self::Model, Self::Error>;
}

#[derive(Error, Debug)]
pub enum ClassifyError {
  #[error("分类模型不可用: {0}")]
  ClassifierUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
  #[error("输入张量形状不匹配: 期望 {expected:?}, 实际 {actual:?}")]
  ShapeMismatch {
    expected: [usize; 4],
    actual: [usize; 4],
  },
  #[error("模型推理错误: {0}")]
  Inference(#[source] Box<dyn std::error::Error + Send + Sync>),
  #[error("模型输出数量不匹配: 期望 {expected}, 实际 {actual}")]
  OutputMismatch { expected: usize, actual: usize },
  #[error("模型输出中没有有效分数: {0:?}")]
  NoValidScore(Box<[f32]>),
}

/// 一次分类的结果，创建后不可修改
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
  label: Category,
  confidence: f32,
}

impl PredictionResult {
  pub fn new(label: Category, confidence: f32) -> Self {
    Self { label, confidence }
  }

  pub fn label(&self) -> Category {
    self.label
  }

  /// 模型给出的原始分数，不做重新归一化
  pub fn confidence(&self) -> f32 {
    self.confidence
  }
}

/// 最大分数的下标与分数，分数相同时取最靠前的一个
///
/// NaN 不参与比较；没有任何可比较的分数时返回 `None`。
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
  let mut best: Option<(usize, f32)> = None;
  for (index, &score) in scores.iter().enumerate() {
    if score.is_nan() {
      continue;
    }
    match best {
      Some((_, top)) if score <= top => {}
      _ => best = Some((index, score)),
    }
  }
  best
}

mod classifier;
pub use self::classifier::WasteClassifier;

#[cfg(feature = "model_onnx")]
mod onnx;
#[cfg(feature = "model_onnx")]
pub use self::onnx::{OnnxModel, OnnxModelBuilder, OnnxModelError};
