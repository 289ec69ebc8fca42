// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/model/classifier.rs - 分类适配器
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

use once_cell::sync::OnceCell;
use tracing::{debug, error, info};

use crate::{
  category::Category,
  frame::NhwcTensor,
  model::{ClassifyError, Model, ModelBuilder, PredictionResult, argmax},
};

/// 持有懒加载模型的分类器
///
/// 模型在第一次使用时加载，并发的首次调用只会加载一次。
/// 加载失败不会缓存，下一次调用会重新尝试。
pub struct WasteClassifier<B: ModelBuilder> {
  builder: B,
  model: OnceCell<B::Model>,
}

impl<B: ModelBuilder> WasteClassifier<B> {
  pub fn new(builder: B) -> Self {
    Self {
      builder,
      model: OnceCell::new(),
    }
  }

  pub fn is_loaded(&self) -> bool {
    self.model.get().is_some()
  }

  /// 立即加载模型，适合在进程启动时调用
  pub fn preload(&self) -> Result<(), ClassifyError> {
    self.model().map(|_| ())
  }

  pub fn model(&self) -> Result<&B::Model, ClassifyError> {
    self
      .model
      .get_or_try_init(|| {
        info!("加载分类模型");
        self.builder.build()
      })
      .map_err(|e| {
        error!("分类模型加载失败: {}", e);
        ClassifyError::ClassifierUnavailable(Box::new(e))
      })
  }

  pub fn classify<const W: u32, const H: u32>(
    &self,
    tensor: &NhwcTensor<W, H>,
  ) -> Result<PredictionResult, ClassifyError> {
    let model = self.model()?;

    let expected = model.input_shape();
    let actual = tensor.shape();
    if expected != actual {
      error!("输入张量形状不匹配: 期望 {:?}, 实际 {:?}", expected, actual);
      return Err(ClassifyError::ShapeMismatch { expected, actual });
    }

    debug!("执行模型推理");
    let scores = model
      .infer(tensor)
      .map_err(|e| ClassifyError::Inference(Box::new(e)))?;
    debug!("模型输出分数: {:?}", scores);

    let labels = model.labels();
    let (expected, actual) = (labels.len(), scores.len());
    let mismatch = move || ClassifyError::OutputMismatch { expected, actual };
    if expected != actual {
      error!("模型输出数量不匹配: 期望 {}, 实际 {}", expected, actual);
      return Err(mismatch());
    }
    let Some((index, confidence)) = argmax(&scores) else {
      error!("模型输出中没有有效分数: {:?}", scores);
      return Err(ClassifyError::NoValidScore(scores));
    };
    let label: Category = labels.decode(index).ok_or_else(mismatch)?;

    debug!("分类结果: {} ({:.4})", label, confidence);
    Ok(PredictionResult::new(label, confidence))
  }
}
