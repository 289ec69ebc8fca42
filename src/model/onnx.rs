// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/model/onnx.rs - ONNX 分类模型
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

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, error, info};
use tract_onnx::prelude::*;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  category::{Category, LabelMap, LabelParseError},
  frame::{INPUT_SIZE, NhwcTensor, RGB_CHANNELS},
  model::{Model, ModelBuilder},
  url_file_path,
};

const ONNX_NUM_INPUTS: usize = 1;
const ONNX_NUM_OUTPUTS: usize = 1;
const ONNX_INPUT_SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, RGB_CHANNELS];

#[derive(Error, Debug)]
pub enum OnnxModelError {
  #[error("模型加载错误: {0}")]
  ModelLoadError(std::io::Error),
  #[error("模型无效: {0}, 错误: {1}")]
  ModelInvalid(String, TractError),
  #[error("模型结构不符: {0}")]
  ModelMismatch(String),
  #[error("推理错误: {0}")]
  InferenceError(TractError),
  #[error("标签文件错误: {0}")]
  LabelError(LabelParseError),
  #[error("模型路径错误: {0}")]
  ModelPathError(String),
}

impl From<std::io::Error> for OnnxModelError {
  fn from(err: std::io::Error) -> Self {
    OnnxModelError::ModelLoadError(err)
  }
}

impl From<LabelParseError> for OnnxModelError {
  fn from(err: LabelParseError) -> Self {
    OnnxModelError::LabelError(err)
  }
}

impl OnnxModelError {
  pub fn invalid(msg: &str, e: TractError) -> Self {
    OnnxModelError::ModelInvalid(msg.to_string(), e)
  }

  fn mismatch(msg: String) -> Self {
    error!("{}", msg);
    OnnxModelError::ModelMismatch(msg)
  }
}

/// 通过 tract 运行的 ONNX 分类模型，输入为 (1, 224, 224, 3) 的 NHWC 张量
pub struct OnnxModel {
  plan: TypedRunnableModel<TypedModel>,
  labels: LabelMap,
}

#[derive(Debug, Clone)]
pub struct OnnxModelBuilder {
  model_path: PathBuf,
  labels_path: Option<PathBuf>,
}

impl FromUrlWithScheme for OnnxModelBuilder {
  const SCHEME: &'static str = "onnx";
}

impl FromUrl for OnnxModelBuilder {
  type Error = OnnxModelError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(OnnxModelError::ModelPathError(format!(
        "模型路径必须使用 {} 方案",
        Self::SCHEME
      )));
    }

    let model_path = url_file_path(url);
    if model_path.as_os_str().is_empty() || model_path == PathBuf::from("/") {
      return Err(OnnxModelError::ModelPathError(format!(
        "模型路径为空: {}",
        url
      )));
    }

    let labels_path = url
      .query_pairs()
      .find(|(k, _)| k == "labels")
      .map(|(_, v)| PathBuf::from(v.into_owned()));

    Ok(OnnxModelBuilder {
      model_path,
      labels_path,
    })
  }
}

impl OnnxModelBuilder {
  pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
    Self {
      model_path: model_path.into(),
      labels_path: None,
    }
  }

  pub fn labels<P: Into<PathBuf>>(mut self, labels_path: P) -> Self {
    self.labels_path = Some(labels_path.into());
    self
  }

  pub fn model_path(&self) -> &std::path::Path {
    &self.model_path
  }

  pub fn labels_path(&self) -> Option<&std::path::Path> {
    self.labels_path.as_deref()
  }
}

impl ModelBuilder for OnnxModelBuilder {
  type Model = OnnxModel;
  type Error = OnnxModelError;

  fn build(&self) -> Result<OnnxModel, OnnxModelError> {
    let labels = match &self.labels_path {
      Some(path) => {
        info!("加载标签文件: {}", path.display());
        LabelMap::from_file(path)?
      }
      None => LabelMap::standard(),
    };

    info!("加载模型文件: {}", self.model_path.display());
    let model_data = std::fs::read(&self.model_path)?;
    debug!(
      "模型文件大小: {:.2} MB",
      model_data.len() as f64 / (1024.0 * 1024.0)
    );

    let model = tract_onnx::onnx()
      .model_for_read(&mut model_data.as_slice())
      .map_err(|e| OnnxModelError::invalid("无法解析 ONNX 模型", e))?;

    let num_inputs = model
      .input_outlets()
      .map_err(|e| OnnxModelError::invalid("无法获取输入数量", e))?
      .len();
    let num_outputs = model
      .output_outlets()
      .map_err(|e| OnnxModelError::invalid("无法获取输出数量", e))?
      .len();
    debug!("模型输入数量: {}", num_inputs);
    debug!("模型输出数量: {}", num_outputs);

    if num_inputs != ONNX_NUM_INPUTS {
      return Err(OnnxModelError::mismatch(format!(
        "预期模型输入数量为 {}, 实际为 {}",
        ONNX_NUM_INPUTS, num_inputs
      )));
    }
    if num_outputs != ONNX_NUM_OUTPUTS {
      return Err(OnnxModelError::mismatch(format!(
        "预期模型输出数量为 {}, 实际为 {}",
        ONNX_NUM_OUTPUTS, num_outputs
      )));
    }

    info!("优化模型，输入形状: {:?}", ONNX_INPUT_SHAPE);
    let model = model
      .with_input_fact(0, f32::fact(ONNX_INPUT_SHAPE).into())
      .map_err(|e| OnnxModelError::invalid("输入形状与模型不兼容", e))?
      .into_optimized()
      .map_err(|e| OnnxModelError::invalid("模型优化失败", e))?;

    let output_fact = model
      .output_fact(0)
      .map_err(|e| OnnxModelError::invalid("无法获取输出形状", e))?;
    if let Some(dims) = output_fact.shape.as_concrete() {
      let classes: usize = dims.iter().product();
      debug!("模型输出形状: {:?}", dims);
      if classes != Category::COUNT {
        return Err(OnnxModelError::mismatch(format!(
          "预期模型输出 {} 个类别分数, 实际输出形状为 {:?}",
          Category::COUNT,
          dims
        )));
      }
    }

    let plan = model
      .into_runnable()
      .map_err(|e| OnnxModelError::invalid("无法创建推理计划", e))?;
    info!("模型加载完成");

    Ok(OnnxModel { plan, labels })
  }
}

impl Model for OnnxModel {
  type Error = OnnxModelError;

  fn input_shape(&self) -> [usize; 4] {
    ONNX_INPUT_SHAPE
  }

  fn labels(&self) -> &LabelMap {
    &self.labels
  }

  fn infer<const W: u32, const H: u32>(
    &self,
    input: &NhwcTensor<W, H>,
  ) -> Result<Box<[f32]>, Self::Error> {
    debug!("设置模型输入");
    let tensor =
      Tensor::from_shape(&input.shape(), input.as_slice()).map_err(OnnxModelError::InferenceError)?;

    debug!("执行模型推理");
    let outputs = self
      .plan
      .run(tvec!(tensor.into_tvalue()))
      .map_err(OnnxModelError::InferenceError)?;

    let output = outputs
      .first()
      .ok_or_else(|| OnnxModelError::mismatch("模型没有输出".to_string()))?;
    let scores = output
      .to_array_view::<f32>()
      .map_err(OnnxModelError::InferenceError)?;
    debug!("模型推理结果：{:?}", scores);

    Ok(scores.iter().copied().collect())
  }
}
