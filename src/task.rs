// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/task.rs - 分类任务
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

use image::DynamicImage;
use tracing::info;

use crate::{
  model::{ModelBuilder, PredictionResult, WasteClassifier},
  output::Render,
  preprocess::preprocess,
};

pub trait Task<I, C, O>: Sized {
  type Output;
  type Error;
  fn run_task(self, input: I, classifier: C, output: O) -> Result<Self::Output, Self::Error>;
}

/// 取输入中的第一张图像，分类一次并输出
pub struct OneShotTask;

impl<'a, RE, I, B, O> Task<I, &'a WasteClassifier<B>, &'a O> for OneShotTask
where
  RE: std::error::Error + Sync + Send + 'static,
  I: Iterator<Item = DynamicImage>,
  B: ModelBuilder,
  O: Render<DynamicImage, PredictionResult, Error = RE>,
{
  type Output = PredictionResult;
  type Error = anyhow::Error;

  fn run_task(
    self,
    mut input: I,
    classifier: &'a WasteClassifier<B>,
    output: &'a O,
  ) -> Result<PredictionResult, Self::Error> {
    info!("开始任务...");
    let image = input.next().ok_or_else(|| anyhow::anyhow!("没有输入图像"))?;
    info!(
      "输入图像获取成功 ({}x{})，开始预处理...",
      image.width(),
      image.height()
    );

    let now = std::time::Instant::now();
    let tensor = preprocess(&image)?;
    info!("预处理完成，耗时: {:.2?}", now.elapsed());

    let now = std::time::Instant::now();
    let result = classifier.classify(&tensor)?;
    info!(
      "推理完成，耗时: {:.2?}，结果: {} ({:.4})",
      now.elapsed(),
      result.label(),
      result.confidence()
    );

    let now = std::time::Instant::now();
    output.render_result(&image, &result)?;
    info!("渲染完成，耗时: {:.2?}", now.elapsed());

    Ok(result)
  }
}
