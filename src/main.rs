// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/main.rs - 垃圾分类主程序
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

mod args;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ecosort::{
  FromUrl, WasteClassifier,
  input::ImageFileInput,
  model::OnnxModelBuilder,
  output::OutputWrapper,
  task::{OneShotTask, Task},
};

fn main() -> Result<()> {
  let args = args::Args::parse();

  let filter =
    EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log_level))?;
  tracing_subscriber::fmt().with_env_filter(filter).init();

  info!("模型文件路径: {}", args.model);
  info!("输入来源: {}", args.input);
  info!("输出路径: {}", args.output);

  let input = ImageFileInput::from_url(&args.input)?;
  let classifier = WasteClassifier::new(OnnxModelBuilder::from_url(&args.model)?);
  let output = OutputWrapper::from_url(&args.output)?;

  if args.preload {
    info!("预加载模型...");
    classifier.preload()?;
  }

  OneShotTask.run_task(input, &classifier, &output)?;

  Ok(())
}
