// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/args.rs - 命令行参数
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

use clap::Parser;
use url::Url;

/// EcoSort 垃圾分类命令行
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 分类模型，例如 onnx:///models/waste.onnx?labels=/models/labels.txt
  #[arg(long, value_name = "MODEL", env = "ECOSORT_MODEL")]
  pub model: Url,

  /// 输入图像，例如 image:///photos/bottle.jpg
  #[arg(long, value_name = "SOURCE", env = "ECOSORT_INPUT")]
  pub input: Url,

  /// 输出方式
  /// - console: 或 console:?format=json
  /// - image:///out/result.png[?font=/fonts/font.ttf]
  #[arg(
    long,
    value_name = "OUTPUT",
    env = "ECOSORT_OUTPUT",
    default_value = "console:"
  )]
  pub output: Url,

  /// 日志级别 (trace, debug, info, warn, error)
  #[arg(long, value_name = "LEVEL", env = "ECOSORT_LOG", default_value = "info")]
  pub log_level: String,

  /// 启动时立即加载模型
  #[arg(long)]
  pub preload: bool,
}
