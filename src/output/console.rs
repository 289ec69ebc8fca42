// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/output/console.rs - 控制台结果输出
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

use std::io::Write;

use image::DynamicImage;
use serde_json::json;
use thiserror::Error;
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, model::PredictionResult, output::Render};

#[derive(Error, Debug)]
pub enum ConsoleOutputError {
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("未知的输出格式: {0}")]
  UnknownFormat(String),
  #[error("JSON 错误: {0}")]
  JsonError(#[from] serde_json::Error),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleFormat {
  #[default]
  Text,
  Json,
}

/// 把分类结果和碳排放说明打印到标准输出
#[derive(Debug, Clone, Default)]
pub struct ConsoleOutput {
  format: ConsoleFormat,
}

impl FromUrlWithScheme for ConsoleOutput {
  const SCHEME: &'static str = "console";
}

impl FromUrl for ConsoleOutput {
  type Error = ConsoleOutputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(ConsoleOutputError::SchemeMismatch(format!(
        "期望输出方式 '{}', 实际输出方式 '{}'",
        Self::SCHEME,
        url.scheme()
      )));
    }

    let format = match url.query_pairs().find(|(k, _)| k == "format") {
      None => ConsoleFormat::Text,
      Some((_, v)) => match &*v {
        "text" => ConsoleFormat::Text,
        "json" => ConsoleFormat::Json,
        other => return Err(ConsoleOutputError::UnknownFormat(other.to_string())),
      },
    };

    Ok(ConsoleOutput { format })
  }
}

impl ConsoleOutput {
  pub fn new(format: ConsoleFormat) -> Self {
    Self { format }
  }

  pub fn format(&self) -> ConsoleFormat {
    self.format
  }

  pub fn report(&self, result: &PredictionResult) -> Result<String, ConsoleOutputError> {
    let category = result.label();
    let footprint = category.footprint();

    match self.format {
      ConsoleFormat::Json => {
        let document = json!({
          "label": category.name(),
          "index": category.index(),
          "confidence": result.confidence(),
          "summary": footprint.summary(),
          "carbon_footprint": {
            "title": footprint.title,
            "co2_per_kg": footprint.co2_per_kg,
            "narrative": footprint.narrative,
            "tip": footprint.tip,
          },
          "sdg_images": footprint.sdg_images,
        });
        Ok(serde_json::to_string_pretty(&document)?)
      }
      ConsoleFormat::Text => {
        let mut lines = vec![
          "🧪 Classification Result".to_string(),
          footprint.summary(),
          format!("Confidence Score: {:.2}%", result.confidence() * 100.0),
          String::new(),
          "📊 Carbon Emission Info".to_string(),
          footprint.title.to_string(),
          footprint.narrative.to_string(),
          format!("🌍 Sustainable Tip: {}", footprint.tip),
          String::new(),
          "Related Sustainable Development Goals:".to_string(),
        ];
        lines.extend(footprint.sdg_images.iter().map(|path| format!("  - {}", path)));
        Ok(lines.join("\n"))
      }
    }
  }
}

impl Render<DynamicImage, PredictionResult> for ConsoleOutput {
  type Error = ConsoleOutputError;

  fn render_result(
    &self,
    _frame: &DynamicImage,
    result: &PredictionResult,
  ) -> Result<(), Self::Error> {
    let report = self.report(result)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", report)?;
    Ok(())
  }
}
