// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/output.rs - 输出定义
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
use thiserror::Error;
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, model::PredictionResult};

pub trait Render<Frame, Output>: Sized {
  type Error;
  fn render_result(&self, frame: &Frame, result: &Output) -> Result<(), Self::Error>;
}

mod console;
pub use self::console::{ConsoleFormat, ConsoleOutput, ConsoleOutputError};

#[cfg(feature = "save_image_file")]
pub mod draw;

#[cfg(feature = "save_image_file")]
mod save_image_file;
#[cfg(feature = "save_image_file")]
pub use self::save_image_file::{SaveImageFileError, SaveImageFileOutput};

#[derive(Error, Debug)]
pub enum OutputError {
  #[error("控制台输出错误: {0}")]
  ConsoleOutputError(#[from] ConsoleOutputError),
  #[cfg(feature = "save_image_file")]
  #[error("保存图像文件错误: {0}")]
  SaveImageFileError(#[from] SaveImageFileError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

pub enum OutputWrapper {
  Console(ConsoleOutput),
  #[cfg(feature = "save_image_file")]
  SaveImageFile(SaveImageFileOutput),
}

impl FromUrl for OutputWrapper {
  type Error = OutputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    match url.scheme() {
      ConsoleOutput::SCHEME => Ok(OutputWrapper::Console(ConsoleOutput::from_url(url)?)),
      #[cfg(feature = "save_image_file")]
      SaveImageFileOutput::SCHEME => Ok(OutputWrapper::SaveImageFile(
        SaveImageFileOutput::from_url(url)?,
      )),
      other => Err(OutputError::SchemeMismatch(other.to_string())),
    }
  }
}

impl Render<DynamicImage, PredictionResult> for OutputWrapper {
  type Error = OutputError;

  fn render_result(
    &self,
    frame: &DynamicImage,
    result: &PredictionResult,
  ) -> Result<(), Self::Error> {
    match self {
      OutputWrapper::Console(output) => output
        .render_result(frame, result)
        .map_err(OutputError::from),
      #[cfg(feature = "save_image_file")]
      OutputWrapper::SaveImageFile(output) => output
        .render_result(frame, result)
        .map_err(OutputError::from),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_dispatch_by_scheme() {
    let console = OutputWrapper::from_url(&Url::parse("console:?format=json").unwrap()).unwrap();
    assert!(matches!(console, OutputWrapper::Console(_)));

    let err = OutputWrapper::from_url(&Url::parse("rtsp://localhost/live").unwrap());
    assert!(matches!(err, Err(OutputError::SchemeMismatch(s)) if s == "rtsp"));
  }

  #[cfg(feature = "save_image_file")]
  #[test]
  fn test_dispatch_image_file() {
    let output = OutputWrapper::from_url(&Url::parse("image:///tmp/result.png").unwrap()).unwrap();
    assert!(matches!(output, OutputWrapper::SaveImageFile(_)));
  }
}
