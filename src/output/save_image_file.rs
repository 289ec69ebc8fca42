// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/output/save_image_file.rs - 保存标注后的图像文件
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

use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use image::{DynamicImage, RgbImage};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  model::PredictionResult,
  output::{Render, draw::Draw},
  url_file_path,
};

pub struct SaveImageFileOutput {
  path: PathBuf,
  draw: Draw,
}

#[derive(Error, Debug)]
pub enum SaveImageFileError {
  #[error("I/O 错误: {0}")]
  IoError(std::io::Error),
  #[error("图像错误: {0}")]
  ImageError(image::ImageError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("字体错误: {0}")]
  FontError(String),
}

impl FromUrlWithScheme for SaveImageFileOutput {
  const SCHEME: &'static str = "image";
}

impl FromUrl for SaveImageFileOutput {
  type Error = SaveImageFileError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(SaveImageFileError::SchemeMismatch(format!(
        "期望保存方式 '{}', 实际保存方式 '{}'",
        Self::SCHEME,
        uri.scheme()
      )));
    }

    let mut draw = Draw::default();
    if let Some((_, font_path)) = uri.query_pairs().find(|(k, _)| k == "font") {
      draw = draw.with_font(load_font(Path::new(font_path.as_ref()))?);
    }

    Ok(SaveImageFileOutput {
      path: url_file_path(uri),
      draw,
    })
  }
}

fn load_font(path: &Path) -> Result<FontVec, SaveImageFileError> {
  info!("加载字体文件: {}", path.display());
  let data = std::fs::read(path).map_err(SaveImageFileError::IoError)?;
  FontVec::try_from_vec(data)
    .map_err(|e| SaveImageFileError::FontError(format!("{}: {}", path.display(), e)))
}

impl SaveImageFileOutput {
  pub fn new<P: Into<PathBuf>>(path: P) -> Self {
    Self {
      path: path.into(),
      draw: Draw::default(),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn save_image(&self, image: RgbImage) -> Result<(), SaveImageFileError> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent).map_err(SaveImageFileError::IoError)?;
    }

    image
      .save(&self.path)
      .map_err(SaveImageFileError::ImageError)?;

    warn!("保存图像到文件: {}", self.path.display());

    Ok(())
  }
}

impl Render<DynamicImage, PredictionResult> for SaveImageFileOutput {
  type Error = SaveImageFileError;

  fn render_result(
    &self,
    frame: &DynamicImage,
    result: &PredictionResult,
  ) -> Result<(), Self::Error> {
    let mut image = frame.to_rgb8();
    self.draw.draw_prediction(&mut image, result);
    self.save_image(image)
  }
}
