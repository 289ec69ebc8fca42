// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/output/draw.rs - 分类结果可视化
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

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::{
  drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut},
  rect::Rect,
};

use crate::{category::Category, model::PredictionResult};

// 文本渲染常量
const LABEL_FONT_SIZE: f32 = 20.0;
const LABEL_TEXT_HEIGHT: u32 = 24;
const LABEL_TEXT_PADDING: i32 = 2;
const BORDER_THICKNESS: u32 = 2;
const TEXT_COLOR: [u8; 3] = [255, 255, 255];

/// 每个类别的标注颜色
pub fn category_color(category: Category) -> [u8; 3] {
  match category {
    Category::Cardboard => [161, 110, 60],
    Category::Plastic => [33, 150, 243],
    Category::Glass => [0, 150, 136],
    Category::Metal => [96, 125, 139],
    Category::Paper => [139, 195, 74],
    Category::Trash => [121, 85, 72],
  }
}

pub struct Draw {
  font_size: f32,
  label_text_height: u32,
  font: Option<FontVec>,
}

impl Default for Draw {
  fn default() -> Self {
    Self {
      font_size: LABEL_FONT_SIZE,
      label_text_height: LABEL_TEXT_HEIGHT,
      font: None,
    }
  }
}

impl Draw {
  /// 没有字体时只绘制颜色标记，不绘制文字
  pub fn with_font(mut self, font: FontVec) -> Self {
    self.font = Some(font);
    self
  }

  pub fn has_font(&self) -> bool {
    self.font.is_some()
  }

  /// 图像四周加类别颜色的边框，顶部加一条标签栏
  pub fn draw_prediction(&self, image: &mut RgbImage, result: &PredictionResult) {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
      return;
    }
    let color = Rgb(category_color(result.label()));

    for thickness in 0..BORDER_THICKNESS.min(w / 2).min(h / 2) {
      let rect = Rect::at(thickness as i32, thickness as i32)
        .of_size(w - 2 * thickness, h - 2 * thickness);
      draw_hollow_rect_mut(image, rect, color);
    }

    let banner_height = self.label_text_height.min(h);
    draw_filled_rect_mut(image, Rect::at(0, 0).of_size(w, banner_height), color);

    if let Some(font) = &self.font {
      let label = format!("{} {:.2}", result.label(), result.confidence());
      draw_text_mut(
        image,
        Rgb(TEXT_COLOR),
        LABEL_TEXT_PADDING * 2,
        LABEL_TEXT_PADDING,
        PxScale::from(self.font_size),
        font,
        &label,
      );
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_draw_banner_and_border() {
    let mut image = RgbImage::new(64, 48);
    Draw::default().draw_prediction(&mut image, &PredictionResult::new(Category::Glass, 0.7));

    let color = Rgb(category_color(Category::Glass));
    assert_eq!(image.get_pixel(32, 10), &color);
    assert_eq!(image.get_pixel(0, 40), &color);
    assert_eq!(image.get_pixel(63, 47), &color);
    assert_eq!(image.get_pixel(32, 40), &Rgb([0, 0, 0]));
  }

  #[test]
  fn test_draw_on_tiny_image() {
    let mut image = RgbImage::new(1, 1);
    Draw::default().draw_prediction(&mut image, &PredictionResult::new(Category::Trash, 0.1));
    assert_eq!(image.get_pixel(0, 0), &Rgb(category_color(Category::Trash)));
  }

  #[test]
  fn test_category_colors_are_distinct() {
    for a in Category::ALL {
      for b in Category::ALL {
        if a != b {
          assert_ne!(category_color(a), category_color(b));
        }
      }
    }
  }
}
