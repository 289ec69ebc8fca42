// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/category.rs - 垃圾类别定义
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

use std::{fmt, str::FromStr};

use thiserror::Error;

mod footprint;
mod labels;

pub use self::footprint::CategoryFootprint;
pub use self::labels::{LabelMap, LabelParseError};

/// 垃圾材质类别
///
/// 枚举顺序即模型输出向量的下标顺序，不能单独调整。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
  Cardboard = 0,
  Plastic = 1,
  Glass = 2,
  Metal = 3,
  Paper = 4,
  Trash = 5,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("未知的垃圾类别: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
  pub const COUNT: usize = 6;

  pub const ALL: [Category; Self::COUNT] = [
    Category::Cardboard,
    Category::Plastic,
    Category::Glass,
    Category::Metal,
    Category::Paper,
    Category::Trash,
  ];

  pub fn index(self) -> usize {
    self as usize
  }

  pub fn from_index(index: usize) -> Option<Self> {
    Self::ALL.get(index).copied()
  }

  /// 小写类别名，与标签文件中的写法一致
  pub fn name(self) -> &'static str {
    match self {
      Category::Cardboard => "cardboard",
      Category::Plastic => "plastic",
      Category::Glass => "glass",
      Category::Metal => "metal",
      Category::Paper => "paper",
      Category::Trash => "trash",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Category {
  type Err = UnknownCategory;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let name = s.trim();
    Self::ALL
      .into_iter()
      .find(|category| category.name().eq_ignore_ascii_case(name))
      .ok_or_else(|| UnknownCategory(name.to_string()))
  }
}
