// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/category/labels.rs - 模型标签文件解析
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

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::Category;

#[derive(Error, Debug)]
pub enum LabelParseError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("第 {line} 行格式错误，期望 `<序号> <类别>`: {content:?}")]
  Malformed { line: usize, content: String },
  #[error("第 {line} 行类别未知: {name}")]
  UnknownCategory { line: usize, name: String },
  #[error("第 {line} 行序号越界: {index}")]
  IndexOutOfRange { line: usize, index: usize },
  #[error("第 {line} 行序号重复: {index}")]
  DuplicateIndex { line: usize, index: usize },
  #[error("第 {line} 行类别重复: {category}")]
  DuplicateCategory { line: usize, category: Category },
  #[error("缺少序号 {0} 对应的类别")]
  MissingIndex(usize),
}

/// 模型输出下标到类别的映射
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMap {
  order: [Category; Category::COUNT],
}

static STANDARD_LABELS: LabelMap = LabelMap::standard();

impl Default for LabelMap {
  fn default() -> Self {
    Self::standard()
  }
}

impl LabelMap {
  pub const fn standard() -> Self {
    Self {
      order: Category::ALL,
    }
  }

  pub fn standard_ref() -> &'static Self {
    &STANDARD_LABELS
  }

  /// 解析 `<序号> <类别>` 格式的标签文本，例如 `0 cardboard`
  pub fn parse(text: &str) -> Result<Self, LabelParseError> {
    let mut slots: [Option<Category>; Category::COUNT] = [None; Category::COUNT];

    for (line_idx, raw) in text.lines().enumerate() {
      let line = line_idx + 1;
      let content = raw.trim();
      if content.is_empty() {
        continue;
      }

      let malformed = || LabelParseError::Malformed {
        line,
        content: content.to_string(),
      };

      let (index, name) = content.split_once(char::is_whitespace).ok_or_else(malformed)?;
      let index: usize = index.parse().map_err(|_| malformed())?;
      let category: Category = name
        .parse()
        .map_err(|_| LabelParseError::UnknownCategory {
          line,
          name: name.trim().to_string(),
        })?;

      if slots.contains(&Some(category)) {
        return Err(LabelParseError::DuplicateCategory { line, category });
      }
      let slot = slots
        .get_mut(index)
        .ok_or(LabelParseError::IndexOutOfRange { line, index })?;
      if slot.is_some() {
        return Err(LabelParseError::DuplicateIndex { line, index });
      }
      *slot = Some(category);
    }

    let mut order = Category::ALL;
    for (index, slot) in slots.into_iter().enumerate() {
      order[index] = slot.ok_or(LabelParseError::MissingIndex(index))?;
    }

    debug!("标签映射: {:?}", order);
    Ok(Self { order })
  }

  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LabelParseError> {
    let text = std::fs::read_to_string(path)?;
    Self::parse(&text)
  }

  pub fn decode(&self, index: usize) -> Option<Category> {
    self.order.get(index).copied()
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const TEACHABLE_LABELS: &str = "0 cardboard\n1 plastic\n2 glass\n3 metal\n4 paper\n5 trash\n";

  #[test]
  fn test_parse_standard_file() {
    let labels = LabelMap::parse(TEACHABLE_LABELS).unwrap();
    assert_eq!(labels, LabelMap::standard());
    assert_eq!(labels.decode(2), Some(Category::Glass));
    assert_eq!(labels.decode(6), None);
  }

  #[test]
  fn test_parse_tolerates_crlf_and_blank_lines() {
    let text = "0 Cardboard\r\n\r\n1 plastic\r\n2 glass\r\n3 metal\r\n4 paper\r\n5 trash";
    assert_eq!(LabelMap::parse(text).unwrap(), LabelMap::standard());
  }

  #[test]
  fn test_parse_follows_file_order() {
    let text = "1 cardboard\n0 plastic\n2 glass\n3 metal\n5 paper\n4 trash\n";
    let labels = LabelMap::parse(text).unwrap();
    assert_eq!(labels.decode(0), Some(Category::Plastic));
    assert_eq!(labels.decode(1), Some(Category::Cardboard));
    assert_eq!(labels.decode(4), Some(Category::Trash));
  }

  #[test]
  fn test_parse_rejects_bad_files() {
    assert!(matches!(
      LabelMap::parse("cardboard\n"),
      Err(LabelParseError::Malformed { line: 1, .. })
    ));
    assert!(matches!(
      LabelMap::parse("0 cardboard\n1 styrofoam\n"),
      Err(LabelParseError::UnknownCategory { line: 2, .. })
    ));
    assert!(matches!(
      LabelMap::parse("7 cardboard\n"),
      Err(LabelParseError::IndexOutOfRange { index: 7, .. })
    ));
    assert!(matches!(
      LabelMap::parse("0 cardboard\n0 plastic\n"),
      Err(LabelParseError::DuplicateIndex { index: 0, .. })
    ));
    assert!(matches!(
      LabelMap::parse("0 cardboard\n1 cardboard\n"),
      Err(LabelParseError::DuplicateCategory {
        category: Category::Cardboard,
        ..
      })
    ));
    assert!(matches!(
      LabelMap::parse("0 cardboard\n1 plastic\n2 glass\n3 metal\n4 paper\n"),
      Err(LabelParseError::MissingIndex(5))
    ));
  }
}
