// 该文件是 EcoSort （垃圾分类） 项目的一部分。
// src/category/footprint.rs - 各类别的碳排放说明
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

use super::Category;

/// 类别对应的静态展示信息
#[derive(Debug, PartialEq, Eq)]
pub struct CategoryFootprint {
  /// 结果标题中使用的大写名称
  pub heading: &'static str,
  pub title: &'static str,
  /// 生产每千克材料的 CO₂ 排放
  pub co2_per_kg: &'static str,
  pub narrative: &'static str,
  pub tip: &'static str,
  /// 相关的可持续发展目标（SDG）图片，路径相对于 `sdg goals/` 资源目录
  pub sdg_images: &'static [&'static str],
}

impl CategoryFootprint {
  pub fn summary(&self) -> String {
    format!("The image is classified as {}.", self.heading)
  }
}

const SDG_3: &str = "sdg goals/3.png";
const SDG_6: &str = "sdg goals/6.jpg";
const SDG_12: &str = "sdg goals/12.png";
const SDG_13: &str = "sdg goals/13.png";
const SDG_14: &str = "sdg goals/14.png";
const SDG_15: &str = "sdg goals/15.png";

static FOOTPRINTS: [CategoryFootprint; Category::COUNT] = [
  CategoryFootprint {
    heading: "CARDBOARD",
    title: "♻️ Cardboard",
    co2_per_kg: "0.94 kg",
    narrative: "Producing cardboard emits around 0.94 kg of CO₂ per kilogram, yet it is one of \
      the most recyclable materials. Recycling cardboard saves trees, water and about 75% of the \
      energy needed to make new board, so properly disposed cardboard has a relatively low impact.",
    tip: "Flatten boxes before recycling to save space and improve efficiency.",
    sdg_images: &[SDG_12, SDG_13, SDG_14, SDG_15],
  },
  CategoryFootprint {
    heading: "PLASTIC",
    title: "🧴 Plastic",
    co2_per_kg: "6 kg",
    narrative: "Plastic manufacturing emits roughly 6 kg of CO₂ per kilogram, one of the highest \
      of any common material. It persists for hundreds of years and only about 9% of all plastic \
      ever gets recycled, so cutting single-use plastic is the most effective step.",
    tip: "Ditch single-use plastics. Switch to cloth bags and steel bottles.",
    sdg_images: &[SDG_6, SDG_12, SDG_14, SDG_15],
  },
  CategoryFootprint {
    heading: "GLASS",
    title: "🍶 Glass",
    co2_per_kg: "0.85 kg",
    narrative: "Glass production emits about 0.85 kg of CO₂ per kilogram and its weight raises \
      transport emissions. Glass can be recycled endlessly without losing quality: one recycled \
      bottle saves enough energy to power a light bulb for four hours.",
    tip: "Reuse jars and bottles at home.",
    sdg_images: &[SDG_12, SDG_14],
  },
  CategoryFootprint {
    heading: "METAL",
    title: "🥫 Metal (e.g., aluminum)",
    co2_per_kg: "11–17 kg",
    narrative: "Producing aluminum from raw ore emits 11–17 kg of CO₂ per kilogram. Recycled metal \
      cuts energy use and emissions by up to 95%, so metal is worth recycling every time.",
    tip: "Clean your cans before recycling for better processing.",
    sdg_images: &[SDG_3, SDG_6, SDG_12, SDG_14],
  },
  CategoryFootprint {
    heading: "PAPER",
    title: "📄 Paper",
    co2_per_kg: "1 kg",
    narrative: "Paper emits about 1 kg of CO₂ per kilogram during production, mostly from pulping \
      and bleaching. It is biodegradable but still drives deforestation; recycling reduces \
      emissions, saves water and helps preserve forests.",
    tip: "Reuse and recycle. Prefer digital when possible.",
    sdg_images: &[SDG_6, SDG_12, SDG_14, SDG_15],
  },
  CategoryFootprint {
    heading: "TRASH",
    title: "🗑️ Trash (Mixed Waste)",
    co2_per_kg: "varies",
    narrative: "Unsorted trash usually ends up in landfills where it decomposes anaerobically and \
      releases methane, a greenhouse gas 25x more potent than CO₂. The footprint depends on the \
      material mix but the environmental cost is always high.",
    tip: "Segregate waste to improve recycling and composting.",
    sdg_images: &[SDG_6, SDG_12, SDG_14, SDG_15],
  },
];

impl Category {
  pub fn footprint(self) -> &'static CategoryFootprint {
    &FOOTPRINTS[self.index()]
  }
}
