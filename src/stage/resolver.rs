//! 阶段解析器：计算某个进度阶段的生效装备
//!
//! 装备从第 0 阶段起逐阶段向后叠加（左折叠，同槽位后写覆盖前写）；
//! 阶段名、属性、宠物只取所选阶段自身，不参与继承。
//! 数据模型中“缺省”是唯一的空值信号，因此某槽位一旦在前序阶段赋值，
//! 后续阶段只能覆盖、无法清空。

use std::collections::BTreeMap;
use serde::Serialize;
use tracing::debug;

use crate::catalog::model::{BuildStage, EquipmentSlot};
use crate::utils::StatLine;

/// 生效阶段（借用自构建的阶段列表）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveStage<'a> {
    /// 越界回退后的实际阶段下标
    pub index: usize,
    pub label: &'a str,
    pub attributes: &'a [String],
    pub pet: Option<&'a [String]>,
    /// 继承合并后的装备
    pub equipment: BTreeMap<EquipmentSlot, &'a str>,
}

impl<'a> EffectiveStage<'a> {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&'a str> {
        self.equipment.get(&slot).copied()
    }

    /// 按固定顺序遍历全部槽位，未配置的为 None
    pub fn slots(&self) -> impl Iterator<Item = (EquipmentSlot, Option<&'a str>)> + '_ {
        EquipmentSlot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }

    pub fn stat_lines(&self) -> Vec<StatLine<'a>> {
        self.attributes.iter().map(|raw| StatLine::parse(raw)).collect()
    }
}

/// 阶段解析器
pub struct StageResolver;

impl StageResolver {
    /// 解析指定阶段
    ///
    /// 下标越界（负数或不小于阶段数）时按第 0 阶段处理；阶段列表为空时返回 None。
    pub fn resolve<I>(stages: &[BuildStage], index: I) -> Option<EffectiveStage<'_>>
    where
        I: TryInto<usize>,
    {
        let index = index
            .try_into()
            .ok()
            .filter(|&i| i < stages.len())
            .unwrap_or(0);
        let selected = stages.get(index)?;

        let equipment = stages[..=index].iter().fold(BTreeMap::new(), |mut acc, stage| {
            for (slot, item) in &stage.equipment {
                acc.insert(*slot, item.as_str());
            }
            acc
        });

        debug!("阶段解析：{} (#{})，生效槽位{}个", selected.label, index, equipment.len());

        Some(EffectiveStage {
            index,
            label: &selected.label,
            attributes: &selected.attributes,
            pet: selected.pet.as_deref(),
            equipment,
        })
    }
}

/// 简化接口：等价于 `StageResolver::resolve`
pub fn resolve_stage<I>(stages: &[BuildStage], index: I) -> Option<EffectiveStage<'_>>
where
    I: TryInto<usize>,
{
    StageResolver::resolve(stages, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::Equipment;

    fn stage(label: &str, equipment: &[(EquipmentSlot, &str)]) -> BuildStage {
        BuildStage {
            label: label.to_string(),
            attributes: vec![format!("INT {}", label)],
            equipment: equipment
                .iter()
                .map(|(slot, item)| (*slot, item.to_string()))
                .collect::<Equipment>(),
            pet: None,
        }
    }

    fn abc() -> Vec<BuildStage> {
        vec![
            stage("A", &[(EquipmentSlot::Weapon, "Sword")]),
            stage("B", &[(EquipmentSlot::Shield, "Buckler")]),
            stage("C", &[(EquipmentSlot::Weapon, "Axe")]),
        ]
    }

    #[test]
    fn test_equipment_accumulates_forward() {
        let stages = abc();

        let b = resolve_stage(&stages, 1).unwrap();
        assert_eq!(b.label, "B");
        assert_eq!(b.get(EquipmentSlot::Weapon), Some("Sword"));
        assert_eq!(b.get(EquipmentSlot::Shield), Some("Buckler"));

        let c = resolve_stage(&stages, 2).unwrap();
        assert_eq!(c.get(EquipmentSlot::Weapon), Some("Axe"));
        assert_eq!(c.get(EquipmentSlot::Shield), Some("Buckler"));
        assert_eq!(c.equipment.len(), 2);
    }

    #[test]
    fn test_later_stages_do_not_leak_backwards() {
        let stages = abc();
        let a = resolve_stage(&stages, 0).unwrap();
        assert_eq!(a.get(EquipmentSlot::Weapon), Some("Sword"));
        assert_eq!(a.get(EquipmentSlot::Shield), None);
    }

    #[test]
    fn test_out_of_range_falls_back_to_first_stage() {
        let stages = abc();
        let first = resolve_stage(&stages, 0usize).unwrap();

        let too_far = resolve_stage(&stages, 99usize).unwrap();
        assert_eq!(too_far, first);
        assert_eq!(too_far.index, 0);

        let negative = resolve_stage(&stages, -1i32).unwrap();
        assert_eq!(negative, first);

        let at_len = resolve_stage(&stages, stages.len()).unwrap();
        assert_eq!(at_len, first);
    }

    #[test]
    fn test_non_equipment_fields_come_from_selected_stage_only() {
        let mut stages = abc();
        stages[0].pet = Some(vec!["Poring".to_string()]);

        let b = resolve_stage(&stages, 1).unwrap();
        assert_eq!(b.attributes, &["INT B".to_string()]);
        assert!(b.pet.is_none());

        let a = resolve_stage(&stages, 0).unwrap();
        assert_eq!(a.pet, Some(&["Poring".to_string()][..]));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let stages = abc();
        let before = stages.clone();
        let _ = resolve_stage(&stages, 2);
        assert_eq!(stages, before);
    }

    #[test]
    fn test_empty_stage_list() {
        assert!(resolve_stage(&[], 0).is_none());
    }

    #[test]
    fn test_slots_iterate_in_display_order() {
        let stages = abc();
        let c = resolve_stage(&stages, 2).unwrap();
        let slots: Vec<_> = c.slots().collect();
        assert_eq!(slots.len(), EquipmentSlot::ALL.len());
        assert_eq!(slots[0], (EquipmentSlot::Head, None));
        assert_eq!(slots[4], (EquipmentSlot::Weapon, Some("Axe")));
        assert_eq!(slots[5], (EquipmentSlot::Shield, Some("Buckler")));

        let stats = c.stat_lines();
        assert_eq!(stats[0].name, "INT");
        assert_eq!(stats[0].value, "C");
    }
}
