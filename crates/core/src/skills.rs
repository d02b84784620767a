use crate::stats::Stat;

/// Which caller-supplied index an assignment skill copies into its stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource {
    Character,
    UpgradePoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeMode {
    Increment(u32),
    Assign(IndexSource),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillRule {
    pub name: &'static str,
    pub stat: Stat,
    pub mode: UpgradeMode,
}

const fn inc(name: &'static str, stat: Stat, delta: u32) -> SkillRule {
    SkillRule { name, stat, mode: UpgradeMode::Increment(delta) }
}

const fn assign(name: &'static str, stat: Stat, source: IndexSource) -> SkillRule {
    SkillRule { name, stat, mode: UpgradeMode::Assign(source) }
}

/// Upgrade vocabulary. Names are lowercase; lookups fold case first.
/// The deltas are game balance, change them deliberately.
pub const SKILL_TABLE: &[SkillRule] = &[
    inc("speed", Stat::Speed, 30),
    inc("firerate", Stat::FireRate, 1),
    inc("reload", Stat::Reload, 1),
    inc("damage1", Stat::Damage1, 1),
    inc("damage2", Stat::Damage2, 1),
    inc("damage3", Stat::Damage3, 1),
    inc("jump", Stat::JumpHeight, 1),
    inc("magsize", Stat::MagSize, 1),
    inc("ammo", Stat::Ammo, 1),
    inc("firedamage", Stat::FireDamage, 1),
    inc("icedamage", Stat::IceDamage, 1),
    inc("shockdamage", Stat::ShockDamage, 1),
    inc("zoom", Stat::Zoom, 1),
    inc("armor", Stat::Armor, 1),
    inc("transferrate", Stat::TransferRate, 1),
    inc("maxrank", Stat::MaxRank, 1),
    assign("epoint", Stat::EPoint, IndexSource::UpgradePoint),
    assign("character1", Stat::Character1, IndexSource::Character),
    assign("character2", Stat::Character2, IndexSource::Character),
    assign("character3", Stat::Character3, IndexSource::Character),
    assign("skin", Stat::Skin, IndexSource::Character),
];

pub fn lookup(skill_name: &str) -> Option<&'static SkillRule> {
    let folded = skill_name.to_ascii_lowercase();
    SKILL_TABLE.iter().find(|rule| rule.name == folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_lowercase_and_unique() {
        let mut names: Vec<&str> = SKILL_TABLE.iter().map(|r| r.name).collect();
        for name in &names {
            assert_eq!(*name, name.to_ascii_lowercase());
        }
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SKILL_TABLE.len());
    }

    #[test]
    fn each_stat_has_at_most_one_skill() {
        let mut stats: Vec<Stat> = SKILL_TABLE.iter().map(|r| r.stat).collect();
        stats.sort_unstable();
        stats.dedup();
        assert_eq!(stats.len(), SKILL_TABLE.len());
    }

    #[test]
    fn only_speed_moves_by_thirty() {
        for rule in SKILL_TABLE {
            if let UpgradeMode::Increment(delta) = rule.mode {
                let expected = if rule.stat == Stat::Speed { 30 } else { 1 };
                assert_eq!(delta, expected, "{}", rule.name);
            }
        }
    }

    #[test]
    fn match_counters_are_not_purchasable() {
        assert!(SKILL_TABLE.iter().all(|r| r.stat != Stat::Wins && r.stat != Stat::Losses));
    }

    #[test]
    fn lookup_folds_case() {
        assert_eq!(lookup("SPEED"), lookup("speed"));
        assert_eq!(lookup("EPoint").map(|r| r.stat), Some(Stat::EPoint));
        assert!(lookup("unknownskill").is_none());
        assert!(lookup("").is_none());
    }
}
