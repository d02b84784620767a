//! Conversion between stored field maps and [`PlayerRecord`], plus the
//! single upgrade rule applied between decode and encode.
//!
//! Every function here is total: malformed history decodes to zeros and an
//! unknown skill leaves the record alone, so an upgrade is never blocked by
//! bad data already in the store.

use crate::field_map::{KEY_FIELD, RawFieldMap};
use crate::ids::UserId;
use crate::skills::{self, IndexSource, SkillRule, UpgradeMode};
use crate::stats::{PlayerRecord, Stat};

/// Reads every fixed stat from `raw`. Missing or unparseable entries,
/// negatives included, become 0. Unknown entries are ignored.
pub fn decode(raw: &RawFieldMap) -> PlayerRecord {
    let mut record = PlayerRecord::new();
    for stat in Stat::ALL {
        let value = raw
            .get(stat.as_str())
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(0);
        record.set(stat, value);
    }
    record
}

/// Emits the key plus the full fixed field set as decimal strings.
pub fn encode(user_id: &UserId, record: &PlayerRecord) -> RawFieldMap {
    let mut raw = RawFieldMap::new();
    raw.insert(KEY_FIELD, user_id.as_str());
    for (stat, value) in record.iter() {
        raw.insert(stat.as_str(), value.to_string());
    }
    raw
}

/// Applies the named skill to `record` in place and returns the matched
/// rule, or `None` (record untouched) when the name is not in the table.
pub fn apply_upgrade(
    record: &mut PlayerRecord,
    skill_name: &str,
    character_index: u32,
    upgrade_point_index: u32,
) -> Option<&'static SkillRule> {
    let rule = skills::lookup(skill_name)?;
    match rule.mode {
        UpgradeMode::Increment(delta) => record.increment(rule.stat, delta),
        UpgradeMode::Assign(IndexSource::Character) => record.set(rule.stat, character_index),
        UpgradeMode::Assign(IndexSource::UpgradePoint) => {
            record.set(rule.stat, upgrade_point_index)
        }
    }
    Some(rule)
}
