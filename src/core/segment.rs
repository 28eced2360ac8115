/// Segmenter — splits an ability list into contiguous same-trigger runs.

use crate::schema::ability::{AbilityRecord, Target, Trigger};

/// Coarse trigger partition used for grouping.
///
/// All passive records share one category; active triggers group only
/// with the exact same trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerCategory {
    Passive,
    Active(Trigger),
}

impl TriggerCategory {
    pub fn of(trigger: Trigger) -> Self {
        if trigger.is_passive() {
            Self::Passive
        } else {
            Self::Active(trigger)
        }
    }
}

/// One record within a segment, with its neighbourhood precomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentEntry<'a> {
    pub record: &'a AbilityRecord,
    /// Index within the owning segment.
    pub position: usize,
    /// Target of the preceding record in the same segment.
    pub previous_target: Option<Target>,
    /// The next record in the segment exists and has the exact same trigger.
    pub continues: bool,
}

impl SegmentEntry<'_> {
    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    /// The target noun must be spelled out: the record has a target and it
    /// differs from the one just mentioned.
    pub fn mentions_target(&self) -> bool {
        self.record.target != Target::None
            && self.previous_target != Some(self.record.target)
    }
}

/// A maximal run of records sharing one trigger category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub category: TriggerCategory,
    pub entries: Vec<SegmentEntry<'a>>,
}

impl Segment<'_> {
    /// Never zero: segments are only built from non-empty runs.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Split `records` into segments, preserving order.
pub fn segment(records: &[AbilityRecord]) -> Vec<Segment<'_>> {
    let mut segments: Vec<Segment<'_>> = Vec::new();
    let mut start = 0;

    while start < records.len() {
        let category = TriggerCategory::of(records[start].trigger);
        let run = records[start..]
            .iter()
            .take_while(|r| TriggerCategory::of(r.trigger) == category)
            .count();
        let members = &records[start..start + run];

        let entries = members
            .iter()
            .enumerate()
            .map(|(position, record)| SegmentEntry {
                record,
                position,
                previous_target: position.checked_sub(1).map(|p| members[p].target),
                continues: members
                    .get(position + 1)
                    .is_some_and(|next| next.trigger == record.trigger),
            })
            .collect();

        segments.push(Segment { category, entries });
        start += run;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ability::Effect;

    fn rec(trigger: Trigger, target: Target, effect: Effect) -> AbilityRecord {
        AbilityRecord::new(trigger, target, effect, 1)
    }

    #[test]
    fn empty_input_has_no_segments() {
        assert!(segment(&[]).is_empty());
    }

    #[test]
    fn same_active_trigger_groups() {
        let records = [
            rec(Trigger::OnSummon, Target::FrontEnemy, Effect::Damage),
            rec(Trigger::OnSummon, Target::FrontEnemy, Effect::BuffAttack),
        ];
        let segments = segment(&records);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].category, TriggerCategory::Active(Trigger::OnSummon));
        assert_eq!(segments[0].len(), 2);
    }

    #[test]
    fn different_active_triggers_split() {
        let records = [
            rec(Trigger::OnSummon, Target::FrontEnemy, Effect::Damage),
            rec(Trigger::OnAttack, Target::FrontEnemy, Effect::Damage),
        ];
        let segments = segment(&records);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].category, TriggerCategory::Active(Trigger::OnAttack));
        assert!(segments.iter().all(|s| s.entries[0].is_first()));
    }

    #[test]
    fn passives_split_by_active_record() {
        let records = [
            AbilityRecord::passive(Effect::GrantTaunt, 0),
            rec(Trigger::OnDeath, Target::Player, Effect::DrawCard),
            AbilityRecord::passive(Effect::GrantPierce, 0),
        ];
        let segments = segment(&records);
        let categories: Vec<_> = segments.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![
                TriggerCategory::Passive,
                TriggerCategory::Active(Trigger::OnDeath),
                TriggerCategory::Passive,
            ]
        );
    }

    #[test]
    fn entries_know_their_neighbours() {
        let records = [
            rec(Trigger::OnTurnEnd, Target::FrontEnemy, Effect::Damage),
            rec(Trigger::OnTurnEnd, Target::FrontEnemy, Effect::Destroy),
            rec(Trigger::OnTurnEnd, Target::Player, Effect::DrawCard),
        ];
        let segments = segment(&records);
        let entries = &segments[0].entries;

        assert_eq!(entries[0].previous_target, None);
        assert_eq!(entries[1].previous_target, Some(Target::FrontEnemy));
        assert_eq!(entries[2].previous_target, Some(Target::FrontEnemy));

        assert!(entries[0].continues);
        assert!(entries[1].continues);
        assert!(!entries[2].continues);

        assert!(entries[0].mentions_target());
        assert!(!entries[1].mentions_target());
        assert!(entries[2].mentions_target());
    }

    #[test]
    fn last_entry_before_new_segment_does_not_continue() {
        let records = [
            rec(Trigger::OnSummon, Target::FrontEnemy, Effect::Damage),
            rec(Trigger::OnMove, Target::FrontEnemy, Effect::Damage),
        ];
        let segments = segment(&records);
        assert!(!segments[0].entries[0].continues);
        // New segment: the target is mentioned again.
        assert!(segments[1].entries[0].mentions_target());
    }

    #[test]
    fn no_target_is_never_mentioned() {
        let records = [rec(Trigger::OnSummon, Target::None, Effect::GainMana)];
        let segments = segment(&records);
        assert!(!segments[0].entries[0].mentions_target());
    }

    #[test]
    fn entries_borrow_records_in_order() {
        let records = [
            AbilityRecord::passive(Effect::GrantQuick, 0),
            AbilityRecord::passive(Effect::SpellDamagePlus, 2),
        ];
        let segments = segment(&records);
        assert!(std::ptr::eq(segments[0].entries[0].record, &records[0]));
        assert!(std::ptr::eq(segments[0].entries[1].record, &records[1]));
        assert_eq!(segments[0].entries[1].position, 1);
    }
}
