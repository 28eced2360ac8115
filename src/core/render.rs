/// Segment renderers — passive keyword lists and active trigger clauses.
///
/// Both renderers are total: a lookup with no table entry contributes empty
/// text and is recorded in `missing` so strict callers can report it.

use crate::core::phrases::{MissingMapping, PhraseTables, TableKind};
use crate::core::segment::Segment;
use crate::schema::ability::{CardCategory, Effect, Trigger};

/// Render a passive segment as a separator-joined keyword list.
///
/// `SpellDamagePlus` carries its bonus as `<name>+<value>`; every other
/// effect renders its passive name alone.
pub fn render_passive(
    segment: &Segment<'_>,
    tables: &PhraseTables,
    missing: &mut Vec<MissingMapping>,
) -> String {
    let mut out = String::new();

    for (i, entry) in segment.entries.iter().enumerate() {
        if i > 0 {
            out.push_str(tables.punctuation.list_separator());
        }

        let effect = entry.record.effect;
        match tables.passive_name(effect) {
            Some(name) => out.push_str(name),
            None => missing.push(MissingMapping {
                table: TableKind::PassiveName,
                key: effect.key(),
            }),
        }
        if effect == Effect::SpellDamagePlus {
            out.push('+');
            out.push_str(&entry.record.value.to_string());
        }
    }

    out
}

/// Render an active segment as one clause:
/// `【trigger】 [target particle] phrase、 ... phrase。`
pub fn render_active(
    segment: &Segment<'_>,
    category: CardCategory,
    tables: &PhraseTables,
    missing: &mut Vec<MissingMapping>,
) -> String {
    let punctuation = &tables.punctuation;
    let mut out = String::new();

    for entry in &segment.entries {
        let record = entry.record;

        if entry.is_first() && !(record.trigger == Trigger::SpellUse && category.is_spell()) {
            out.push_str(punctuation.header_open());
            match tables.trigger_name(record.trigger) {
                Some(name) => out.push_str(name),
                None => missing.push(MissingMapping {
                    table: TableKind::TriggerName,
                    key: record.trigger.key(),
                }),
            }
            out.push_str(punctuation.header_close());
        }

        if entry.mentions_target() {
            match tables.target_noun(record.target) {
                Some(noun) => out.push_str(noun),
                None => missing.push(MissingMapping {
                    table: TableKind::TargetNoun,
                    key: record.target.key(),
                }),
            }
            match tables.particle(record.effect) {
                Some(particle) => out.push_str(particle),
                None => missing.push(MissingMapping {
                    table: TableKind::Particle,
                    key: record.effect.key(),
                }),
            }
        }

        let (table, separator) = if entry.continues {
            (TableKind::ContinuativePhrase, punctuation.clause_separator())
        } else {
            (TableKind::TerminalPhrase, punctuation.full_stop())
        };
        match tables.phrase(record.effect) {
            Some(pair) => {
                let template = if entry.continues {
                    &pair.continuative
                } else {
                    &pair.terminal
                };
                template.render_into(&mut out, record.value);
            }
            None => missing.push(MissingMapping {
                table,
                key: record.effect.key(),
            }),
        }
        out.push_str(separator);
    }

    out
}
