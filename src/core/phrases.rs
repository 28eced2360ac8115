/// Phrase tables — locale-specific wording, parsing, loading, and lookup.

use ron::extensions::Extensions;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

use crate::schema::ability::{Effect, Target, Trigger};

/// Built-in tables embedded at compile time, keyed by locale name.
const BUILTIN_LOCALES: &[(&str, &str)] = &[("ja", include_str!("../../locales/ja.ron"))];

#[derive(Debug, Error)]
pub enum PhraseError {
    #[error("template parse error: {0}")]
    TemplateParse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// A segment of a parsed phrase template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhraseSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// The record's magnitude: `{value}`.
    Value,
}

/// A parsed phrase: a sequence of segments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhraseTemplate {
    pub segments: Vec<PhraseSegment>,
}

impl PhraseTemplate {
    /// Parse a phrase string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{value}` → `Value`
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<PhraseTemplate, PhraseError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            match chars[i] {
                '{' if i + 1 < len && chars[i + 1] == '{' => {
                    literal_buf.push('{');
                    i += 2;
                }
                '{' => {
                    let start = i + 1;
                    let mut end = start;
                    while end < len && chars[end] != '}' {
                        if chars[end] == '{' {
                            return Err(PhraseError::TemplateParse(
                                "nested braces are not allowed".to_string(),
                            ));
                        }
                        end += 1;
                    }
                    if end == len {
                        return Err(PhraseError::TemplateParse("unclosed brace".to_string()));
                    }

                    let content: String = chars[start..end].iter().collect();
                    match content.as_str() {
                        "value" => {
                            if !literal_buf.is_empty() {
                                segments.push(PhraseSegment::Literal(std::mem::take(
                                    &mut literal_buf,
                                )));
                            }
                            segments.push(PhraseSegment::Value);
                        }
                        "" => {
                            return Err(PhraseError::TemplateParse("empty braces".to_string()));
                        }
                        other => {
                            return Err(PhraseError::TemplateParse(format!(
                                "unknown placeholder '{{{}}}': only {{value}} is supported",
                                other
                            )));
                        }
                    }
                    i = end + 1;
                }
                '}' if i + 1 < len && chars[i + 1] == '}' => {
                    literal_buf.push('}');
                    i += 2;
                }
                '}' => {
                    return Err(PhraseError::TemplateParse(
                        "unmatched closing brace".to_string(),
                    ));
                }
                c => {
                    literal_buf.push(c);
                    i += 1;
                }
            }
        }

        if !literal_buf.is_empty() {
            segments.push(PhraseSegment::Literal(literal_buf));
        }

        Ok(PhraseTemplate { segments })
    }

    /// Append the phrase to `out`, interpolating `value`.
    pub fn render_into(&self, out: &mut String, value: i32) {
        for segment in &self.segments {
            match segment {
                PhraseSegment::Literal(text) => out.push_str(text),
                PhraseSegment::Value => out.push_str(&value.to_string()),
            }
        }
    }

    #[cfg(test)]
    fn render(&self, value: i32) -> String {
        let mut out = String::new();
        self.render_into(&mut out, value);
        out
    }

    /// Returns true if the phrase interpolates the record's value.
    pub fn uses_value(&self) -> bool {
        self.segments.contains(&PhraseSegment::Value)
    }
}

/// Terminal and continuative wording for one effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhrasePair {
    /// Used when the clause ends with this effect.
    pub terminal: PhraseTemplate,
    /// Used when more effects follow in the same clause.
    pub continuative: PhraseTemplate,
}

/// Separators and brackets. Unset marks render as empty text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Punctuation {
    #[serde(default)]
    pub list_separator: Option<String>,
    #[serde(default)]
    pub clause_separator: Option<String>,
    #[serde(default)]
    pub full_stop: Option<String>,
    #[serde(default)]
    pub line_break: Option<String>,
    #[serde(default)]
    pub header_open: Option<String>,
    #[serde(default)]
    pub header_close: Option<String>,
}

impl Punctuation {
    /// Joins passive keywords.
    pub fn list_separator(&self) -> &str {
        self.list_separator.as_deref().unwrap_or_default()
    }

    /// Follows a continuative phrase.
    pub fn clause_separator(&self) -> &str {
        self.clause_separator.as_deref().unwrap_or_default()
    }

    /// Follows a terminal phrase.
    pub fn full_stop(&self) -> &str {
        self.full_stop.as_deref().unwrap_or_default()
    }

    /// Joins rendered segments.
    pub fn line_break(&self) -> &str {
        self.line_break.as_deref().unwrap_or_default()
    }

    pub fn header_open(&self) -> &str {
        self.header_open.as_deref().unwrap_or_default()
    }

    pub fn header_close(&self) -> &str {
        self.header_close.as_deref().unwrap_or_default()
    }

    /// Set marks in `other` override marks in `self`.
    pub fn merge(&mut self, other: Punctuation) {
        fn take(slot: &mut Option<String>, incoming: Option<String>) {
            if incoming.is_some() {
                *slot = incoming;
            }
        }
        take(&mut self.list_separator, other.list_separator);
        take(&mut self.clause_separator, other.clause_separator);
        take(&mut self.full_stop, other.full_stop);
        take(&mut self.line_break, other.line_break);
        take(&mut self.header_open, other.header_open);
        take(&mut self.header_close, other.header_close);
    }
}

/// Which lookup a missing entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    TriggerName,
    TargetNoun,
    Particle,
    PassiveName,
    TerminalPhrase,
    ContinuativePhrase,
}

impl TableKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::TriggerName => "trigger_name",
            Self::TargetNoun => "target_noun",
            Self::Particle => "particle",
            Self::PassiveName => "passive_name",
            Self::TerminalPhrase => "terminal_phrase",
            Self::ContinuativePhrase => "continuative_phrase",
        }
    }
}

/// A lookup that found no entry and rendered as empty text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MissingMapping {
    pub table: TableKind,
    /// The enum value's stable key (e.g., "on_summon").
    pub key: &'static str,
}

impl fmt::Display for MissingMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} has no entry for '{}'", self.table.key(), self.key)
    }
}

/// The complete wording for one display locale.
///
/// Tables hold no rendering logic; swapping them changes only the text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhraseTables {
    pub locale: String,
    pub punctuation: Punctuation,
    pub triggers: FxHashMap<Trigger, String>,
    pub targets: FxHashMap<Target, String>,
    pub particles: FxHashMap<Effect, String>,
    /// Particle for effects missing from `particles`.
    pub default_particle: Option<String>,
    pub passive_names: FxHashMap<Effect, String>,
    pub phrases: FxHashMap<Effect, PhrasePair>,
}

// RON deserialization helpers. Phrases are written as plain strings in
// RON and parsed into templates on load.

#[derive(Debug, Deserialize)]
struct RonPhrasePair {
    terminal: String,
    continuative: String,
}

#[derive(Debug, Deserialize)]
struct RonTables {
    #[serde(default)]
    locale: String,
    #[serde(default)]
    punctuation: Punctuation,
    #[serde(default)]
    triggers: FxHashMap<Trigger, String>,
    #[serde(default)]
    targets: FxHashMap<Target, String>,
    #[serde(default)]
    particles: FxHashMap<Effect, String>,
    #[serde(default)]
    default_particle: Option<String>,
    #[serde(default)]
    passive_names: FxHashMap<Effect, String>,
    #[serde(default)]
    phrases: FxHashMap<Effect, RonPhrasePair>,
}

impl PhraseTables {
    /// Load phrase tables from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<PhraseTables, PhraseError> {
        let contents = std::fs::read_to_string(path)?;
        let tables = Self::parse_ron(&contents)?;
        debug!(path = %path.display(), locale = %tables.locale, "loaded phrase tables");
        Ok(tables)
    }

    /// Parse phrase tables from a RON string.
    pub fn parse_ron(input: &str) -> Result<PhraseTables, PhraseError> {
        // Optional marks and particles are written without `Some(..)`.
        let raw: RonTables = ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(input)?;

        let mut phrases = FxHashMap::default();
        for (effect, pair) in raw.phrases {
            let terminal = PhraseTemplate::parse(&pair.terminal).map_err(|e| {
                PhraseError::TemplateParse(format!("{} terminal: {}", effect.key(), e))
            })?;
            let continuative = PhraseTemplate::parse(&pair.continuative).map_err(|e| {
                PhraseError::TemplateParse(format!("{} continuative: {}", effect.key(), e))
            })?;
            phrases.insert(
                effect,
                PhrasePair {
                    terminal,
                    continuative,
                },
            );
        }

        Ok(PhraseTables {
            locale: raw.locale,
            punctuation: raw.punctuation,
            triggers: raw.triggers,
            targets: raw.targets,
            particles: raw.particles,
            default_particle: raw.default_particle,
            passive_names: raw.passive_names,
            phrases,
        })
    }

    /// RON source of a built-in locale, if one exists.
    pub fn builtin_source(locale: &str) -> Option<&'static str> {
        BUILTIN_LOCALES
            .iter()
            .find(|(name, _)| *name == locale)
            .map(|(_, source)| *source)
    }

    /// The built-in Japanese tables, parsed once per process.
    pub fn japanese() -> Result<&'static PhraseTables, PhraseError> {
        static JAPANESE: OnceLock<PhraseTables> = OnceLock::new();
        if let Some(tables) = JAPANESE.get() {
            return Ok(tables);
        }
        let source = Self::builtin_source("ja").unwrap_or_default();
        let tables = Self::parse_ron(source)?;
        Ok(JAPANESE.get_or_init(|| tables))
    }

    /// Merge another table set into this one. Entries from `other`
    /// override entries in `self` for the same key.
    pub fn merge(&mut self, other: PhraseTables) {
        if !other.locale.is_empty() {
            self.locale = other.locale;
        }
        self.punctuation.merge(other.punctuation);
        self.triggers.extend(other.triggers);
        self.targets.extend(other.targets);
        self.particles.extend(other.particles);
        if other.default_particle.is_some() {
            self.default_particle = other.default_particle;
        }
        self.passive_names.extend(other.passive_names);
        self.phrases.extend(other.phrases);
    }

    pub fn trigger_name(&self, trigger: Trigger) -> Option<&str> {
        self.triggers.get(&trigger).map(String::as_str)
    }

    pub fn target_noun(&self, target: Target) -> Option<&str> {
        self.targets.get(&target).map(String::as_str)
    }

    /// The particle joining a target noun to the effect phrase, falling
    /// back to `default_particle` for unmapped effects.
    pub fn particle(&self, effect: Effect) -> Option<&str> {
        self.particles
            .get(&effect)
            .or(self.default_particle.as_ref())
            .map(String::as_str)
    }

    pub fn passive_name(&self, effect: Effect) -> Option<&str> {
        self.passive_names.get(&effect).map(String::as_str)
    }

    pub fn phrase(&self, effect: Effect) -> Option<&PhrasePair> {
        self.phrases.get(&effect)
    }

    /// Every lookup the compiler could need that has no entry.
    ///
    /// Covers trigger names for active triggers, nouns for every target
    /// except `None`, phrases and particles for every effect usable on an
    /// active trigger, and passive names for keyword grants and the spell
    /// damage bonus. Particles only count when there is no default.
    pub fn coverage_gaps(&self) -> Vec<MissingMapping> {
        let mut gaps = Vec::new();

        for trigger in Trigger::ALL.into_iter().filter(|t| !t.is_passive()) {
            if !self.triggers.contains_key(&trigger) {
                gaps.push(MissingMapping {
                    table: TableKind::TriggerName,
                    key: trigger.key(),
                });
            }
        }

        for target in Target::ALL.into_iter().filter(|t| *t != Target::None) {
            if !self.targets.contains_key(&target) {
                gaps.push(MissingMapping {
                    table: TableKind::TargetNoun,
                    key: target.key(),
                });
            }
        }

        for effect in Effect::ALL {
            if effect.is_keyword_grant() || effect == Effect::SpellDamagePlus {
                if !self.passive_names.contains_key(&effect) {
                    gaps.push(MissingMapping {
                        table: TableKind::PassiveName,
                        key: effect.key(),
                    });
                }
            }
            if effect != Effect::SpellDamagePlus && self.particle(effect).is_none() {
                gaps.push(MissingMapping {
                    table: TableKind::Particle,
                    key: effect.key(),
                });
            }
            if effect != Effect::SpellDamagePlus && !self.phrases.contains_key(&effect) {
                gaps.push(MissingMapping {
                    table: TableKind::TerminalPhrase,
                    key: effect.key(),
                });
                gaps.push(MissingMapping {
                    table: TableKind::ContinuativePhrase,
                    key: effect.key(),
                });
            }
        }

        gaps
    }
}
