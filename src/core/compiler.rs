/// The description compiler: ability records → description text.
///
/// Wires together segmentation, the passive and active renderers, and the
/// phrase tables chosen at build time.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::core::phrases::{MissingMapping, PhraseError, PhraseTables};
use crate::core::render::{render_active, render_passive};
use crate::core::segment::{segment, TriggerCategory};
use crate::schema::ability::{AbilityRecord, CardCategory};

#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("phrase table error: {0}")]
    Phrases(#[from] PhraseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
}

/// Raised by strict compiles when any lookup had no table entry.
///
/// Carries the lenient rendering so authoring tools can still show it.
#[derive(Debug, Clone, Error)]
#[error("{} missing phrase mapping(s)", .missing.len())]
pub struct MissingMappingError {
    pub missing: Vec<MissingMapping>,
    pub rendered: String,
}

/// Compile with explicit tables. Empty input yields an empty string.
pub fn compile(records: &[AbilityRecord], category: CardCategory, tables: &PhraseTables) -> String {
    let mut missing = Vec::new();
    compile_collecting(records, category, tables, &mut missing)
}

fn compile_collecting(
    records: &[AbilityRecord],
    category: CardCategory,
    tables: &PhraseTables,
    missing: &mut Vec<MissingMapping>,
) -> String {
    let segments = segment(records);
    let mut out = String::new();

    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            out.push_str(tables.punctuation.line_break());
        }
        let rendered = match seg.category {
            TriggerCategory::Passive => render_passive(seg, tables, missing),
            TriggerCategory::Active(_) => render_active(seg, category, tables, missing),
        };
        trace!(index = i, category = ?seg.category, records = seg.len(), "rendered segment");
        out.push_str(&rendered);
    }

    out
}

/// Turns ability lists into description text. Built via
/// `DescriptionCompiler::builder()` or directly from tables.
///
/// Holds only immutable tables, so one compiler can be shared freely.
#[derive(Debug, Clone)]
pub struct DescriptionCompiler {
    tables: PhraseTables,
}

/// Builder for constructing a `DescriptionCompiler`.
///
/// Sources are applied in order: locale, tables file, tables directory,
/// then directly provided tables. Later sources override earlier entries.
#[derive(Debug, Default)]
pub struct DescriptionCompilerBuilder {
    locale: Option<String>,
    tables_file: Option<PathBuf>,
    tables_dir: Option<PathBuf>,
    /// Directly provided tables (for testing without files).
    tables: Option<PhraseTables>,
}

impl DescriptionCompiler {
    pub fn builder() -> DescriptionCompilerBuilder {
        DescriptionCompilerBuilder::default()
    }

    pub fn new(tables: PhraseTables) -> Self {
        Self { tables }
    }

    /// A compiler over the built-in Japanese tables.
    pub fn japanese() -> Result<Self, CompilerError> {
        Ok(Self::new(PhraseTables::japanese()?.clone()))
    }

    pub fn tables(&self) -> &PhraseTables {
        &self.tables
    }

    /// Render `records` for a card of `category`. Never fails; lookups
    /// with no table entry render as empty text.
    pub fn compile(&self, records: &[AbilityRecord], category: CardCategory) -> String {
        let mut missing = Vec::new();
        let text = compile_collecting(records, category, &self.tables, &mut missing);
        debug!(
            locale = %self.tables.locale,
            category = category.key(),
            records = records.len(),
            missing = missing.len(),
            "compiled description"
        );
        text
    }

    /// Render like `compile`, but fail if any lookup had no table entry.
    pub fn compile_strict(
        &self,
        records: &[AbilityRecord],
        category: CardCategory,
    ) -> Result<String, MissingMappingError> {
        let mut missing = Vec::new();
        let rendered = compile_collecting(records, category, &self.tables, &mut missing);
        if missing.is_empty() {
            return Ok(rendered);
        }
        for mapping in &missing {
            warn!(locale = %self.tables.locale, %mapping, "missing phrase mapping");
        }
        Err(MissingMappingError { missing, rendered })
    }
}

impl DescriptionCompilerBuilder {
    /// Start from a locale: built-in tables first, then `locales/<name>.ron`
    /// under the working directory. Names may only hold ASCII letters,
    /// digits, `-` and `_`; anything else is an unknown locale.
    pub fn locale(mut self, name: &str) -> Self {
        self.locale = Some(name.to_string());
        self
    }

    pub fn tables_file(mut self, path: impl AsRef<Path>) -> Self {
        self.tables_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Merge every `.ron` file in the directory, in file-name order.
    pub fn tables_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.tables_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Provide tables directly (for testing without files).
    pub fn with_tables(mut self, tables: PhraseTables) -> Self {
        self.tables = Some(tables);
        self
    }

    pub fn build(self) -> Result<DescriptionCompiler, CompilerError> {
        let mut tables = PhraseTables::default();

        if let Some(ref name) = self.locale {
            if let Some(source) = PhraseTables::builtin_source(name) {
                tables.merge(PhraseTables::parse_ron(source)?);
            } else {
                if !is_plain_locale_name(name) {
                    return Err(CompilerError::UnknownLocale(name.clone()));
                }
                let path = PathBuf::from(format!("locales/{}.ron", name));
                if !path.exists() {
                    return Err(CompilerError::UnknownLocale(name.clone()));
                }
                tables.merge(PhraseTables::load_from_ron(&path)?);
            }
        }

        if let Some(ref path) = self.tables_file {
            tables.merge(PhraseTables::load_from_ron(path)?);
        }

        if let Some(ref dir) = self.tables_dir {
            if dir.exists() {
                load_ron_files_from_dir(dir, |path| {
                    tables.merge(PhraseTables::load_from_ron(path)?);
                    Ok(())
                })?;
            }
        }

        if let Some(direct) = self.tables {
            tables.merge(direct);
        }

        debug!(
            locale = %tables.locale,
            gaps = tables.coverage_gaps().len(),
            "built description compiler"
        );
        Ok(DescriptionCompiler { tables })
    }
}

fn is_plain_locale_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Load all .ron files from a directory in name order, calling `loader` for each.
fn load_ron_files_from_dir<F>(dir: &Path, mut loader: F) -> Result<(), CompilerError>
where
    F: FnMut(&Path) -> Result<(), CompilerError>,
{
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            paths.push(path);
        }
    }
    paths.sort();
    for path in &paths {
        loader(path)?;
    }
    Ok(())
}
