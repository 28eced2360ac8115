//! WASM bindings for ability-text — powers the card editor's live preview.

use wasm_bindgen::prelude::*;

use ability_text::core::phrases::PhraseTables;
use ability_text::{AbilityRecord, CardCategory, DescriptionCompiler};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct StrictResult {
    text: String,
    missing: Vec<String>,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn category_from_name(s: &str) -> Option<CardCategory> {
    match s.to_lowercase().as_str() {
        "monster" => Some(CardCategory::Monster),
        "spell" => Some(CardCategory::Spell),
        "building" => Some(CardCategory::Building),
        _ => None,
    }
}

fn parse_category(s: &str) -> Result<CardCategory, JsError> {
    category_from_name(s).ok_or_else(|| JsError::new(&format!("Unknown card category: {s}")))
}

fn parse_abilities(json: &str) -> Result<Vec<AbilityRecord>, JsError> {
    serde_json::from_str(json).map_err(|e| JsError::new(&format!("Invalid abilities JSON: {e}")))
}

#[wasm_bindgen]
pub struct AbilityTextCompiler {
    compiler: DescriptionCompiler,
}

#[wasm_bindgen]
impl AbilityTextCompiler {
    /// Create a compiler for a built-in locale.
    #[wasm_bindgen(constructor)]
    pub fn new(locale: &str) -> Result<AbilityTextCompiler, JsError> {
        let compiler = DescriptionCompiler::builder()
            .locale(locale)
            .build()
            .map_err(|e| JsError::new(&format!("Compiler build error: {e}")))?;
        Ok(AbilityTextCompiler { compiler })
    }

    /// Create a compiler from RON phrase tables layered over a built-in locale.
    pub fn with_overrides(locale: &str, tables_ron: &str) -> Result<AbilityTextCompiler, JsError> {
        let overrides = PhraseTables::parse_ron(tables_ron)
            .map_err(|e| JsError::new(&format!("Phrase table parse error: {e}")))?;
        let compiler = DescriptionCompiler::builder()
            .locale(locale)
            .with_tables(overrides)
            .build()
            .map_err(|e| JsError::new(&format!("Compiler build error: {e}")))?;
        Ok(AbilityTextCompiler { compiler })
    }

    /// Compile abilities described by a JSON array.
    ///
    /// Expected JSON shape:
    /// ```json
    /// [
    ///   { "trigger": "OnSummon", "target": "FrontEnemy", "effect": "Damage", "value": 2 },
    ///   { "trigger": "Passive", "target": "None", "effect": "GrantTaunt" }
    /// ]
    /// ```
    pub fn compile(&self, abilities_json: &str, category: &str) -> Result<String, JsError> {
        let abilities = parse_abilities(abilities_json)?;
        let category = parse_category(category)?;
        Ok(self.compiler.compile(&abilities, category))
    }

    /// Compile and report missing mappings. Returns JSON
    /// `{ "text": "...", "missing": ["..."] }`.
    pub fn compile_strict(&self, abilities_json: &str, category: &str) -> Result<String, JsError> {
        let abilities = parse_abilities(abilities_json)?;
        let category = parse_category(category)?;
        let result = match self.compiler.compile_strict(&abilities, category) {
            Ok(text) => StrictResult {
                text,
                missing: Vec::new(),
            },
            Err(e) => StrictResult {
                missing: e.missing.iter().map(|m| m.to_string()).collect(),
                text: e.rendered,
            },
        };
        serde_json::to_string(&result)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return the active locale name.
    pub fn locale(&self) -> String {
        self.compiler.tables().locale.clone()
    }

    /// Return JSON array of card categories.
    pub fn categories() -> String {
        serde_json::to_string(&["monster", "spell", "building"])
            .unwrap_or_else(|_| "[]".to_string())
    }
}
