use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ability::{AbilityRecord, CardCategory};
use crate::core::compiler::DescriptionCompiler;

/// A card or building as authored: a name, a category, and its ability
/// list in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: String,
    #[serde(default)]
    pub category: CardCategory,
    #[serde(default)]
    pub abilities: Vec<AbilityRecord>,
}

impl CardDefinition {
    /// The card's description text.
    pub fn describe(&self, compiler: &DescriptionCompiler) -> String {
        compiler.compile(&self.abilities, self.category)
    }

    /// Load card definitions from a RON file containing a list of cards.
    pub fn load_all_from_ron(path: &Path) -> Result<Vec<CardDefinition>, CardError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ability::{Effect, Target, Trigger};

    #[test]
    fn describe_uses_card_category() {
        let compiler = DescriptionCompiler::japanese().unwrap();
        let spell = CardDefinition {
            name: "Fireball".to_string(),
            category: CardCategory::Spell,
            abilities: vec![AbilityRecord::new(
                Trigger::SpellUse,
                Target::ChosenEnemy,
                Effect::Damage,
                3,
            )],
        };
        assert_eq!(spell.describe(&compiler), "選んだ敵モンスターに3ダメージを与える。");
    }

    #[test]
    fn parse_minimal_card() {
        let card: CardDefinition = ron::from_str(r#"(name: "Wall")"#).unwrap();
        assert_eq!(card.category, CardCategory::Monster);
        assert!(card.abilities.is_empty());
    }

    #[test]
    fn load_test_cards_from_ron() {
        let path = std::path::PathBuf::from("tests/fixtures/test_cards.ron");
        let cards = CardDefinition::load_all_from_ron(&path).unwrap();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].name, "Shield Bearer");
        assert_eq!(cards[2].category, CardCategory::Spell);
    }

    #[test]
    fn load_missing_file_errors() {
        let path = std::path::PathBuf::from("tests/fixtures/does_not_exist.ron");
        assert!(matches!(
            CardDefinition::load_all_from_ron(&path),
            Err(CardError::Io(_))
        ));
    }
}
