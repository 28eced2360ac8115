use serde::{Deserialize, Serialize};

/// The timing or condition that activates an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// Always on. Rendered as a keyword list rather than a sentence.
    Passive,
    OnSummon,
    OnTurnEnd,
    OnAttack,
    OnDeath,
    OnMove,
    SpellUse,
}

impl Trigger {
    pub const ALL: [Trigger; 7] = [
        Self::Passive,
        Self::OnSummon,
        Self::OnTurnEnd,
        Self::OnAttack,
        Self::OnDeath,
        Self::OnMove,
        Self::SpellUse,
    ];

    /// Stable identifier used in logs and lint reports (e.g., "on_summon").
    pub fn key(&self) -> &'static str {
        match self {
            Self::Passive => "passive",
            Self::OnSummon => "on_summon",
            Self::OnTurnEnd => "on_turn_end",
            Self::OnAttack => "on_attack",
            Self::OnDeath => "on_death",
            Self::OnMove => "on_move",
            Self::SpellUse => "spell_use",
        }
    }

    pub fn is_passive(&self) -> bool {
        matches!(self, Self::Passive)
    }
}

/// Who or what an effect applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    None,
    /// The card that owns the ability.
    OwnUnit,
    FrontEnemy,
    RandomEnemy,
    ChosenEnemy,
    AllEnemies,
    EnemyLeader,
    ChosenEnemyLeader,
    FrontAlly,
    RandomAlly,
    ChosenAlly,
    AllAllies,
    /// The controlling player.
    Player,
}

impl Target {
    pub const ALL: [Target; 13] = [
        Self::None,
        Self::OwnUnit,
        Self::FrontEnemy,
        Self::RandomEnemy,
        Self::ChosenEnemy,
        Self::AllEnemies,
        Self::EnemyLeader,
        Self::ChosenEnemyLeader,
        Self::FrontAlly,
        Self::RandomAlly,
        Self::ChosenAlly,
        Self::AllAllies,
        Self::Player,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::OwnUnit => "own_unit",
            Self::FrontEnemy => "front_enemy",
            Self::RandomEnemy => "random_enemy",
            Self::ChosenEnemy => "chosen_enemy",
            Self::AllEnemies => "all_enemies",
            Self::EnemyLeader => "enemy_leader",
            Self::ChosenEnemyLeader => "chosen_enemy_leader",
            Self::FrontAlly => "front_ally",
            Self::RandomAlly => "random_ally",
            Self::ChosenAlly => "chosen_ally",
            Self::AllAllies => "all_allies",
            Self::Player => "player",
        }
    }
}

/// The mechanical effect an ability produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Damage,
    Heal,
    BuffAttack,
    BuffHealth,
    GainMana,
    Destroy,
    DrawCard,
    ReturnToHand,
    ForceMove,
    GrantTaunt,
    GrantStealth,
    GrantQuick,
    GrantHaste,
    GrantPierce,
    SpellDamagePlus,
}

impl Effect {
    pub const ALL: [Effect; 15] = [
        Self::Damage,
        Self::Heal,
        Self::BuffAttack,
        Self::BuffHealth,
        Self::GainMana,
        Self::Destroy,
        Self::DrawCard,
        Self::ReturnToHand,
        Self::ForceMove,
        Self::GrantTaunt,
        Self::GrantStealth,
        Self::GrantQuick,
        Self::GrantHaste,
        Self::GrantPierce,
        Self::SpellDamagePlus,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::Heal => "heal",
            Self::BuffAttack => "buff_attack",
            Self::BuffHealth => "buff_health",
            Self::GainMana => "gain_mana",
            Self::Destroy => "destroy",
            Self::DrawCard => "draw_card",
            Self::ReturnToHand => "return_to_hand",
            Self::ForceMove => "force_move",
            Self::GrantTaunt => "grant_taunt",
            Self::GrantStealth => "grant_stealth",
            Self::GrantQuick => "grant_quick",
            Self::GrantHaste => "grant_haste",
            Self::GrantPierce => "grant_pierce",
            Self::SpellDamagePlus => "spell_damage_plus",
        }
    }

    /// Returns true if the effect's wording interpolates the record's value.
    pub fn has_magnitude(&self) -> bool {
        matches!(
            self,
            Self::Damage
                | Self::Heal
                | Self::BuffAttack
                | Self::BuffHealth
                | Self::GainMana
                | Self::DrawCard
                | Self::SpellDamagePlus
        )
    }

    /// Returns true for effects that grant a keyword ability.
    pub fn is_keyword_grant(&self) -> bool {
        matches!(
            self,
            Self::GrantTaunt
                | Self::GrantStealth
                | Self::GrantQuick
                | Self::GrantHaste
                | Self::GrantPierce
        )
    }
}

/// The kind of card that owns an ability list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CardCategory {
    #[default]
    Monster,
    Spell,
    Building,
}

impl CardCategory {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Monster => "monster",
            Self::Spell => "spell",
            Self::Building => "building",
        }
    }

    pub fn is_spell(&self) -> bool {
        matches!(self, Self::Spell)
    }
}

/// One effect a card or building can produce.
///
/// `value` is meaningless for effects without a magnitude (e.g., `Destroy`)
/// and is ignored when rendering them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityRecord {
    pub trigger: Trigger,
    pub target: Target,
    pub effect: Effect,
    #[serde(default)]
    pub value: i32,
}

impl AbilityRecord {
    pub fn new(trigger: Trigger, target: Target, effect: Effect, value: i32) -> Self {
        Self {
            trigger,
            target,
            effect,
            value,
        }
    }

    /// Shorthand for a passive keyword with no target.
    pub fn passive(effect: Effect, value: i32) -> Self {
        Self::new(Trigger::Passive, Target::None, effect, value)
    }
}
