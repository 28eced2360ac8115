/// Compiler integration tests — records in, description text out.

use ability_text::core::phrases::TableKind;
use ability_text::schema::card::CardDefinition;
use ability_text::{AbilityRecord, CardCategory, DescriptionCompiler, Effect, Target, Trigger};

fn compiler() -> DescriptionCompiler {
    DescriptionCompiler::builder().locale("ja").build().unwrap()
}

#[test]
fn empty_sequence_for_every_category() {
    let compiler = compiler();
    assert_eq!(compiler.compile(&[], CardCategory::Monster), "");
    assert_eq!(compiler.compile(&[], CardCategory::Spell), "");
    assert_eq!(compiler.compile(&[], CardCategory::Building), "");
}

#[test]
fn same_input_same_output() {
    let compiler = compiler();
    let records = vec![
        AbilityRecord::passive(Effect::GrantHaste, 0),
        AbilityRecord::new(Trigger::OnAttack, Target::RandomEnemy, Effect::Damage, 1),
        AbilityRecord::new(Trigger::OnAttack, Target::RandomEnemy, Effect::ForceMove, 0),
    ];
    let first = compiler.compile(&records, CardCategory::Monster);
    for _ in 0..10 {
        assert_eq!(compiler.compile(&records, CardCategory::Monster), first);
    }
}

#[test]
fn active_record_separates_passive_clauses() {
    let compiler = compiler();
    let records = [
        AbilityRecord::passive(Effect::GrantTaunt, 0),
        AbilityRecord::new(Trigger::OnDeath, Target::Player, Effect::DrawCard, 1),
        AbilityRecord::passive(Effect::GrantStealth, 0),
    ];
    let text = compiler.compile(&records, CardCategory::Monster);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec!["挑発", "【破壊時】自分はカードを1枚引く。", "潜伏"]
    );
}

#[test]
fn repeated_target_mentioned_once() {
    let compiler = compiler();
    let records = [
        AbilityRecord::new(Trigger::OnSummon, Target::FrontEnemy, Effect::Damage, 2),
        AbilityRecord::new(Trigger::OnSummon, Target::FrontEnemy, Effect::BuffAttack, 1),
    ];
    let text = compiler.compile(&records, CardCategory::Monster);
    assert_eq!(text, "【召喚時】敵の先頭のモンスターに2ダメージを与え、攻撃力を+1する。");
    assert_eq!(text.matches("敵の先頭のモンスター").count(), 1);
    assert!(!text.contains('\n'));
}

#[test]
fn continuative_then_terminal() {
    let compiler = compiler();
    let records = [
        AbilityRecord::new(Trigger::OnTurnEnd, Target::OwnUnit, Effect::Heal, 2),
        AbilityRecord::new(Trigger::OnTurnEnd, Target::AllAllies, Effect::BuffHealth, 1),
    ];
    let text = compiler.compile(&records, CardCategory::Building);
    assert_eq!(
        text,
        "【ターン終了時】このカードを2回復し、味方モンスター全ての体力を+1する。"
    );
    assert!(text.ends_with('。'));
}

#[test]
fn spell_header_suppressed_only_for_spells() {
    let compiler = compiler();
    let records = [AbilityRecord::new(
        Trigger::SpellUse,
        Target::EnemyLeader,
        Effect::Damage,
        3,
    )];
    assert_eq!(
        compiler.compile(&records, CardCategory::Spell),
        "敵リーダーに3ダメージを与える。"
    );
    assert_eq!(
        compiler.compile(&records, CardCategory::Monster),
        "【使用時】敵リーダーに3ダメージを与える。"
    );
}

#[test]
fn passive_grouping_with_spell_damage_bonus() {
    let compiler = compiler();
    let records = [
        AbilityRecord::passive(Effect::GrantQuick, 0),
        AbilityRecord::passive(Effect::GrantPierce, 0),
        AbilityRecord::passive(Effect::SpellDamagePlus, 1),
    ];
    let text = compiler.compile(&records, CardCategory::Monster);
    assert_eq!(text, "速攻、貫通、スペルダメージ+1");
    assert!(!text.ends_with('、'));
}

#[test]
fn unmapped_effect_renders_rest_of_segment() {
    let compiler = compiler();
    let records = [
        AbilityRecord::new(Trigger::OnSummon, Target::None, Effect::GainMana, 1),
        AbilityRecord::new(Trigger::OnSummon, Target::None, Effect::SpellDamagePlus, 2),
    ];
    assert_eq!(
        compiler.compile(&records, CardCategory::Monster),
        "【召喚時】マナを1回復し、。"
    );

    let err = compiler
        .compile_strict(&records, CardCategory::Monster)
        .unwrap_err();
    assert_eq!(err.missing.len(), 1);
    assert_eq!(err.missing[0].table, TableKind::TerminalPhrase);
    assert_eq!(err.missing[0].key, "spell_damage_plus");
}

#[test]
fn consecutive_active_segments_each_get_headers() {
    let compiler = compiler();
    let records = [
        AbilityRecord::new(Trigger::OnSummon, Target::ChosenAlly, Effect::GrantTaunt, 0),
        AbilityRecord::new(Trigger::OnMove, Target::ChosenAlly, Effect::GrantStealth, 0),
    ];
    assert_eq!(
        compiler.compile(&records, CardCategory::Monster),
        "【召喚時】選んだ味方モンスターに挑発を付与する。\n【移動時】選んだ味方モンスターに潜伏を付与する。"
    );
}

#[test]
fn target_returns_after_interruption() {
    let compiler = compiler();
    let records = [
        AbilityRecord::new(Trigger::OnAttack, Target::FrontEnemy, Effect::Damage, 1),
        AbilityRecord::new(Trigger::OnAttack, Target::Player, Effect::DrawCard, 1),
        AbilityRecord::new(Trigger::OnAttack, Target::FrontEnemy, Effect::Destroy, 0),
    ];
    assert_eq!(
        compiler.compile(&records, CardCategory::Monster),
        "【攻撃時】敵の先頭のモンスターに1ダメージを与え、自分はカードを1枚引き、敵の先頭のモンスターを破壊する。"
    );
}

#[test]
fn fixture_cards_describe() {
    let compiler = compiler();
    let path = std::path::Path::new("tests/fixtures/test_cards.ron");
    let cards = CardDefinition::load_all_from_ron(path).unwrap();

    let described: Vec<String> = cards.iter().map(|c| c.describe(&compiler)).collect();
    assert_eq!(
        described,
        vec![
            "挑発\n【召喚時】敵の先頭のモンスターに2ダメージを与え、攻撃力を+1する。".to_string(),
            "【ターン終了時】自分のマナを1回復する。\nスペルダメージ+1".to_string(),
            "選んだ敵モンスターを手札に戻し、自分はカードを1枚引く。".to_string(),
            String::new(),
        ]
    );

    for card in &cards {
        assert!(
            compiler.compile_strict(&card.abilities, card.category).is_ok(),
            "card '{}' should have full coverage",
            card.name
        );
    }
}

#[test]
fn shared_compiler_across_threads() {
    let compiler = std::sync::Arc::new(compiler());
    let records = vec![AbilityRecord::new(
        Trigger::OnDeath,
        Target::AllEnemies,
        Effect::Damage,
        1,
    )];
    let expected = compiler.compile(&records, CardCategory::Monster);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let compiler = std::sync::Arc::clone(&compiler);
            let records = records.clone();
            std::thread::spawn(move || compiler.compile(&records, CardCategory::Monster))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
