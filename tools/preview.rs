/// Preview — interactive shell for checking how abilities read.
///
/// Usage: preview [--locale <name>] [--tables <path>] [--cards <cards.ron>] [--strict]
///
/// With --cards, prints every card's description and exits.
///
/// Commands:
///   add <trigger> <target> <effect> [value]  — append an ability
///   pop                                      — remove the last ability
///   clear                                    — remove all abilities
///   category <monster|spell|building>        — set the card category
///   list                                     — show the current abilities
///   strict <on|off>                          — report missing mappings
///   help                                     — list commands
///   quit                                     — exit

use ability_text::core::compiler::DescriptionCompiler;
use ability_text::schema::card::CardDefinition;
use ability_text::{AbilityRecord, CardCategory, Effect, Target, Trigger};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut locale = "ja".to_string();
    let mut tables_path = None;
    let mut cards_path = None;
    let mut strict = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--locale" if i + 1 < args.len() => {
                i += 1;
                locale = args[i].clone();
            }
            "--tables" if i + 1 < args.len() => {
                i += 1;
                tables_path = Some(args[i].clone());
            }
            "--cards" if i + 1 < args.len() => {
                i += 1;
                cards_path = Some(args[i].clone());
            }
            "--strict" => strict = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut builder = DescriptionCompiler::builder().locale(&locale);
    if let Some(ref path) = tables_path {
        if Path::new(path).is_dir() {
            builder = builder.tables_dir(path);
        } else {
            builder = builder.tables_file(path);
        }
    }
    let compiler = match builder.build() {
        Ok(compiler) => compiler,
        Err(e) => {
            eprintln!("ERROR: Failed to load phrase tables: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(ref path) = cards_path {
        let failures = print_cards(&compiler, Path::new(path), strict);
        std::process::exit(if failures == 0 { 0 } else { 1 });
    }

    println!("Locale: {}", compiler.tables().locale);
    println!("Type 'help' for commands.\n");

    // Session state
    let mut abilities: Vec<AbilityRecord> = Vec::new();
    let mut category = CardCategory::Monster;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
                continue;
            }
            "add" => {
                if parts.len() < 4 {
                    println!("Usage: add <trigger> <target> <effect> [value]");
                    println!("  trigger: {}", names(Trigger::ALL.iter().map(|t| t.key())));
                    println!("  target: {}", names(Target::ALL.iter().map(|t| t.key())));
                    println!("  effect: {}", names(Effect::ALL.iter().map(|e| e.key())));
                    continue;
                }
                let record = match parse_record(&parts[1..]) {
                    Ok(record) => record,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                abilities.push(record);
            }
            "pop" => {
                if abilities.pop().is_none() {
                    println!("No abilities to remove.");
                    continue;
                }
            }
            "clear" => abilities.clear(),
            "category" => {
                match parts.get(1).and_then(|name| parse_variant::<CardCategory>(name)) {
                    Some(c) => category = c,
                    None => {
                        println!("Usage: category <monster|spell|building>");
                        println!("  Current: {}", category.key());
                        continue;
                    }
                }
            }
            "list" => {
                for (i, record) in abilities.iter().enumerate() {
                    println!(
                        "  {}: {} {} {} {}",
                        i,
                        record.trigger.key(),
                        record.target.key(),
                        record.effect.key(),
                        record.value
                    );
                }
                continue;
            }
            "strict" => {
                match parts.get(1) {
                    Some(&"on") => strict = true,
                    Some(&"off") => strict = false,
                    _ => println!("Usage: strict <on|off>"),
                }
                continue;
            }
            _ => {
                println!("Unknown command: {}. Type 'help' for commands.", cmd);
                continue;
            }
        }

        print_description(&compiler, &abilities, category, strict);
    }
}

fn print_cards(compiler: &DescriptionCompiler, path: &Path, strict: bool) -> usize {
    let cards = match CardDefinition::load_all_from_ron(path) {
        Ok(cards) => cards,
        Err(e) => {
            eprintln!("ERROR: Failed to load cards from '{}': {}", path.display(), e);
            return 1;
        }
    };

    let mut failures = 0;
    for card in &cards {
        println!("=== {} ({}) ===", card.name, card.category.key());
        if !print_description(compiler, &card.abilities, card.category, strict) {
            failures += 1;
        }
        println!();
    }
    println!("{} cards, {} with missing mappings", cards.len(), failures);
    failures
}

/// Print the description; returns false if strict mode found gaps.
fn print_description(
    compiler: &DescriptionCompiler,
    abilities: &[AbilityRecord],
    category: CardCategory,
    strict: bool,
) -> bool {
    if !strict {
        println!("{}", compiler.compile(abilities, category));
        return true;
    }
    match compiler.compile_strict(abilities, category) {
        Ok(text) => {
            println!("{}", text);
            true
        }
        Err(e) => {
            println!("{}", e.rendered);
            for mapping in &e.missing {
                println!("  MISSING: {}", mapping);
            }
            false
        }
    }
}

fn parse_record(parts: &[&str]) -> Result<AbilityRecord, String> {
    let trigger = parse_variant::<Trigger>(parts[0])
        .ok_or_else(|| format!("Unknown trigger: {}", parts[0]))?;
    let target = parse_variant::<Target>(parts[1])
        .ok_or_else(|| format!("Unknown target: {}", parts[1]))?;
    let effect = parse_variant::<Effect>(parts[2])
        .ok_or_else(|| format!("Unknown effect: {}", parts[2]))?;
    let value = match parts.get(3) {
        Some(raw) => raw
            .parse::<i32>()
            .map_err(|_| format!("Invalid value: {}", raw))?,
        None => 0,
    };
    Ok(AbilityRecord::new(trigger, target, effect, value))
}

/// Accepts snake_case keys ("on_summon") or variant names ("OnSummon").
fn parse_variant<T: serde::de::DeserializeOwned>(name: &str) -> Option<T> {
    let variant: String = if name.contains('_') || name.chars().all(|c| c.is_lowercase()) {
        name.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect()
    } else {
        name.to_string()
    };
    ron::from_str(&variant).ok()
}

fn names(keys: impl Iterator<Item = &'static str>) -> String {
    keys.collect::<Vec<_>>().join(", ")
}

fn print_usage() {
    println!("Usage: preview [--locale <name>] [--tables <path>] [--cards <cards.ron>] [--strict]");
}

fn print_help() {
    println!("Commands:");
    println!("  add <trigger> <target> <effect> [value]  — append an ability");
    println!("  pop                                      — remove the last ability");
    println!("  clear                                    — remove all abilities");
    println!("  category <monster|spell|building>        — set the card category");
    println!("  list                                     — show the current abilities");
    println!("  strict <on|off>                          — report missing mappings");
    println!("  help                                     — list commands");
    println!("  quit                                     — exit");
}
