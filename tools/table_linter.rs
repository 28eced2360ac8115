/// Table Linter — reports phrase table coverage gaps and load errors.
///
/// Usage: table_linter <tables.ron|tables_dir> [--base <locale>]

use ability_text::core::phrases::{PhraseTables, TableKind};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: table_linter <tables.ron|tables_dir> [--base <locale>]");
        process::exit(0);
    }

    let tables_path = &args[1];
    let mut base_locale = None;

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--base" && i + 1 < args.len() {
            i += 1;
            base_locale = Some(args[i].clone());
        }
        i += 1;
    }

    let mut tables = PhraseTables::default();
    let mut errors = Vec::new();

    if let Some(ref locale) = base_locale {
        match PhraseTables::builtin_source(locale).map(PhraseTables::parse_ron) {
            Some(Ok(base)) => tables.merge(base),
            Some(Err(e)) => {
                eprintln!("ERROR: Built-in locale '{}' failed to load: {}", locale, e);
                process::exit(1);
            }
            None => {
                eprintln!("ERROR: No built-in locale '{}'", locale);
                process::exit(1);
            }
        }
    }

    let path = Path::new(tables_path);
    if path.is_file() {
        match PhraseTables::load_from_ron(path) {
            Ok(loaded) => tables.merge(loaded),
            Err(e) => errors.push(format!("{}: {}", path.display(), e)),
        }
    } else if path.is_dir() {
        load_tables_recursive(path, &mut tables, &mut errors);
    } else {
        eprintln!("ERROR: Path '{}' does not exist", tables_path);
        process::exit(1);
    }

    let warnings = lint_tables(&tables);

    println!("\n=== Phrase Table Lint Report ({}) ===\n", display_locale(&tables));

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn display_locale(tables: &PhraseTables) -> &str {
    if tables.locale.is_empty() {
        "unnamed locale"
    } else {
        &tables.locale
    }
}

fn load_tables_recursive(dir: &Path, tables: &mut PhraseTables, errors: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        errors.push(format!("{}: unreadable directory", dir.display()));
        return;
    };
    let mut paths: Vec<_> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            load_tables_recursive(&path, tables, errors);
        } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            match PhraseTables::load_from_ron(&path) {
                Ok(loaded) => {
                    println!("  Loaded: {}", path.display());
                    tables.merge(loaded);
                }
                Err(e) => errors.push(format!("{}: {}", path.display(), e)),
            }
        }
    }
}

fn lint_tables(tables: &PhraseTables) -> Vec<String> {
    let mut warnings: Vec<String> = tables
        .coverage_gaps()
        .iter()
        .map(|gap| format!("{}", gap))
        .collect();

    // Continuative and terminal phrases must agree on interpolation
    let mut effects: Vec<_> = tables.phrases.iter().collect();
    effects.sort_by_key(|(effect, _)| effect.key());
    for (effect, pair) in effects {
        if pair.terminal.uses_value() != pair.continuative.uses_value() {
            warnings.push(format!(
                "'{}' phrases disagree on {{value}}: terminal={}, continuative={}",
                effect.key(),
                pair.terminal.uses_value(),
                pair.continuative.uses_value()
            ));
        }
        if effect.has_magnitude() && !pair.terminal.uses_value() {
            warnings.push(format!(
                "'{}' carries a magnitude but its {} never shows {{value}}",
                effect.key(),
                TableKind::TerminalPhrase.key()
            ));
        }
    }

    let marks = [
        ("list_separator", &tables.punctuation.list_separator),
        ("clause_separator", &tables.punctuation.clause_separator),
        ("full_stop", &tables.punctuation.full_stop),
        ("line_break", &tables.punctuation.line_break),
        ("header_open", &tables.punctuation.header_open),
        ("header_close", &tables.punctuation.header_close),
    ];
    for (name, mark) in marks {
        if mark.is_none() {
            warnings.push(format!("punctuation '{}' is unset", name));
        }
    }

    if tables.default_particle.is_none() {
        warnings.push("no default_particle: unmapped effects get no particle".to_string());
    }

    warnings
}
