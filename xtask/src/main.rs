//! Developer tasks (schema generation, fixture normalization, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// The workspace root (parent of the xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(akashi_types::AkashiReport)
}

fn generate_ruleset_schema() -> schemars::Schema {
    schema_for!(akashi_settings::RulesetConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "akashi.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "akashi.ruleset.v1.json",
            generate: generate_ruleset_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Rewrite a report with placeholders for timestamps and tool version.
fn normalize_report(input: &Path, output: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    let mut json = serde_json::to_string_pretty(&akashi_test_util::normalize_nondeterministic(
        value,
    ))
    .context("Failed to serialize report")?;
    json.push('\n');

    fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

/// Check every fixture has the files the CLI tests read and a parseable ruleset.
fn check_fixtures() -> anyhow::Result<()> {
    let dir = fixtures_dir();
    let mut errors = Vec::new();
    let mut count = 0;

    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    entries.sort();

    for fixture in entries {
        count += 1;
        let name = fixture
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        for file in ["akashi.toml", "plan.json", "expected.report.json"] {
            if !fixture.join(file).exists() {
                errors.push(format!("{name}: missing {file}"));
            }
        }

        if let Ok(text) = fs::read_to_string(fixture.join("akashi.toml")) {
            let resolved = akashi_settings::parse_ruleset_toml(&text).and_then(|cfg| {
                akashi_settings::resolve_ruleset(cfg, akashi_settings::Overrides::default())
            });
            if let Err(err) = resolved {
                errors.push(format!("{name}: invalid ruleset: {err:#}"));
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {count} fixtures are complete");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!("Fixture check failed with {} errors", errors.len())
    }
}

/// Check that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = akashi_types::explain::all_check_ids();
    let codes = akashi_types::explain::all_codes();

    let mut errors = Vec::new();
    for (kind, ids) in [("Check ID", check_ids), ("Code", codes)] {
        for id in ids {
            match akashi_types::explain::lookup_explanation(id) {
                Some(exp) => {
                    if exp.title.is_empty() {
                        errors.push(format!("{kind} '{id}' has empty title"));
                    }
                    if exp.description.is_empty() {
                        errors.push(format!("{kind} '{id}' has empty description"));
                    }
                    if exp.remediation.is_empty() {
                        errors.push(format!("{kind} '{id}' has empty remediation"));
                    }
                }
                None => errors.push(format!("{kind} '{id}' has no explanation")),
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help                         Show this message");
    eprintln!("  emit-schemas                 Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas             Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids             Print known schema IDs");
    eprintln!("  explain-coverage             Validate all check IDs and codes have explanations");
    eprintln!("  check-fixtures               Validate tests/fixtures layout and rulesets");
    eprintln!("  normalize-report <in> [out]  Replace timestamps and version with placeholders");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "explain-coverage" => explain_coverage(),
        "check-fixtures" => check_fixtures(),
        "normalize-report" => {
            let input = args
                .get(2)
                .map(PathBuf::from)
                .context("normalize-report needs an input path")?;
            let output = args.get(3).map(PathBuf::from).unwrap_or_else(|| input.clone());
            normalize_report(&input, &output)
        }
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
