//! CLI entry point for akashi.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `akashi-app` crate.

use akashi_app::{
    CheckInput, ExplainOutput, InputPaths, parse_report_json, render_annotations,
    render_markdown, render_text, run_check, run_explain, runtime_error_report,
    serialize_report, to_renderable, verdict_exit_code,
};
use akashi_render::TextOptions;
use akashi_settings::{Overrides, RulesetFormat};
use akashi_types::AkashiReport;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "akashi",
    version,
    about = "Validate Terraform plan resource changes against a ruleset"
)]
struct Cli {
    /// Path to the ruleset (TOML, or JSON with a .json extension).
    #[arg(long, global = true, default_value = "akashi.toml")]
    ruleset: Utf8PathBuf,

    /// Override `strict` for every ruleset section (true|false).
    #[arg(long, global = true)]
    strict: Option<bool>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a JSON plan (`terraform show -json plan.out`) against the ruleset.
    Check {
        /// Path to the JSON plan.
        plan: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/akashi/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/akashi/comment.md")]
        markdown_out: Utf8PathBuf,

        /// Disable colored output.
        #[arg(long)]
        no_color: bool,

        /// Only print resources that fail.
        #[arg(long)]
        errors_only: bool,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/akashi/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/akashi/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id, a finding code, or a direction (create, delete, update).
    Explain {
        /// The check_id (e.g., "plan.created_resources") or code (e.g., "extra_argument").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.cmd {
        Commands::Check {
            plan,
            report_out,
            write_markdown,
            markdown_out,
            no_color,
            errors_only,
        } => cmd_check(
            &cli,
            plan,
            report_out,
            write_markdown.then_some(markdown_out.as_path()),
            TextOptions {
                color: !no_color && std::io::stdout().is_terminal(),
                errors_only: *errors_only,
            },
        ),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_check(
    cli: &Cli,
    plan_path: &Utf8Path,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
    text_options: TextOptions,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let ruleset_text = std::fs::read_to_string(&cli.ruleset)
            .with_context(|| format!("read ruleset: {}", cli.ruleset))?;
        let plan_text = std::fs::read_to_string(plan_path)
            .with_context(|| format!("read plan: {plan_path}"))?;

        let input = CheckInput {
            ruleset_text: &ruleset_text,
            ruleset_format: RulesetFormat::from_extension(cli.ruleset.extension()),
            plan_text: &plan_text,
            overrides: Overrides { strict: cli.strict },
            paths: InputPaths {
                ruleset: Some(cli.ruleset.as_path()),
                plan: Some(plan_path),
            },
        };

        let output = run_check(input)?;

        write_report_file(report_out, &output.report).context("write report json")?;

        let renderable = to_renderable(&output.report);
        if let Some(markdown_out) = markdown_out {
            let md = render_markdown(&renderable);
            write_text_file(markdown_out, &md).context("write markdown")?;
        }
        print!("{}", render_text(&renderable, text_options));

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "check aborted");
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(report_out, &report);
            eprintln!("akashi error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &AkashiReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<AkashiReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {path}"))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{md}");
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{annotation}");
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(topic) => {
            print!("{}", akashi_app::format_explanation(&topic));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            suggestions,
        } => {
            eprint!("{}", akashi_app::format_not_found(&identifier, &suggestions));
            std::process::exit(1);
        }
    }
}
