//! Report unresolved keys, optionally creating them.

use super::Workspace;
use crate::diagnostics::{DiagnosticEngine, Finding, SourceLiteral};
use crate::fix::FixExecutor;
use crate::locator::KeyLocation;
use crate::placeholder::KeyPath;
use crate::source::{LineIndex, scan_java};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

/// Scan source files for unresolved `${...}` keys.
#[derive(Args)]
pub struct CheckCommand {
    /// Source files to check (default: every file matching `sources` under the project)
    #[arg(value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Create every unresolved key, then report what is left
    #[arg(long)]
    fix: bool,
}

/// Output format for `check`.
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `file:line:col: warning: ...` line per finding
    Text,
    /// A single JSON report
    Json,
}

struct SourceFile {
    path: PathBuf,
    text: String,
}

#[derive(Debug, Serialize)]
struct ReportedFinding {
    file: String,
    line: usize,
    column: usize,
    #[serde(flatten)]
    finding: Finding,
}

#[derive(Debug, Serialize)]
struct AppliedFix {
    key_path: KeyPath,
    location: Option<KeyLocation>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    files_scanned: usize,
    fixes: Vec<AppliedFix>,
    findings: Vec<ReportedFinding>,
}

impl CheckCommand {
    pub async fn execute(self, workspace: &Workspace) -> Result<bool> {
        let files = if self.paths.is_empty() {
            workspace.project.find_matching(&workspace.settings.sources)?
        } else {
            self.paths.clone()
        };
        let sources = read_sources(files).await?;

        let mut findings = analyze(workspace, &sources);
        let mut fixes = Vec::new();
        if self.fix && !findings.is_empty() {
            fixes = apply_fixes(workspace, &findings);
            findings = analyze(workspace, &sources);
        }

        let report = CheckReport {
            files_scanned: sources.len(),
            fixes,
            findings,
        };
        match self.format {
            OutputFormat::Text => print_text(&report),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }

        Ok(report.findings.is_empty())
    }
}

async fn read_sources(files: Vec<PathBuf>) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read source file {}", path.display()))?;
        sources.push(SourceFile { path, text });
    }
    Ok(sources)
}

/// One analysis pass over every source file.
fn analyze(workspace: &Workspace, sources: &[SourceFile]) -> Vec<ReportedFinding> {
    let engine = DiagnosticEngine::new(&workspace.project, &workspace.settings);
    let known = std::slice::from_ref(&workspace.settings.annotation);

    let mut reported = Vec::new();
    for source in sources {
        let literals: Vec<SourceLiteral> =
            scan_java(&source.text, known).into_iter().map(SourceLiteral::from).collect();
        debug!("{}: {} annotated literals", source.path.display(), literals.len());

        let index = LineIndex::new(&source.text);
        for finding in engine.analyze_all(&literals) {
            let (line, column) = index.position(finding.range.start);
            reported.push(ReportedFinding {
                file: workspace.display_path(&source.path).into_owned(),
                line,
                column,
                finding,
            });
        }
    }
    reported
}

/// Apply the fix of each distinct unresolved key once, in finding order.
fn apply_fixes(workspace: &Workspace, findings: &[ReportedFinding]) -> Vec<AppliedFix> {
    let executor = FixExecutor::new(&workspace.project, &workspace.settings);
    let mut seen = HashSet::new();

    findings
        .iter()
        .filter(|reported| seen.insert(reported.finding.key_path.clone()))
        .map(|reported| {
            let location = reported.finding.fix.apply_fix(&executor).map(|mut location| {
                location.file = PathBuf::from(workspace.display_path(&location.file).into_owned());
                location
            });
            AppliedFix {
                key_path: reported.finding.key_path.clone(),
                location,
            }
        })
        .collect()
}

fn print_text(report: &CheckReport) {
    for fix in &report.fixes {
        match &fix.location {
            Some(location) => println!(
                "{}: created key '{}' at {}:{}:{}",
                "fixed".green().bold(),
                fix.key_path,
                location.file.display(),
                location.line,
                location.column
            ),
            None => println!(
                "{}: could not create key '{}'",
                "warning".yellow().bold(),
                fix.key_path
            ),
        }
    }

    for reported in &report.findings {
        println!(
            "{}:{}:{}: {}: {}",
            reported.file.bold(),
            reported.line,
            reported.column,
            "warning".yellow().bold(),
            reported.finding.message
        );
    }

    let files = report.files_scanned;
    if report.findings.is_empty() {
        println!("{} No unresolved keys in {files} file(s)", "✓".green());
    } else {
        println!(
            "{} unresolved key(s) in {files} file(s)",
            report.findings.len().to_string().red().bold()
        );
    }
}
