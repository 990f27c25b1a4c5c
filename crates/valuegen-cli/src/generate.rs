//! Generate command: run a synthesis pass and write the artifacts.
//!
//! One file per artifact, named by the artifact's own addressing scheme, so
//! repeated runs overwrite in place and a clean diff means nothing changed.

use crate::manifest::Manifest;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use valuegen_core::CancellationToken;
use valuegen_emit::{PassOutcome, synthesize_all};

/// Machine-readable summary of one pass, for `--format json`.
#[derive(Debug, Serialize)]
struct PassSummary {
    artifacts: Vec<ArtifactSummary>,
    diagnostics: Vec<DiagnosticSummary>,
}

#[derive(Debug, Serialize)]
struct ArtifactSummary {
    file: String,
    #[serde(rename = "type")]
    type_name: String,
    emitter: &'static str,
    sha256: String,
}

#[derive(Debug, Serialize)]
struct DiagnosticSummary {
    #[serde(rename = "type")]
    type_name: String,
    message: String,
}

fn summarize(outcome: &PassOutcome) -> PassSummary {
    PassSummary {
        artifacts: outcome
            .artifacts
            .iter()
            .map(|a| ArtifactSummary {
                file: a.file_name(),
                type_name: a.type_name.clone(),
                emitter: a.kind.name(),
                sha256: a.content_hash.clone(),
            })
            .collect(),
        diagnostics: outcome
            .diagnostics
            .iter()
            .map(|d| DiagnosticSummary {
                type_name: d.type_name.clone(),
                message: d.message.clone(),
            })
            .collect(),
    }
}

/// Run code generation from a manifest.
pub fn run(manifest_path: Option<String>, output: &str, format: &str) -> Result<()> {
    let path = manifest_path.unwrap_or_else(|| "valuegen.toml".to_string());

    let manifest = Manifest::from_file(&path)?;
    manifest.validate()?;
    let request = manifest.to_request()?;

    tracing::info!(manifest = %path, types = request.targets.len(), "starting synthesis pass");

    let outcome = synthesize_all(&request, &CancellationToken::new())?;

    let output_dir = Path::new(output);
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    for artifact in &outcome.artifacts {
        let file_path = output_dir.join(artifact.file_name());
        std::fs::write(&file_path, &artifact.text)
            .with_context(|| format!("Failed to write artifact: {:?}", file_path))?;
    }

    match format {
        "json" => {
            let summary = summarize(&outcome);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        "text" => {
            for artifact in &outcome.artifacts {
                println!("✓ {}", artifact.file_name());
            }
            println!(
                "\nGenerated {} file(s) in {}",
                outcome.artifacts.len(),
                output
            );
            for diagnostic in &outcome.diagnostics {
                eprintln!("✗ {}: {}", diagnostic.type_name, diagnostic.message);
            }
        }
        other => anyhow::bail!("Unsupported output format: {} (expected text or json)", other),
    }

    if !outcome.diagnostics.is_empty() {
        anyhow::bail!("{} declaration(s) failed to synthesize", outcome.diagnostics.len());
    }

    Ok(())
}
