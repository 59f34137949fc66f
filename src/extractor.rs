//! Splitting a generated amalgamation back into its source files.
//!
//! Each recovered file holds the non-blank lines of its block, with every
//! nested block collapsed back into a `#include "<id>"` directive at the
//! position it was inlined. Blank lines and repeated includes that were
//! dropped during amalgamation cannot be recovered.

use crate::markers::BLOCK_BORDER;
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^//   (begin|end) of "(.+)"$"#).expect("valid marker regex"));

/// One file recovered from an amalgamation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    pub id: String,
    pub content: String,
}

enum Marker<'a> {
    Begin(&'a str),
    End(&'a str),
}

/// Recognises a border/marker/border triple starting at `lines[i]`.
fn marker_at<'a>(lines: &[&'a str], i: usize) -> Option<Marker<'a>> {
    if i + 2 >= lines.len() || lines[i] != BLOCK_BORDER || lines[i + 2] != BLOCK_BORDER {
        return None;
    }

    let caps = MARKER_RE.captures(lines[i + 1])?;
    let id = caps.get(2)?.as_str();
    match caps.get(1)?.as_str() {
        "begin" => Some(Marker::Begin(id)),
        _ => Some(Marker::End(id)),
    }
}

/// Splits amalgamated text into files, in the order they were first inlined.
pub fn split_amalgamation(text: &str) -> Result<Vec<ExtractedFile>> {
    let lines: Vec<&str> = text.lines().collect();

    // (slot in `files`, lines collected so far)
    let mut stack: Vec<(usize, Vec<String>)> = Vec::new();
    let mut files: Vec<ExtractedFile> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        match marker_at(&lines, i) {
            Some(Marker::Begin(id)) => {
                if files.iter().any(|f| f.id == id) {
                    bail!("\"{id}\" appears more than once");
                }
                if let Some((_, parent)) = stack.last_mut() {
                    parent.push(format!("#include \"{id}\""));
                }
                files.push(ExtractedFile {
                    id: id.to_string(),
                    content: String::new(),
                });
                stack.push((files.len() - 1, Vec::new()));
                i += 3;
            }
            Some(Marker::End(id)) => {
                let (slot, body) = stack
                    .pop()
                    .ok_or_else(|| anyhow!("end marker for \"{id}\" has no matching begin"))?;
                if files[slot].id != id {
                    bail!(
                        "end marker for \"{id}\" closes block \"{}\"",
                        files[slot].id
                    );
                }
                debug!("Recovered \"{id}\" ({} lines)", body.len());
                files[slot].content = body.iter().map(|l| format!("{l}\n")).collect();
                i += 3;
            }
            None => {
                let line = lines[i];
                if let Some((_, body)) = stack.last_mut() {
                    if !line.trim().is_empty() {
                        body.push(line.to_string());
                    }
                }
                i += 1;
            }
        }
    }

    if let Some((slot, _)) = stack.last() {
        bail!("block \"{}\" is never closed", files[*slot].id);
    }
    if files.is_empty() {
        bail!("no file markers found");
    }

    Ok(files)
}

fn is_safe_relative(id: &str) -> bool {
    let path = Path::new(id);
    !id.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Restores every file in `input` under `output_dir` (defaults to the
/// directory containing `input`). Returns the paths written.
pub async fn extract_from_amalgamation(
    input: &Path,
    output_dir: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let text = fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let files = split_amalgamation(&text)
        .with_context(|| format!("Failed to split {}", input.display()))?;

    let base = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let mut written = Vec::with_capacity(files.len());
    for file in &files {
        if !is_safe_relative(&file.id) {
            bail!("Refusing to write \"{}\" outside {}", file.id, base.display());
        }

        let target = base.join(&file.id);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&target, &file.content)
            .await
            .with_context(|| format!("Failed to write {}", target.display()))?;

        debug!("Restored {}", target.display());
        written.push(target);
    }

    info!("Restored {} file(s) into {}", written.len(), base.display());
    Ok(written)
}
