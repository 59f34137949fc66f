//! Depth-first include expansion.
//!
//! Every file is inlined at most once, at the position of the first directive
//! that names it anywhere in the walk. A directive naming a file that has
//! already been inlined (including the root itself, which makes cycles
//! terminate) is dropped silently.

use crate::directive::{is_malformed_include, parse_include};
use crate::error::{ResolveError, ResolveResult};
use crate::markers::{BLOCK_BORDER, begin_marker, end_marker};
use content_inspector::{ContentType, inspect};
use log::{debug, info};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const UTF8_BOM: char = '\u{feff}';

/// Expands include directives against a single flat source directory.
#[derive(Debug, Clone)]
pub struct Resolver {
    source_dir: PathBuf,
    strict: bool,
}

/// State for one top-level walk.
struct Walk {
    visited: HashSet<String>,
    order: Vec<String>,
}

impl Walk {
    fn new(root_id: &str) -> Self {
        Self {
            visited: HashSet::from([root_id.to_string()]),
            order: vec![root_id.to_string()],
        }
    }

    /// Marks `id` as visited; false if it was already there.
    fn visit(&mut self, id: &str) -> bool {
        if self.visited.insert(id.to_string()) {
            self.order.push(id.to_string());
            true
        } else {
            false
        }
    }
}

impl Resolver {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            strict: false,
        }
    }

    /// Rejects quoted include lines that do not parse cleanly instead of
    /// passing them through as content.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Expands `root_id` and everything it transitively includes.
    pub fn resolve(&self, root_id: &str) -> ResolveResult<String> {
        let mut walk = Walk::new(root_id);
        let text = self.expand(root_id, &mut walk)?;

        info!(
            "Resolved {} file(s) from {}",
            walk.order.len(),
            self.source_dir.join(root_id).display()
        );
        debug!("Inclusion order: {:?}", walk.order);

        Ok(text)
    }

    fn expand(&self, id: &str, walk: &mut Walk) -> ResolveResult<String> {
        debug!("Expanding \"{id}\"");
        let source = self.read_source(id)?;

        let mut parts: Vec<String> = vec![
            "\n".to_string(),
            BLOCK_BORDER.to_string(),
            begin_marker(id),
            BLOCK_BORDER.to_string(),
        ];

        for (index, line) in split_lines(&source).enumerate() {
            if self.strict && is_malformed_include(line) {
                return Err(ResolveError::MalformedDirective {
                    id: id.to_string(),
                    line: index + 1,
                    text: line.to_string(),
                });
            }

            if let Some(target) = parse_include(line) {
                if walk.visit(target) {
                    parts.push(self.expand(target, walk)?);
                } else {
                    debug!("Dropping repeated include of \"{target}\" in \"{id}\"");
                }
            } else if !line.trim().is_empty() {
                parts.push(line.to_string());
            }
        }

        parts.extend([
            BLOCK_BORDER.to_string(),
            end_marker(id),
            BLOCK_BORDER.to_string(),
            String::new(),
        ]);

        Ok(parts.join("\n"))
    }

    /// Reads a whole file; the handle is closed before any recursion happens.
    fn read_source(&self, id: &str) -> ResolveResult<String> {
        let path = self.source_dir.join(id);

        let bytes = std::fs::read(&path).map_err(|source| ResolveError::Missing {
            id: id.to_string(),
            path: path.clone(),
            source,
        })?;

        let sample_size = std::cmp::min(8192, bytes.len());
        let content_type = inspect(&bytes[..sample_size]);
        if content_type == ContentType::BINARY {
            return Err(ResolveError::NotText {
                id: id.to_string(),
                path,
            });
        }

        let text = String::from_utf8(bytes).map_err(|_| ResolveError::NotText {
            id: id.to_string(),
            path: path.clone(),
        })?;

        Ok(match text.strip_prefix(UTF8_BOM) {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }
}

/// Splits on `\r\n`, `\n` and a lone `\r`.
fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    let mut rest = source;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\n', '\r']) {
            Some(pos) => {
                let line = &rest[..pos];
                let width = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + width..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Expands `root_id` found in `source_dir` with default (permissive) settings.
pub fn resolve(root_id: &str, source_dir: &Path) -> ResolveResult<String> {
    Resolver::new(source_dir).resolve(root_id)
}
