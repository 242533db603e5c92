use std::collections::HashMap;

use crate::compile::compiler::{EntryInput, compile_entry};
use crate::compile::graph::DependencyGraph;
use crate::compile::resolve::Resolver;
use crate::directive::ast::ParsedDirectives;
use crate::directive::error::Diagnostic;
use crate::directive::parser::parse_directives;
use crate::eval::record::{CompiledRecord, VIEWPORT_SPAN};
use crate::foundation::core::ElementHandle;
use crate::foundation::error::{ScrollcueError, ScrollcueResult};
use crate::scene::geometry::{GeometryProvider, height_in_vh};

/// One element as read from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    /// Element id; assigned from [`CompileOpts::id_prefix`] when absent.
    pub id: Option<String>,
    /// Directive string, e.g. `"enter 100; duration 50"`.
    pub directives: String,
    /// Handle passed to the geometry provider and renderer.
    pub handle: ElementHandle,
}

impl RawEntry {
    /// Build an entry with an explicit id.
    pub fn new(
        id: impl Into<String>,
        directives: impl Into<String>,
        handle: ElementHandle,
    ) -> Self {
        Self {
            id: Some(id.into()),
            directives: directives.into(),
            handle,
        }
    }
}

/// Compile-pass options.
#[derive(Debug, Clone)]
pub struct CompileOpts {
    /// Fail on the first diagnostic instead of dropping the directive.
    pub strict: bool,
    /// Prefix for ids assigned to entries without one.
    pub id_prefix: String,
}

impl Default for CompileOpts {
    fn default() -> Self {
        Self {
            strict: false,
            id_prefix: "scroll-".to_owned(),
        }
    }
}

/// Result of one full compile pass.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompilationReport {
    /// One record per entry, in entry order.
    pub records: Vec<CompiledRecord>,
    /// Scrollable extent: latest `leave_at` minus one viewport.
    pub total_extent: f64,
    /// Dropped directives, in entry order.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationReport {
    /// Look up a record by id.
    pub fn record(&self, id: &str) -> Option<&CompiledRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

fn total_extent(records: &[CompiledRecord]) -> f64 {
    records
        .iter()
        .map(|r| r.enter_at + r.duration)
        .reduce(f64::max)
        .map_or(0.0, |end| end - VIEWPORT_SPAN)
}

fn assign_ids(entries: &[RawEntry], opts: &CompileOpts) -> ScrollcueResult<Vec<String>> {
    let mut ids = Vec::with_capacity(entries.len());
    let mut seen = HashMap::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let id = match &entry.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => format!("{}{i}", opts.id_prefix),
        };
        if let Some(prev) = seen.insert(id.clone(), i) {
            return Err(ScrollcueError::validation(format!(
                "duplicate element id '{id}' (entries {prev} and {i})"
            )));
        }
        ids.push(id);
    }
    Ok(ids)
}

fn build_graph(parsed: &[ParsedDirectives], index: &HashMap<String, usize>) -> DependencyGraph {
    let mut graph = DependencyGraph::with_nodes(parsed.len());
    for (from, p) in parsed.iter().enumerate() {
        for directive in p.directives.iter().filter(|d| d.allowed(p.absolute)) {
            for target in directive.references() {
                if let Some(&to) = index.get(target) {
                    graph.add_edge(from, to);
                }
            }
        }
    }
    graph
}

/// Compile every entry into a [`CompilationReport`].
///
/// Each entry is parsed once, the "reads from" graph between entries is
/// ordered dependencies-first, and records are then compiled in that order so
/// every reference sees a finalized record. Directive problems become
/// diagnostics; reference cycles and duplicate ids are fatal.
#[tracing::instrument(skip(entries, geometry), fields(entries = entries.len()))]
pub fn compile(
    entries: &[RawEntry],
    geometry: &dyn GeometryProvider,
    opts: &CompileOpts,
) -> ScrollcueResult<CompilationReport> {
    let ids = assign_ids(entries, opts)?;
    let index: HashMap<String, usize> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), i))
        .collect();

    let parsed: Vec<ParsedDirectives> = entries
        .iter()
        .map(|e| parse_directives(&e.directives))
        .collect();
    let mut diagnostics: Vec<Vec<Diagnostic>> = parsed
        .iter()
        .zip(&ids)
        .map(|(p, id)| {
            p.errors
                .iter()
                .map(|e| Diagnostic::new(id.as_str(), e.clone()))
                .collect()
        })
        .collect();

    let order = build_graph(&parsed, &index).compile_order(&ids)?;
    tracing::debug!(?order, "compile order");

    let mut records: Vec<Option<CompiledRecord>> = vec![None; entries.len()];
    for i in order {
        let input = EntryInput {
            id: &ids[i],
            handle: entries[i].handle,
            height_vh: height_in_vh(geometry, entries[i].handle),
            parsed: &parsed[i],
        };
        let resolver = Resolver {
            index: &index,
            records: &records,
        };
        let (record, errors) = compile_entry(&input, &resolver);
        tracing::debug!(
            id = %record.id,
            enter_at = record.enter_at,
            leave_at = record.leave_at,
            absolute = record.absolute,
            "compiled record"
        );
        diagnostics[i].extend(
            errors
                .into_iter()
                .map(|e| Diagnostic::new(ids[i].as_str(), e)),
        );
        records[i] = Some(record);
    }

    let diagnostics: Vec<Diagnostic> = diagnostics.into_iter().flatten().collect();
    for d in &diagnostics {
        tracing::warn!(id = %d.id, "{}", d.message);
    }
    if opts.strict
        && let Some(d) = diagnostics.first()
    {
        return Err(ScrollcueError::Directive {
            id: d.id.clone(),
            source: d.error.clone(),
        });
    }

    let records: Vec<CompiledRecord> = records.into_iter().flatten().collect();
    Ok(CompilationReport {
        total_extent: total_extent(&records),
        records,
        diagnostics,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/driver.rs"]
mod tests;
