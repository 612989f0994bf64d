//! Table-name and header normalization ahead of table creation.

use log::debug;

use ql_query::{check_attr_name, check_table_name, NameCheck, QueryError};

use crate::error::{TabularError, TabularResult};
use crate::table::TableData;

/// What to do when two headers normalize to the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DupColHandler {
    /// Fail with [`TabularError::DuplicateColumn`].
    #[default]
    Error,
    /// Append `_1`, `_2`, .. to later duplicates.
    Rename,
}

/// Normalizes a [`TableData`] into something SQLite will accept: a clean
/// table name, non-empty unique headers, keywords renamed out of the way.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableDataSanitizer {
    dup_col_handler: DupColHandler,
}

impl TableDataSanitizer {
    pub fn new(dup_col_handler: DupColHandler) -> Self {
        Self { dup_col_handler }
    }

    /// Produce a normalized copy of the table data.
    pub fn normalize(&self, data: &TableData) -> TabularResult<TableData> {
        let table_name = normalize_table_name(data.name())?;
        let headers = self.normalize_headers(data.headers())?;
        if table_name != data.name() || headers != data.headers() {
            debug!(
                "sanitized table data: '{}' -> '{table_name}'",
                data.name()
            );
        }

        Ok(TableData::new(table_name, headers, data.rows().to_vec()))
    }

    fn normalize_headers(&self, raw: &[String]) -> TabularResult<Vec<String>> {
        let mut headers: Vec<String> = Vec::with_capacity(raw.len());
        for (idx, header) in raw.iter().enumerate() {
            let name = if header.is_empty() {
                default_header(idx, raw)
            } else {
                normalize_header(header)
            };
            headers.push(name);
        }

        self.resolve_duplicates(headers)
    }

    fn resolve_duplicates(&self, headers: Vec<String>) -> TabularResult<Vec<String>> {
        let mut resolved: Vec<String> = Vec::with_capacity(headers.len());
        for header in headers {
            if !resolved.contains(&header) {
                resolved.push(header);
                continue;
            }
            match self.dup_col_handler {
                DupColHandler::Error => {
                    return Err(TabularError::DuplicateColumn { name: header });
                }
                DupColHandler::Rename => {
                    let mut suffix = 1;
                    let renamed = loop {
                        let candidate = format!("{header}_{suffix}");
                        if !resolved.contains(&candidate) {
                            break candidate;
                        }
                        suffix += 1;
                    };
                    debug!("renamed duplicate header '{header}' -> '{renamed}'");
                    resolved.push(renamed);
                }
            }
        }
        Ok(resolved)
    }
}

fn normalize_table_name(name: &str) -> TabularResult<String> {
    let replaced = replace_symbols(name);
    if replaced.is_empty() {
        return Err(TabularError::Name(QueryError::NameValidation {
            name: name.to_string(),
            reason: "table name is empty after sanitization".to_string(),
        }));
    }

    // Reusable keywords survive as table names (they are quoted at render
    // time); only non-reusable keywords need renaming.
    match check_table_name(&replaced)? {
        NameCheck::Ok | NameCheck::ReservedReusable => Ok(replaced),
        NameCheck::ReservedNonReusable => Ok(format!("rename_{replaced}")),
    }
}

fn normalize_header(header: &str) -> String {
    let name: String = header
        .chars()
        .filter(|c| !c.is_ascii_control())
        .map(|c| {
            if matches!(c, '\'' | '"' | ',') {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Keyword headers stay as-is; attribute rendering double-quotes them.
    // Only names the validator rejects outright get renamed.
    match check_attr_name(&name) {
        Ok(_) => name,
        Err(_) => format!("rename_{name}"),
    }
}

/// Replace symbol runs with a single underscore and strip the edges.
fn replace_symbols(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else if !c.is_control() {
            pending_sep = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// Spreadsheet-style default header for an unnamed column, skipping names
/// already present (case-insensitive).
fn default_header(idx: usize, existing: &[String]) -> String {
    let mut i = idx;
    loop {
        let candidate = idx_to_alphabet(i);
        let taken = existing
            .iter()
            .any(|h| h.eq_ignore_ascii_case(&candidate));
        if !taken {
            return candidate;
        }
        i += 1;
    }
}

fn idx_to_alphabet(mut idx: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_else(|_| "A".to_string())
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod tests;
