//! Header resolution: deciding which columns feed each logical field.

use qbank_model::{FieldMapping, HeaderMapping, LogicalField};
use serde::Serialize;
use tracing::{debug, warn};

use crate::columns::{HeaderGroups, group_headers};
use crate::error::{MappingError, Result};

/// Outcome of resolving one header set.
///
/// `mapping` is present exactly when `valid` is true. `missing` lists every
/// mandatory field with no usable column, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderResolution {
    pub valid: bool,
    pub mapping: Option<HeaderMapping>,
    pub warnings: Vec<String>,
    pub missing: Vec<LogicalField>,
}

impl HeaderResolution {
    /// Converts a rejected resolution into an error.
    pub fn into_result(self) -> Result<HeaderMapping> {
        match self.mapping {
            Some(mapping) if self.valid => Ok(mapping),
            _ => Err(MappingError::MissingFields {
                missing: self.missing,
            }),
        }
    }
}

/// Resolves a header set into a [`HeaderMapping`].
///
/// For the question and option fields a bilingual group with the expected
/// base (`question`, `optiona`, ...) takes precedence; otherwise the first
/// alias present among the single columns is used. The answer field never
/// rejects the batch: without a matching column it maps to no candidates and
/// every row later fails answer validation.
pub fn resolve_headers<S: AsRef<str>>(headers: &[S]) -> HeaderResolution {
    let groups = group_headers(headers);
    let mut warnings = Vec::new();
    let mut missing = Vec::new();
    let mut mapping = HeaderMapping::default();

    for field in LogicalField::ALL {
        match resolve_field(&groups, field) {
            Some(resolved) => {
                if resolved.is_bilingual() {
                    warnings.push(format!(
                        "Detected bilingual {} columns: {}",
                        field.label(),
                        resolved.source_headers().join(", ")
                    ));
                }
                debug!(field = field.key(), sources = ?resolved.source_headers(), "resolved field");
                *mapping.get_mut(field) = resolved;
            }
            None if field.is_mandatory() => {
                warnings.push(format!("No {} column found", field.label()));
                missing.push(field);
            }
            None => {
                warnings.push(format!(
                    "No {} column found; every row will fail answer validation",
                    field.label()
                ));
            }
        }
    }

    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|field| field.label()).collect();
        warn!(missing = ?labels, "header set rejected");
        return HeaderResolution {
            valid: false,
            mapping: None,
            warnings,
            missing,
        };
    }

    HeaderResolution {
        valid: true,
        mapping: Some(mapping),
        warnings,
        missing,
    }
}

/// Like [`resolve_headers`], but a rejected header set is an error.
pub fn resolve_headers_strict<S: AsRef<str>>(headers: &[S]) -> Result<HeaderMapping> {
    resolve_headers(headers).into_result()
}

fn resolve_field(groups: &HeaderGroups, field: LogicalField) -> Option<FieldMapping> {
    if let Some(base) = field.bilingual_base()
        && let Some(per_language) = groups.bilingual_group(base)
        && !per_language.is_empty()
    {
        return Some(FieldMapping::Bilingual {
            base: base.to_string(),
            per_language: per_language.clone(),
        });
    }
    field
        .aliases()
        .iter()
        .find(|alias| groups.has_single(alias))
        .map(|alias| FieldMapping::single(*alias))
}
