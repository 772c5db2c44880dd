//! Hierarchical process identifiers (`SUBWORKFLOW:PROCESS`, possibly nested deeper)
//! and the display label each one collapses to.

use crate::constants::{SUPER_MODULE_LABEL, SUPER_MODULE_PREFIX};

pub const SEGMENT_SEPARATOR: char = ':';

pub fn segments(identifier: &str) -> impl Iterator<Item = &str> {
    identifier.split(SEGMENT_SEPARATOR)
}

pub fn leaf(identifier: &str) -> &str {
    identifier
        .rsplit(SEGMENT_SEPARATOR)
        .next()
        .unwrap_or(identifier)
}

/// The label a process is displayed and grouped under.
///
/// A leaf starting with [`SUPER_MODULE_PREFIX`] collapses onto [`SUPER_MODULE_LABEL`];
/// anything else is shown as the first segment after the leading qualifier. An
/// identifier without a qualifier is already a label and is returned unchanged,
/// which keeps the rule idempotent.
pub fn collapse(identifier: &str) -> String {
    if leaf(identifier).starts_with(SUPER_MODULE_PREFIX) {
        return SUPER_MODULE_LABEL.to_string();
    }
    segments(identifier)
        .nth(1)
        .unwrap_or(identifier)
        .to_string()
}

/// Whether `identifier` sits under `group`, compared segment by segment.
pub fn is_within(identifier: &str, group: &str) -> bool {
    let mut ids = segments(identifier);
    segments(group).all(|expected| ids.next() == Some(expected))
}
