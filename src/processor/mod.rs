//! Template expansion: the functional core of the generator.
pub mod fortran;
pub mod keywords;

use crate::model::ParamList;
use tracing::warn;

pub const MARKER: &str = "@@";

pub const HEADER: &str = "
! DO NOT EDIT THIS FILE!!!
!
! This file is generated by probgen at compile time from the _prob_params
! tables. Add or change runtime parameters there instead.

";

/// A marker found on a template line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker<'a> {
    pub keyword: &'a str,
    pub column: usize,
}

/// Locate `@@keyword@@` on `line`. The keyword spans from the first to the
/// last marker, so a lone `@@` yields an empty keyword.
pub fn find_marker(line: &str) -> Option<Marker<'_>> {
    let start = line.find(MARKER)?;
    let end = line.rfind(MARKER)?;
    let keyword = if end > start {
        &line[start + MARKER.len()..end]
    } else {
        ""
    };
    Some(Marker {
        keyword,
        column: start,
    })
}

/// Expand every marker of `template` against `params`. The result starts
/// with `HEADER`.
pub fn expand(template: &str, params: &ParamList) -> String {
    let mut out = String::from(HEADER);

    for line in template.split_inclusive('\n') {
        let Some(marker) = find_marker(line) else {
            out.push_str(line);
            continue;
        };

        let Some(expander) = keywords::lookup(marker.keyword) else {
            warn!("dropping template line with unknown keyword `{}`", marker.keyword);
            continue;
        };

        let indent = " ".repeat(marker.column);
        for generated in expander(params) {
            if !generated.is_empty() {
                out.push_str(&indent);
                out.push_str(&generated);
            }
            out.push('\n');
        }
    }

    out
}
