//! Expansions for the `@@keyword@@` markers of a probdata template.
//!
//! Every expander is a pure function of the merged parameter list, looked up
//! by name through `lookup`.

use crate::model::{DUMMY_VAR, NAMESPACE, ParamList};

use super::fortran;

pub type Expander = fn(&ParamList) -> Vec<String>;

/// Keyword -> expansion. Order is irrelevant, names are unique.
pub const KEYWORDS: &[(&str, Expander)] = &[
    ("declarations", declarations),
    ("allocations", allocations),
    ("namelist", namelist),
    ("printing", printing),
    ("cxx_gets", cxx_gets),
    ("cxx_sets", cxx_sets),
    ("fortran_parmparse_overrides", parmparse_overrides),
];

pub fn lookup(keyword: &str) -> Option<Expander> {
    KEYWORDS
        .iter()
        .find(|(name, _)| *name == keyword)
        .map(|&(_, f)| f)
}

fn declarations(params: &ParamList) -> Vec<String> {
    let mut out = Vec::with_capacity(params.len() + 1);
    if !params.has_namelist() {
        out.push(format!("integer, save, public :: {DUMMY_VAR} = 0"));
    }
    out.extend(params.iter().map(fortran::decl));
    out
}

fn allocations(params: &ParamList) -> Vec<String> {
    params.iter().flat_map(fortran::default_block).collect()
}

fn namelist(params: &ParamList) -> Vec<String> {
    if !params.has_namelist() {
        return vec![format!("namelist /fortin/ {DUMMY_VAR}")];
    }
    params
        .namelist()
        .map(|p| format!("namelist /fortin/ {}", p.name))
        .collect()
}

fn printing(params: &ParamList) -> Vec<String> {
    let mut out = vec![
        "100 format (1x, a3, 2x, a32, 1x, \"=\", 1x, a)".to_string(),
        "101 format (1x, a3, 2x, a32, 1x, \"=\", 1x, i10)".to_string(),
        "102 format (1x, a3, 2x, a32, 1x, \"=\", 1x, g20.10)".to_string(),
        "103 format (1x, a3, 2x, a32, 1x, \"=\", 1x, l)".to_string(),
    ];
    for p in params.namelist() {
        out.push(String::new());
        out.push(fortran::default_test(p));
        out.extend(fortran::print_statement(p));
    }
    out
}

fn cxx_gets(params: &ParamList) -> Vec<String> {
    params.iter().flat_map(fortran::get_function).collect()
}

fn cxx_sets(params: &ParamList) -> Vec<String> {
    params
        .iter()
        .filter_map(fortran::set_function)
        .flatten()
        .collect()
}

fn parmparse_overrides(params: &ParamList) -> Vec<String> {
    let mut out = vec![format!("call amrex_parmparse_build(pp, \"{NAMESPACE}\")")];
    out.extend(params.namelist().map(fortran::query));
    out.push("call amrex_parmparse_destroy(pp)".to_string());
    out.extend([String::new(), String::new()]);
    out
}
