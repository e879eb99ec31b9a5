//! Per-parameter Fortran snippets. Each helper returns bare lines; the
//! caller applies the marker indentation.

use crate::model::{DataType, Param};

/// `integer, allocatable, public :: max_step`
pub fn decl(p: &Param) -> String {
    let shape = if p.is_array() { "(:)" } else { "" };
    format!("{}, allocatable, public :: {}{}", p.dtype.f90_decl(), p.name, shape)
}

/// Allocation followed by the default assignment.
pub fn default_block(p: &Param) -> Vec<String> {
    match p.size.f90_extent() {
        Some(extent) => vec![
            format!("allocate({}({}))", p.name, extent),
            format!("{}(:) = {}", p.name, p.default),
        ],
        None => vec![
            format!("allocate({})", p.name),
            format!("{} = {}", p.name, p.default),
        ],
    }
}

/// Dummy-argument declaration for a `bind(C)` accessor.
fn dummy_arg(p: &Param, intent: &str) -> String {
    match p.size.f90_extent() {
        Some(extent) => format!(
            "{}, intent({}) :: {}_in({})",
            p.dtype.f90_decl(),
            intent,
            p.name,
            extent
        ),
        None => format!("{}, intent({}) :: {}_in", p.dtype.f90_decl(), intent, p.name),
    }
}

fn bind_c(kind: &str, name: &str, args: &str) -> String {
    format!("subroutine {kind}_f90_{name}({args}) bind(C, name=\"{kind}_f90_{name}\")")
}

/// Fortran routines C++ calls to read the value of `p`.
pub fn get_function(p: &Param) -> Vec<String> {
    let n = &p.name;
    let mut out = Vec::new();

    match p.dtype {
        DataType::Character => {
            out.push(bind_c("get", &format!("{n}_len"), "slen_pp"));
            out.push("   integer, intent(inout) :: slen_pp".to_string());
            out.push(format!("   slen_pp = len(trim({n}))"));
            out.push(format!("end subroutine get_f90_{n}_len"));
            out.push(String::new());

            out.push(bind_c("get", n, &format!("{n}_in")));
            out.push(format!("   character(kind=c_char), intent(inout) :: {n}_in(*)"));
            out.push("   integer :: i_pp".to_string());
            out.push(format!("   do i_pp = 1, len(trim({n}))"));
            out.push(format!("      {n}_in(i_pp:i_pp) = {n}(i_pp:i_pp)"));
            out.push("   end do".to_string());
            out.push(format!("   {n}_in(len(trim({n}))+1) = char(0)"));
            out.push(format!("end subroutine get_f90_{n}"));
        }
        DataType::Logical => {
            out.push(bind_c("get", n, &format!("{n}_in")));
            out.push(format!("   integer, intent(inout) :: {n}_in"));
            out.push(format!("   {n}_in = 0"));
            out.push(format!("   if ({n}) then"));
            out.push(format!("      {n}_in = 1"));
            out.push("   endif".to_string());
            out.push(format!("end subroutine get_f90_{n}"));
        }
        DataType::Integer | DataType::Real => {
            out.push(bind_c("get", n, &format!("{n}_in")));
            out.push(format!("   {}", dummy_arg(p, "inout")));
            out.push(format!("   {n}_in = {n}"));
            out.push(format!("end subroutine get_f90_{n}"));
        }
    }

    out.push(String::new());
    out
}

/// Fortran routine C++ calls to push a new value into `p`. `None` for
/// logical and character parameters, which are read-only from C++.
pub fn set_function(p: &Param) -> Option<Vec<String>> {
    if !p.dtype.has_setter() {
        return None;
    }
    let n = &p.name;
    Some(vec![
        bind_c("set", n, &format!("{n}_in")),
        format!("   {}", dummy_arg(p, "in")),
        format!("   {n} = {n}_in"),
        format!("end subroutine set_f90_{n}"),
        String::new(),
    ])
}

/// `call pp%query("name", name)` for the Fortran ParmParse bindings.
pub fn query(p: &Param) -> String {
    let method = if p.is_array() { "queryarr" } else { "query" };
    format!("call pp%{}(\"{}\", {})", method, p.name, p.name)
}

/// Test of the current value against the default, stored in `ltest`.
pub fn default_test(p: &Param) -> String {
    let op = match p.dtype {
        DataType::Logical => ".eqv.",
        _ => "==",
    };
    if p.is_array() {
        format!("ltest = all({} {} {})", p.name, op, p.default)
    } else {
        format!("ltest = {} {} {}", p.name, op, p.default)
    }
}

/// Format label of the `printing` block matching the datatype.
pub fn format_label(dtype: DataType) -> u32 {
    match dtype {
        DataType::Character => 100,
        DataType::Integer => 101,
        DataType::Real => 102,
        DataType::Logical => 103,
    }
}

/// Two-line `write` statement for the job-info dump.
pub fn print_statement(p: &Param) -> Vec<String> {
    let value = match p.dtype {
        DataType::Character => format!("trim({})", p.name),
        _ => p.name.clone(),
    };
    vec![
        format!(
            "write (unit,{}) merge(\"   \", \"[*]\", ltest), &",
            format_label(p.dtype)
        ),
        format!("     \"{}\", {}", p.name, value),
    ]
}
