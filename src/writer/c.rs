//! Emit the C++ side of the problem parameters: the Fortran interop header,
//! the global-data header and the initialization unit.

use crate::model::{DataType, NAMESPACE, Param, ParamList};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const F_HEADER: &str = "
#ifndef problem_parameters_F_H
#define problem_parameters_F_H
#include <AMReX.H>
#include <AMReX_BLFort.H>

#ifdef __cplusplus
#include <AMReX.H>
extern \"C\"
{
#endif

void probdata_init(const int* name, const int* namlen);

void prob_params_pretty_print(int* jobinfo_file_name, const int* jobinfo_file_length);

void update_prob_params_after_cxx();

";

const F_FOOTER: &str = "
#ifdef __cplusplus
}
#endif

#endif
";

const H_HEADER: &str = "
#ifndef problem_parameters_H
#define problem_parameters_H
#include <AMReX_BLFort.H>

#include <network_properties.H>

";

const H_FOOTER: &str = "
#endif
";

/// The three file paths derived from `--cxx_prefix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CxxPaths {
    pub interop: PathBuf,
    pub header: PathBuf,
    pub source: PathBuf,
    /// Last path component of the prefix, used in include lines and
    /// function names.
    pub base: String,
}

impl CxxPaths {
    pub fn from_prefix(prefix: &str) -> Self {
        let base = Path::new(prefix)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| prefix.to_string());
        Self {
            interop: PathBuf::from(format!("{prefix}_parameters_F.H")),
            header: PathBuf::from(format!("{prefix}_parameters.H")),
            source: PathBuf::from(format!("{prefix}_parameters.cpp")),
            base,
        }
    }
}

pub fn emit(params: &ParamList, paths: &CxxPaths) -> io::Result<()> {
    let mut f = File::create(&paths.interop)?;
    write_interop_header(&mut f, params)?;

    let mut h = File::create(&paths.header)?;
    write_data_header(&mut h, params, &paths.base)?;

    let mut cpp = File::create(&paths.source)?;
    write_init_source(&mut cpp, params, &paths.base)?;

    Ok(())
}

/// `extern "C"` prototypes of the Fortran accessors.
pub fn write_interop_header<W: Write>(w: &mut W, params: &ParamList) -> io::Result<()> {
    write!(w, "{F_HEADER}")?;

    for p in params.iter() {
        let n = &p.name;
        if p.dtype == DataType::Character {
            writeln!(w, "  void get_f90_{n}(char* {n});\n")?;
            writeln!(w, "  void get_f90_{n}_len(int& slen);\n")?;
            writeln!(w, "  void set_f90_{n}_len(int& slen);\n")?;
        } else {
            let ty = p.dtype.cxx_decl();
            writeln!(w, "  void get_f90_{n}({ty}* {n});\n")?;
            writeln!(w, "  void set_f90_{n}({ty}* {n});\n")?;
        }
    }

    write!(w, "{F_FOOTER}")
}

/// `name[extent]` or plain `name`.
fn storage(p: &Param, qualified: &str) -> String {
    match p.size.cxx_extent() {
        Some(extent) => format!("{qualified}[{extent}]"),
        None => qualified.to_string(),
    }
}

/// One definition or `extern` declaration of the global for `p`.
fn global(p: &Param, qualified: &str) -> String {
    match p.dtype {
        DataType::Character => format!("std::string {qualified};"),
        _ => format!(
            "AMREX_GPU_MANAGED {} {};",
            p.dtype.cxx_decl(),
            storage(p, qualified)
        ),
    }
}

/// Global storage for every parameter inside `namespace problem`.
pub fn write_data_header<W: Write>(w: &mut W, params: &ParamList, base: &str) -> io::Result<()> {
    write!(w, "{H_HEADER}")?;

    writeln!(w, "  void init_{base}_parameters();\n")?;
    writeln!(w, "  void cxx_to_f90_{base}_parameters();\n")?;

    writeln!(w, "  namespace {NAMESPACE} {{\n")?;
    for p in params.iter() {
        writeln!(w, "  extern {}\n", global(p, &p.name))?;
    }
    writeln!(w, "  }}\n")?;

    write!(w, "{H_FOOTER}")
}

/// C++ ParmParse query for a namelist parameter.
fn query(p: &Param) -> String {
    let var = format!("{NAMESPACE}::{}", p.name);
    match p.size.cxx_extent() {
        Some(extent) => format!("pp.queryarr(\"{}\", {var}, 0, {extent});", p.name),
        None => format!("pp.query(\"{}\", {var});", p.name),
    }
}

/// Pointer expression handed to the Fortran accessors.
fn pointer(p: &Param) -> String {
    if p.is_array() {
        format!("{NAMESPACE}::{}", p.name)
    } else {
        format!("&{NAMESPACE}::{}", p.name)
    }
}

/// Definitions plus `init_<base>_parameters` and `cxx_to_f90_<base>_parameters`.
pub fn write_init_source<W: Write>(w: &mut W, params: &ParamList, base: &str) -> io::Result<()> {
    writeln!(w, "#include <{base}_parameters.H>")?;
    writeln!(w, "#include <{base}_parameters_F.H>\n")?;
    writeln!(w, "#include <AMReX_ParmParse.H>")?;
    writeln!(w, "#include <vector>\n")?;

    for p in params.iter() {
        let qualified = format!("{NAMESPACE}::{}", p.name);
        writeln!(w, "  {}\n", global(p, &qualified))?;
    }

    writeln!(w)?;
    writeln!(w, "  void init_{base}_parameters() {{")?;

    // 1. ── Pull the Fortran values (defaults or namelist) ────────────
    writeln!(w, "    // get the values of the parameters from Fortran\n")?;
    for p in params.iter() {
        let n = &p.name;
        if p.dtype == DataType::Character {
            writeln!(w, "    int slen_{n} = 0;")?;
            writeln!(w, "    get_f90_{n}_len(slen_{n});")?;
            writeln!(w, "    std::vector<char> _{n}(slen_{n}+1);")?;
            writeln!(w, "    get_f90_{n}(_{n}.data());")?;
            writeln!(w, "    {NAMESPACE}::{n} = std::string(_{n}.data());\n")?;
        } else {
            writeln!(w, "    get_f90_{n}({});\n", pointer(p))?;
        }
    }

    // 2. ── Inputs-file overrides ─────────────────────────────────────
    writeln!(
        w,
        "    // get the value from the inputs file (this overwrites the Fortran value)\n"
    )?;
    writeln!(w, "    {{")?;
    writeln!(w, "      amrex::ParmParse pp(\"{NAMESPACE}\");")?;
    for p in params.namelist() {
        writeln!(w, "      {}", query(p))?;
    }
    writeln!(w, "    }}")?;
    writeln!(w, "  }}")?;

    // 3. ── Push possibly modified values back to Fortran ─────────────
    writeln!(w, "  void cxx_to_f90_{base}_parameters() {{")?;
    writeln!(w, "    int slen = 0;\n")?;
    for p in params.iter().filter(|p| p.dtype.has_setter()) {
        writeln!(w, "    set_f90_{}({});\n", p.name, pointer(p))?;
    }
    writeln!(w, "  }}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ArraySize;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).expect("write to Vec");
        String::from_utf8(buf).expect("utf8")
    }

    fn sample() -> ParamList {
        let mut max_step = Param::new("max_step", DataType::Integer, "1");
        max_step.in_namelist = true;
        let mut x_frac = Param::new("x_frac", DataType::Real, "0.0d0");
        x_frac.in_namelist = true;
        x_frac.size = ArraySize::NumSpec;
        let octant = Param::new("octant", DataType::Logical, ".false.");
        let mut model = Param::new("model_name", DataType::Character, "\"\"");
        model.in_namelist = true;
        vec![max_step, x_frac, octant, model].into_iter().collect()
    }

    #[test]
    fn test_paths_from_prefix() {
        let paths = CxxPaths::from_prefix("tmp_build_dir/prob");
        assert_eq!(paths.base, "prob");
        assert_eq!(paths.interop, PathBuf::from("tmp_build_dir/prob_parameters_F.H"));
        assert_eq!(paths.header, PathBuf::from("tmp_build_dir/prob_parameters.H"));
        assert_eq!(paths.source, PathBuf::from("tmp_build_dir/prob_parameters.cpp"));
    }

    #[test]
    fn test_interop_header() {
        let out = render(|w| write_interop_header(w, &sample()));
        assert!(out.contains("  void get_f90_max_step(int* max_step);"));
        assert!(out.contains("  void set_f90_x_frac(amrex::Real* x_frac);"));
        assert!(out.contains("  void get_f90_model_name(char* model_name);"));
        assert!(out.contains("  void get_f90_model_name_len(int& slen);"));
        assert!(out.contains("  void set_f90_model_name_len(int& slen);"));
        assert!(out.trim_end().ends_with("#endif"));
    }

    #[test]
    fn test_data_header() {
        let out = render(|w| write_data_header(w, &sample(), "prob"));
        assert!(out.contains("  void init_prob_parameters();"));
        assert!(out.contains("  namespace problem {"));
        assert!(out.contains("  extern AMREX_GPU_MANAGED int max_step;"));
        assert!(out.contains("  extern AMREX_GPU_MANAGED amrex::Real x_frac[NumSpec];"));
        assert!(out.contains("  extern std::string model_name;"));
    }

    #[test]
    fn test_init_source() {
        let out = render(|w| write_init_source(w, &sample(), "prob"));
        assert!(out.contains("#include <prob_parameters.H>"));
        assert!(out.contains("    get_f90_max_step(&problem::max_step);"));
        assert!(out.contains("    get_f90_x_frac(problem::x_frac);"));
        assert!(out.contains("      amrex::ParmParse pp(\"problem\");"));
        assert!(out.contains("      pp.query(\"max_step\", problem::max_step);"));
        assert!(out.contains("      pp.queryarr(\"x_frac\", problem::x_frac, 0, NumSpec);"));
        assert!(out.contains("      pp.query(\"model_name\", problem::model_name);"));
        assert!(!out.contains("pp.query(\"octant\""));

        let sync = &out[out.find("cxx_to_f90_prob_parameters").unwrap()..];
        assert!(sync.contains("set_f90_max_step(&problem::max_step);"));
        assert!(sync.contains("set_f90_x_frac(problem::x_frac);"));
        assert!(!sync.contains("octant"));
        assert!(!sync.contains("model_name"));
    }
}
