//! Reader for plain-text parameter tables.
//!
//! One parameter per line:
//!
//! ```text
//! max_step            integer      1
//! small_dt            real         1.d-10
//! xlo_boundary_type   character    ""
//! octant              logical      .false.
//! ```
//!
//! Columns are name, datatype and default. An optional 4th column of `y` or
//! `Y` puts the parameter in the namelist, an optional 5th gives the array
//! size (a positive integer or `nspec`). `#` starts a comment.

pub mod error;
pub mod lexer;

pub use error::ParamError;

use std::path::Path;

use tracing::debug;

use crate::model::{ArraySize, DataType, Param, ParamList};
use lexer::Fields;

/// Drop a trailing `#` comment.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse a single non-blank line into a `Param`. `line_no` is 1-based and
/// only used for error reporting.
pub fn parse_line(line: &str, path: &Path, line_no: usize) -> Result<Param, ParamError> {
    let fields: Vec<&str> = Fields::new(line).collect();

    let [name, dtype, default, rest @ ..] = fields.as_slice() else {
        return Err(ParamError::MissingFields {
            path: path.to_path_buf(),
            line: line_no,
        });
    };

    let dtype: DataType = dtype.parse().map_err(|dtype| ParamError::UnknownType {
        path: path.to_path_buf(),
        line: line_no,
        name: name.to_string(),
        dtype,
    })?;

    let mut param = Param::new(*name, dtype, *default);

    param.in_namelist = matches!(rest.first(), Some(&"y") | Some(&"Y"));

    if let Some(size) = rest.get(1) {
        param.size = size.parse::<ArraySize>().map_err(|size| ParamError::InvalidSize {
            path: path.to_path_buf(),
            line: line_no,
            name: name.to_string(),
            size,
        })?;
    }

    Ok(param)
}

/// Parse the contents of one table into `params`, replacing any earlier
/// definition of the same name.
pub fn parse_param_str(params: &mut ParamList, src: &str, path: &Path) -> Result<(), ParamError> {
    for (idx, raw) in src.lines().enumerate() {
        let line = strip_comment(raw);
        if line.trim().is_empty() {
            continue;
        }

        let param = parse_line(line, path, idx + 1)?;
        if let Some(old) = params.insert(param) {
            debug!("{}: `{}` overrides an earlier definition", path.display(), old.name);
        }
    }
    Ok(())
}

/// Read one table from disk into `params`.
pub fn parse_param_file(params: &mut ParamList, path: &Path) -> Result<(), ParamError> {
    let src = std::fs::read_to_string(path).map_err(|source| ParamError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_param_str(params, &src, path)
}

/// Read every table in order. Later tables take precedence.
pub fn load_param_files<P: AsRef<Path>>(paths: &[P]) -> Result<ParamList, ParamError> {
    let mut params = ParamList::new();
    for path in paths {
        parse_param_file(&mut params, path.as_ref())?;
    }
    debug!("merged {} parameters from {} files", params.len(), paths.len());
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<ParamList, ParamError> {
        let mut params = ParamList::new();
        parse_param_str(&mut params, src, Path::new("test_params"))?;
        Ok(params)
    }

    #[test]
    fn test_parse_basic_table() {
        let params = parse(
            "# leading comment\n\
             max_step    integer    1    y\n\
             \n\
             small_dt    real       1.d-10   # trailing comment\n\
             octant      logical    .false.\n\
             x_frac      real       0.0  Y  nspec\n\
             widths      integer    4    n  3\n",
        )
        .expect("valid table");

        assert_eq!(params.len(), 5);

        let max_step = params.get("max_step").unwrap();
        assert_eq!(max_step.dtype, DataType::Integer);
        assert_eq!(max_step.default, "1");
        assert!(max_step.in_namelist);
        assert_eq!(max_step.size, ArraySize::Scalar);
        assert_eq!(max_step.namespace, "problem");

        let small_dt = params.get("small_dt").unwrap();
        assert_eq!(small_dt.default, "1.d-10");
        assert!(!small_dt.in_namelist);

        assert!(!params.get("octant").unwrap().in_namelist);
        assert_eq!(params.get("x_frac").unwrap().size, ArraySize::NumSpec);
        assert!(params.get("x_frac").unwrap().in_namelist);
        assert_eq!(params.get("widths").unwrap().size, ArraySize::Fixed(3));
        assert!(!params.get("widths").unwrap().in_namelist);
    }

    #[test]
    fn test_indented_comment_line_is_skipped() {
        let params = parse("   # only a comment\nnu real 1.0\n").unwrap();
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_two_fields_is_an_error() {
        let err = parse("max_step integer 1\nbroken integer\n").unwrap_err();
        assert!(err.is_malformed());
        match err {
            ParamError::MissingFields { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_unknown_dtype_is_an_error() {
        let err = parse("z complex (1.0, 0.0)\n").unwrap_err();
        assert!(
            err.to_string().contains("invalid datatype `complex`"),
            "got error message: {err}"
        );
    }

    #[test]
    fn test_pair_default_keeps_later_columns() {
        let params = parse("c real (1.0, 2.0) y\nq character (\"x\", \"y\")\n").unwrap();

        let c = params.get("c").unwrap();
        assert_eq!(c.default, "(1.0, 2.0)");
        assert!(c.in_namelist);

        // quoted pairs split into words, so `"y"` lands in the namelist column
        let q = params.get("q").unwrap();
        assert_eq!(q.default, "\"x\"");
        assert!(!q.in_namelist);
        assert_eq!(q.size, ArraySize::Scalar);
    }

    #[test]
    fn test_bad_size_is_an_error() {
        let err = parse("a integer 1 y zero\n").unwrap_err();
        assert!(matches!(err, ParamError::InvalidSize { .. }));
    }

    #[test]
    fn test_redefinition_within_file() {
        let params = parse("a integer 1\nb integer 2\na integer 3 y\n").unwrap();
        let order: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
        assert_eq!(params.get("a").unwrap().default, "3");
    }

    #[test]
    fn test_missing_file() {
        let err = load_param_files(&["/nonexistent/_prob_params"]).unwrap_err();
        assert!(!err.is_malformed());
        assert!(err.to_string().contains("/nonexistent/_prob_params"));
    }
}
