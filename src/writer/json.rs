//! Dump the merged parameter list as JSON.

use crate::model::ParamList;
use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn to_string(params: &ParamList) -> Result<String> {
    Ok(serde_json::to_string_pretty(params)?)
}

pub fn emit(params: &ParamList, out_file: &Path) -> Result<()> {
    let mut json = to_string(params)?;
    json.push('\n');
    fs::write(out_file, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArraySize, DataType, Param};
    use serde_json::{Value, json};

    #[test]
    fn test_dump_shape() {
        let mut x = Param::new("x_frac", DataType::Real, "0.0");
        x.in_namelist = true;
        x.size = ArraySize::NumSpec;
        let mut w = Param::new("widths", DataType::Integer, "4");
        w.size = ArraySize::Fixed(3);
        let params: ParamList = vec![x, w].into_iter().collect();

        let value: Value = serde_json::from_str(&to_string(&params).unwrap()).unwrap();
        assert_eq!(
            value,
            json!([
                {
                    "name": "x_frac",
                    "dtype": "real",
                    "default": "0.0",
                    "namespace": "problem",
                    "in_namelist": true,
                    "size": "nspec"
                },
                {
                    "name": "widths",
                    "dtype": "integer",
                    "default": "4",
                    "namespace": "problem",
                    "in_namelist": false,
                    "size": { "fixed": 3 }
                }
            ])
        );
    }
}
