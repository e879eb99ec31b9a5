// every generated parameter lives in this ParmParse / C++ namespace
pub const NAMESPACE: &str = "problem";

// placeholder that keeps the `fortin` namelist non-empty
pub const DUMMY_VAR: &str = "a_pp_dummy_var";

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

/// The four value types a parameter table may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Integer,
    Real,
    Character,
    Logical,
}

impl DataType {
    /// Fortran type spelling used in declarations and dummy arguments.
    pub fn f90_decl(self) -> &'static str {
        match self {
            DataType::Integer => "integer",
            DataType::Real => "real (kind=rt)",
            DataType::Character => "character (len=256)",
            DataType::Logical => "logical",
        }
    }

    /// C++ storage type. Fortran logicals cross the boundary as 0/1 ints.
    pub fn cxx_decl(self) -> &'static str {
        match self {
            DataType::Integer | DataType::Logical => "int",
            DataType::Real => "amrex::Real",
            DataType::Character => "std::string",
        }
    }

    /// Setters and the C++ -> Fortran sync are only generated for numeric types.
    pub fn has_setter(self) -> bool {
        matches!(self, DataType::Integer | DataType::Real)
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" | "int" => Ok(DataType::Integer),
            "real" => Ok(DataType::Real),
            "character" | "string" => Ok(DataType::Character),
            "logical" | "bool" => Ok(DataType::Logical),
            other => Err(other.to_string()),
        }
    }
}

/// Scalar, fixed-length array, or one entry per chemical species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArraySize {
    Scalar,
    Fixed(u32),
    #[serde(rename = "nspec")]
    NumSpec,
}

impl ArraySize {
    pub fn is_array(self) -> bool {
        !matches!(self, ArraySize::Scalar)
    }

    /// Extent as written in Fortran (`nspec` comes from the network module).
    pub fn f90_extent(self) -> Option<String> {
        match self {
            ArraySize::Scalar => None,
            ArraySize::Fixed(n) => Some(n.to_string()),
            ArraySize::NumSpec => Some("nspec".to_string()),
        }
    }

    /// Extent as written in C++ (`NumSpec` comes from network_properties.H).
    pub fn cxx_extent(self) -> Option<String> {
        match self {
            ArraySize::Scalar => None,
            ArraySize::Fixed(n) => Some(n.to_string()),
            ArraySize::NumSpec => Some("NumSpec".to_string()),
        }
    }
}

impl FromStr for ArraySize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "nspec" {
            return Ok(ArraySize::NumSpec);
        }
        match s.parse::<u32>() {
            Ok(0) | Err(_) => Err(s.to_string()),
            Ok(1) => Ok(ArraySize::Scalar),
            Ok(n) => Ok(ArraySize::Fixed(n)),
        }
    }
}

/// One runtime parameter as read from a parameter table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub dtype: DataType,
    pub default: String,
    pub namespace: &'static str,
    pub in_namelist: bool,
    pub size: ArraySize,
}

impl Param {
    pub fn new(name: impl Into<String>, dtype: DataType, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype,
            default: default.into(),
            namespace: NAMESPACE,
            in_namelist: false,
            size: ArraySize::Scalar,
        }
    }

    pub fn is_array(&self) -> bool {
        self.size.is_array()
    }
}

/// Merged parameters from every table, keyed by name.
///
/// Redefining a name drops the old entry and appends the new one, so
/// iteration order is "order of last definition".
#[derive(Debug, Default, Clone)]
pub struct ParamList {
    by_seq: BTreeMap<u64, Param>,
    seq_of: HashMap<String, u64>,
    next_seq: u64,
}

impl ParamList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `param`, returning the definition it replaced, if any.
    pub fn insert(&mut self, param: Param) -> Option<Param> {
        let seq = self.next_seq;
        self.next_seq += 1;

        let replaced = self
            .seq_of
            .insert(param.name.clone(), seq)
            .and_then(|old| self.by_seq.remove(&old));
        self.by_seq.insert(seq, param);
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.seq_of.get(name).and_then(|seq| self.by_seq.get(seq))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.by_seq.values()
    }

    pub fn namelist(&self) -> impl Iterator<Item = &Param> {
        self.iter().filter(|p| p.in_namelist)
    }

    pub fn has_namelist(&self) -> bool {
        self.namelist().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.by_seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_seq.is_empty()
    }
}

impl Serialize for ParamList {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl FromIterator<Param> for ParamList {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        let mut list = ParamList::new();
        for p in iter {
            list.insert(p);
        }
        list
    }
}
