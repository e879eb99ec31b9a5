use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate probdata Fortran/C++ glue from parameter tables")]
pub struct Cli {
    /// probdata template with @@keyword@@ markers
    #[arg(short = 't')]
    pub template: PathBuf,

    /// Expanded Fortran output file
    #[arg(short = 'o')]
    pub output: PathBuf,

    /// Parameter tables, space separated (quote the list)
    #[arg(short = 'p', default_value = "")]
    pub params: String,

    /// Prefix (and optional directory) of the generated C++ files
    #[arg(long = "cxx_prefix", default_value = "prob")]
    pub cxx_prefix: String,

    /// Also write the merged parameter list as JSON
    #[arg(long = "dump-params")]
    pub dump_params: Option<PathBuf>,
}

impl Cli {
    pub fn param_files(&self) -> Vec<PathBuf> {
        self.params.split_whitespace().map(PathBuf::from).collect()
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Run the simulation across the sweep directories")]
pub struct SweepCli {
    /// JSON table of `{ "name", "low", "high" }` entries replacing the built-in one
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Simulation executable, resolved inside each directory
    #[arg(long = "exe", default_value = crate::sweep::DEFAULT_EXECUTABLE)]
    pub executable: PathBuf,

    /// Inputs file handed to the executable
    #[arg(long, default_value = crate::sweep::DEFAULT_INPUTS)]
    pub inputs: String,

    /// Launch the runs; without this only the directory list is printed
    #[arg(long)]
    pub execute: bool,
}
