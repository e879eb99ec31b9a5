use clap::Parser;
use probgen::cli::SweepCli;
use probgen::logging::init_logging;
use probgen::sweep::{SweepRunner, SweepTable};

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = SweepCli::parse();

    let table = match &args.table {
        Some(path) => SweepTable::load(path)?,
        None => SweepTable::default(),
    };
    let dirs = table.directories();

    for dir in &dirs {
        println!("{}", dir.display());
    }

    if args.execute {
        let runner = SweepRunner {
            executable: args.executable,
            inputs: args.inputs,
        };
        runner.run(&dirs);
    }

    Ok(())
}
