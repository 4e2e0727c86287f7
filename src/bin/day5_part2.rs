use anyhow::{anyhow, Context, Result};
use clap::Parser;
use day2_5_7_intcode::{
    diagnostic::run_diagnostic,
    int_code::{com::IntCodeComputer, read_int_code},
    CLIArgs,
};

#[derive(Debug, Parser)]
struct Args {
    #[command(flatten)]
    common: CLIArgs,
    /// ID of the system under test, the only input of the program
    #[arg(long, default_value_t = 5)]
    system_id: i64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let int_code = read_int_code(&args.common.input_path).with_context(|| {
        format!(
            "Failed to read int code from given file({}).",
            args.common.input_path.display()
        )
    })?;

    let computer = IntCodeComputer::new(args.common.decode_policy());
    let code = run_diagnostic(&computer, &int_code, args.system_id)?
        .code()
        .ok_or_else(|| anyhow!("System({}) produced no output.", args.system_id))?;
    println!(
        "The diagnostic code for system({}) is {}.",
        args.system_id, code
    );

    Ok(())
}
