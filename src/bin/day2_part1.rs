use anyhow::{Context, Result};
use clap::Parser;
use day2_5_7_intcode::{
    gravity::run_alarm,
    int_code::{com::IntCodeComputer, read_int_code},
    CLIArgs,
};

#[derive(Debug, Parser)]
struct Args {
    #[command(flatten)]
    common: CLIArgs,
    #[arg(long, default_value_t = 12)]
    noun: i64,
    #[arg(long, default_value_t = 2)]
    verb: i64,
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
    let value = run_alarm(&computer, &int_code, args.noun, args.verb)?;
    println!(
        "After restoring alarm state({}, {}), program halts with code[0] = {}.",
        args.noun, args.verb, value
    );

    Ok(())
}
