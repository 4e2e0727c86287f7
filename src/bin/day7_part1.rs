use anyhow::{Context, Result};
use clap::Parser;
use day2_5_7_intcode::{
    amp::max_chain_signal,
    int_code::{com::IntCodeComputer, read_int_code},
    CLIArgs,
};

#[derive(Debug, Parser)]
struct Args {
    #[command(flatten)]
    common: CLIArgs,
    /// Phase settings to permute over the amplifiers
    #[arg(long, value_delimiter = ',', default_values_t = [0, 1, 2, 3, 4])]
    phases: Vec<i64>,
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
    let signal = max_chain_signal(&computer, &int_code, &args.phases)?;
    println!(
        "The highest signal that can be sent to the thrusters by amplifier chain is {}.",
        signal
    );

    Ok(())
}
