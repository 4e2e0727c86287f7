use anyhow::{anyhow, Context, Result};
use clap::Parser;
use day2_5_7_intcode::{
    gravity::{alarm_answer, search_noun_verb},
    int_code::{com::IntCodeComputer, read_int_code},
    CLIArgs,
};

#[derive(Debug, Parser)]
struct Args {
    #[command(flatten)]
    common: CLIArgs,
    /// Value expected in code[0] after the program halts
    #[arg(long, default_value_t = 19690720)]
    goal: i64,
    /// Nouns and verbs are searched in 0..grid-size
    #[arg(long, default_value_t = 100)]
    grid_size: i64,
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
    let (noun, verb) = search_noun_verb(&computer, &int_code, args.goal, args.grid_size)
        .ok_or_else(|| anyhow!("No noun and verb below {} produce {}.", args.grid_size, args.goal))?;
    let answer = alarm_answer(noun, verb)
        .ok_or_else(|| anyhow!("100 * noun({}) + verb({}) overflows.", noun, verb))?;
    println!(
        "Noun({}) and verb({}) produce {}, 100 * noun + verb = {}.",
        noun, verb, args.goal, answer
    );

    Ok(())
}
