use log::debug;

use crate::{int_code::com::IntCodeComputer, Error};

/// Copy of `int_code` in "1202 program alarm" shape, noun in cell 1 and verb in cell 2.
pub fn restore_alarm(int_code: &[i64], noun: i64, verb: i64) -> Result<Vec<i64>, Error> {
    if int_code.len() < 3 {
        return Err(Error::ImageIndexError(2));
    }

    let mut image = Vec::from(int_code);
    image[1] = noun;
    image[2] = verb;

    Ok(image)
}

pub fn run_alarm(
    computer: &IntCodeComputer,
    int_code: &[i64],
    noun: i64,
    verb: i64,
) -> Result<i64, Error> {
    let image = restore_alarm(int_code, noun, verb)?;
    let res = computer.execute(&image, &[])?;
    Ok(res.image()[0])
}

/// Puzzle answer for a found pair, `100 * noun + verb`, `None` on overflow.
pub fn alarm_answer(noun: i64, verb: i64) -> Option<i64> {
    noun.checked_mul(100).and_then(|n| n.checked_add(verb))
}

/// First (noun, verb) pair below `grid_size` whose run leaves `goal` in cell 0.
pub fn search_noun_verb(
    computer: &IntCodeComputer,
    int_code: &[i64],
    goal: i64,
    grid_size: i64,
) -> Option<(i64, i64)> {
    for noun in 0..grid_size {
        for verb in 0..grid_size {
            match run_alarm(computer, int_code, noun, verb) {
                Ok(value) if value == goal => return Some((noun, verb)),
                Ok(_) => (),
                Err(e) => debug!("noun({}), verb({}) failed to run: {}", noun, verb, e),
            }
        }
    }

    None
}
