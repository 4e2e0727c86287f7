use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::Error;

pub mod com;
pub mod inst;
pub mod port;

pub fn read_int_code<P>(path: P) -> Result<Vec<i64>, Error>
where
    P: AsRef<Path>,
{
    let code_file = File::open(path).map_err(Error::IOError)?;
    let reader = BufReader::new(code_file);

    reader.lines().next().map_or(Err(Error::EmptyError), |res| {
        res.map_err(Error::IOError)
            .and_then(|s| parse_int_code(s.as_str()))
    })
}

pub fn parse_int_code(text: &str) -> Result<Vec<i64>, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::EmptyError);
    }

    text.split(',')
        .map(|s| str::parse::<i64>(s.trim()).map_err(|_| Error::ParseIntError(s.to_string())))
        .collect()
}
