use std::{error, fmt::Display, path::PathBuf};

use clap::Parser;

pub mod amp;
pub mod diagnostic;
pub mod gravity;
pub mod int_code;

use int_code::com::DecodePolicy;

#[derive(Debug)]
pub enum Error {
    IOError(std::io::Error),
    EmptyError,
    ParseIntError(String),
    ImageIndexError(i64),
    InvalidOpcode { inst_p: usize, code: i64 },
    ExecutionExceedIntCode(usize, usize),
    NotEnoughInput,
    InvalidJumpTarget(i64),
    ArithmeticOverflow(usize),
    ChannelClosed,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IOError(ioe) => write!(f, "I/O Error: {}", ioe),
            Error::EmptyError => write!(f, "Get empty code in file"),
            Error::ParseIntError(s) => write!(f, "Failed to parse integer from string({})", s),
            Error::ImageIndexError(i) => write!(f, "Invalid index({}) found in execution", i),
            Error::InvalidOpcode { inst_p, code } => write!(
                f,
                "Invalid operation code({}) found at instruction pointer({})",
                code, inst_p
            ),
            Error::ExecutionExceedIntCode(cur_inst_p, code_len) => write!(
                f,
                "Current instruction pointer({}) exceeds total code length({})",
                cur_inst_p, code_len
            ),
            Error::NotEnoughInput => write!(f, "Not enough input in execution, inputs exhausted"),
            Error::InvalidJumpTarget(t) => write!(f, "Invalid jump target({})", t),
            Error::ArithmeticOverflow(inst_p) => write!(
                f,
                "Arithmetic overflow in instruction at instruction pointer({})",
                inst_p
            ),
            Error::ChannelClosed => write!(f, "Peer of I/O channel has gone away"),
        }
    }
}

impl error::Error for Error {}

impl PartialEq for Error {
    // io::Error has no equality, compare everything else by value.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::IOError(_), _) | (_, Error::IOError(_)) => false,
            (Error::EmptyError, Error::EmptyError) => true,
            (Error::ParseIntError(l), Error::ParseIntError(r)) => l == r,
            (Error::ImageIndexError(l), Error::ImageIndexError(r)) => l == r,
            (
                Error::InvalidOpcode {
                    inst_p: lp,
                    code: lc,
                },
                Error::InvalidOpcode {
                    inst_p: rp,
                    code: rc,
                },
            ) => lp == rp && lc == rc,
            (Error::ExecutionExceedIntCode(lp, ll), Error::ExecutionExceedIntCode(rp, rl)) => {
                lp == rp && ll == rl
            }
            (Error::NotEnoughInput, Error::NotEnoughInput) => true,
            (Error::InvalidJumpTarget(l), Error::InvalidJumpTarget(r)) => l == r,
            (Error::ArithmeticOverflow(l), Error::ArithmeticOverflow(r)) => l == r,
            (Error::ChannelClosed, Error::ChannelClosed) => true,
            _ => false,
        }
    }
}

// Arguments shared by every day driver, flattened into their own parsers.
#[derive(Debug, Parser)]
pub struct CLIArgs {
    /// File holding the comma separated int code on its first line
    pub input_path: PathBuf,
    /// Treat unknown operation codes as fatal instead of skipping them
    #[arg(long)]
    pub strict: bool,
}

impl CLIArgs {
    pub fn decode_policy(&self) -> DecodePolicy {
        if self.strict {
            DecodePolicy::Strict
        } else {
            DecodePolicy::Lenient
        }
    }
}
