use int_enum::IntEnum;

use crate::Error;

/// What an instruction needs from the machine it runs on.
///
/// Batch and streaming execution differ only in how `input` and `output` are
/// served, so the instruction semantics below are written once against this trait.
pub trait ExecutionState {
    /// Raw cell under the instruction pointer or one of its parameters.
    fn read_code(&self, ind: usize) -> Result<i64, Error>;
    fn read_mem(&self, addr: i64) -> Result<i64, Error>;
    fn write_mem(&mut self, addr: i64, value: i64) -> Result<(), Error>;
    fn input(&mut self) -> Result<i64, Error>;
    fn output(&mut self, value: i64) -> Result<(), Error>;
    fn inst_p(&self) -> usize;
    fn inst_p_mut(&mut self) -> &mut usize;
    fn halt(&mut self);
}

#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, IntEnum, PartialEq, Eq)]
pub enum ParameterMode {
    #[default]
    Position = 0,
    Immediate = 1,
}

impl ParameterMode {
    // Digits are not validated, everything but 0 reads as a literal.
    fn from_digit(digit: i64) -> Self {
        u8::try_from(digit)
            .ok()
            .and_then(|d| ParameterMode::try_from(d).ok())
            .unwrap_or(ParameterMode::Immediate)
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntEnum)]
pub enum Opcode {
    Add = 1,
    Multiply = 2,
    Input = 3,
    Output = 4,
    JumpIfTrue = 5,
    JumpIfFalse = 6,
    LessThan = 7,
    Equals = 8,
    Halt = 99,
}

impl Opcode {
    #[inline]
    pub fn length(&self) -> usize {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => 4,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 3,
            Opcode::Input | Opcode::Output => 2,
            Opcode::Halt => 1,
        }
    }
}

/// An instruction cell split into its opcode number and parameter modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInst {
    code: i64,
    opcode_ind: i64,
    modes: [ParameterMode; 3],
}

impl RawInst {
    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn modes(&self) -> &[ParameterMode; 3] {
        &self.modes
    }

    pub fn opcode(&self) -> Option<Opcode> {
        u8::try_from(self.opcode_ind)
            .ok()
            .and_then(|n| Opcode::try_from(n).ok())
    }

    pub fn instruction(&self) -> Option<Instruction> {
        self.opcode().map(|opcode| Instruction {
            opcode,
            modes: self.modes,
        })
    }
}

pub fn decode(code: i64) -> RawInst {
    let mut modes = [ParameterMode::default(); 3];
    let mut cur_ratio = 100;
    for mode in modes.iter_mut() {
        *mode = ParameterMode::from_digit(code / cur_ratio % 10);
        cur_ratio *= 10;
    }

    RawInst {
        code,
        opcode_ind: code % 100,
        modes,
    }
}

pub fn resolve<S>(param: i64, mode: ParameterMode, exe_state: &S) -> Result<i64, Error>
where
    S: ExecutionState + ?Sized,
{
    match mode {
        ParameterMode::Position => exe_state.read_mem(param),
        ParameterMode::Immediate => Ok(param),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    opcode: Opcode,
    modes: [ParameterMode; 3],
}

impl Instruction {
    pub fn length(&self) -> usize {
        self.opcode.length()
    }

    pub fn execute<S>(&self, exe_state: &mut S) -> Result<(), Error>
    where
        S: ExecutionState + ?Sized,
    {
        let inst_p = exe_state.inst_p();
        match self.opcode {
            Opcode::Add => {
                let value = self
                    .input(0, exe_state)?
                    .checked_add(self.input(1, exe_state)?)
                    .ok_or(Error::ArithmeticOverflow(inst_p))?;
                self.write_target(2, exe_state, value)?;
            }
            Opcode::Multiply => {
                let value = self
                    .input(0, exe_state)?
                    .checked_mul(self.input(1, exe_state)?)
                    .ok_or(Error::ArithmeticOverflow(inst_p))?;
                self.write_target(2, exe_state, value)?;
            }
            Opcode::Input => {
                let value = exe_state.input()?;
                self.write_target(0, exe_state, value)?;
            }
            Opcode::Output => {
                let value = self.input(0, exe_state)?;
                exe_state.output(value)?;
            }
            Opcode::JumpIfTrue => {
                if self.input(0, exe_state)? != 0 {
                    return self.jump(1, exe_state);
                }
            }
            Opcode::JumpIfFalse => {
                if self.input(0, exe_state)? == 0 {
                    return self.jump(1, exe_state);
                }
            }
            Opcode::LessThan => {
                let value = i64::from(self.input(0, exe_state)? < self.input(1, exe_state)?);
                self.write_target(2, exe_state, value)?;
            }
            Opcode::Equals => {
                let value = i64::from(self.input(0, exe_state)? == self.input(1, exe_state)?);
                self.write_target(2, exe_state, value)?;
            }
            Opcode::Halt => {
                exe_state.halt();
                return Ok(());
            }
        }
        *exe_state.inst_p_mut() += self.length();

        Ok(())
    }

    fn param<S>(&self, ind: usize, exe_state: &S) -> Result<i64, Error>
    where
        S: ExecutionState + ?Sized,
    {
        // Skip operation code
        exe_state.read_code(exe_state.inst_p() + ind + 1)
    }

    fn input<S>(&self, ind: usize, exe_state: &S) -> Result<i64, Error>
    where
        S: ExecutionState + ?Sized,
    {
        resolve(self.param(ind, exe_state)?, self.modes[ind], exe_state)
    }

    // Targets are addresses whatever mode the instruction declares.
    fn write_target<S>(&self, ind: usize, exe_state: &mut S, value: i64) -> Result<(), Error>
    where
        S: ExecutionState + ?Sized,
    {
        let addr = self.param(ind, exe_state)?;
        exe_state.write_mem(addr, value)
    }

    fn jump<S>(&self, ind: usize, exe_state: &mut S) -> Result<(), Error>
    where
        S: ExecutionState + ?Sized,
    {
        let target = self.input(ind, exe_state)?;
        *exe_state.inst_p_mut() =
            usize::try_from(target).map_err(|_| Error::InvalidJumpTarget(target))?;

        Ok(())
    }
}
