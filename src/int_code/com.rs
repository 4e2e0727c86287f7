use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender};
use crossbeam_utils::sync::WaitGroup;
use log::{debug, trace, warn};

use crate::Error;

use super::{
    inst::{decode, ExecutionState},
    port::{InputPort, OutputPort},
};

/// How the executor reacts to malformed code: a cell that doesn't hold a known
/// operation code, or an instruction pointer that leaves the code without HALT.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Log a warning and continue from the next cell. Leaving the code ends
    /// the run as if it halted.
    #[default]
    Lenient,
    /// Stop the run with [`Error::InvalidOpcode`] or
    /// [`Error::ExecutionExceedIntCode`].
    Strict,
}

#[derive(Debug, Default, Clone)]
pub struct IntCodeComputer {
    policy: DecodePolicy,
}

impl IntCodeComputer {
    pub fn new(policy: DecodePolicy) -> Self {
        IntCodeComputer { policy }
    }

    /// Runs a copy of `image` until it halts, feeding `inputs` in order.
    pub fn execute(&self, image: &[i64], inputs: &[i64]) -> Result<ProcessResult, Error> {
        let mut input = inputs.iter().copied().collect::<VecDeque<_>>();
        let mut output = Vec::new();
        self.execute_with_io(image, &mut input, &mut output)
    }

    pub fn execute_with_io<I, O>(
        &self,
        image: &[i64],
        input: &mut I,
        output: &mut O,
    ) -> Result<ProcessResult, Error>
    where
        I: InputPort + ?Sized,
        O: OutputPort + ?Sized,
    {
        let mut proc = Process::new(image);
        self.exe_proc(&mut proc, input, output)?;
        debug!(
            "Process halt after {} steps with {} outputs.",
            proc.step_count,
            proc.outputs.len()
        );

        Ok(proc.into_snap())
    }

    /// Runs a copy of `image` reading from `input` and writing to `output`, both
    /// blocking. When the run ends the output channel end and `done` are dropped,
    /// so peers and whoever waits on the group observe completion.
    pub fn execute_streaming(
        &self,
        image: &[i64],
        mut input: Receiver<i64>,
        mut output: Sender<i64>,
        done: Option<WaitGroup>,
    ) -> Result<ProcessResult, Error> {
        let res = self.execute_with_io(image, &mut input, &mut output);
        drop(output);
        drop(done);

        res
    }

    fn exe_proc<I, O>(&self, proc: &mut Process, input: &mut I, output: &mut O) -> Result<(), Error>
    where
        I: InputPort + ?Sized,
        O: OutputPort + ?Sized,
    {
        let mut run_proc = RunningProcess {
            proc,
            input,
            output,
        };
        while !run_proc.proc.is_halt() {
            let inst_p = run_proc.inst_p();
            let code_len = run_proc.proc.mem.len();
            if inst_p >= code_len && self.policy == DecodePolicy::Lenient {
                debug!(
                    "Instruction pointer({}) left code of length {} without halt, stop.",
                    inst_p, code_len
                );
                break;
            }
            let raw_inst = decode(run_proc.read_code(inst_p)?);
            match raw_inst.instruction() {
                Some(inst) => {
                    trace!(
                        "step # {}: {:?} @ {}.",
                        run_proc.proc.step_count,
                        inst,
                        inst_p
                    );
                    inst.execute(&mut run_proc)?;
                    run_proc.proc.step_count += 1;
                }
                None => match self.policy {
                    DecodePolicy::Lenient => {
                        warn!(
                            "Invalid operation code({}) at {}, skip to next cell.",
                            raw_inst.code(),
                            inst_p
                        );
                        *run_proc.inst_p_mut() += 1;
                    }
                    DecodePolicy::Strict => {
                        return Err(Error::InvalidOpcode {
                            inst_p,
                            code: raw_inst.code(),
                        })
                    }
                },
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    step_count: usize,
    image: Vec<i64>,
    outputs: Vec<i64>,
}

impl ProcessResult {
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn image(&self) -> &[i64] {
        &self.image
    }

    pub fn outputs(&self) -> &[i64] {
        &self.outputs
    }

    pub fn into_outputs(self) -> Vec<i64> {
        self.outputs
    }
}

struct Process {
    halted: bool,
    inst_p: usize,
    mem: Vec<i64>,
    step_count: usize,
    outputs: Vec<i64>,
}

impl Process {
    fn new(image: &[i64]) -> Self {
        Process {
            halted: false,
            inst_p: 0,
            mem: Vec::from(image),
            step_count: 0,
            outputs: Vec::new(),
        }
    }

    fn is_halt(&self) -> bool {
        self.halted
    }

    fn mem_ind(&self, addr: i64) -> Result<usize, Error> {
        usize::try_from(addr)
            .ok()
            .filter(|&ind| ind < self.mem.len())
            .ok_or(Error::ImageIndexError(addr))
    }

    fn into_snap(self) -> ProcessResult {
        ProcessResult {
            step_count: self.step_count,
            image: self.mem,
            outputs: self.outputs,
        }
    }
}

struct RunningProcess<'a, I: ?Sized, O: ?Sized> {
    proc: &'a mut Process,
    input: &'a mut I,
    output: &'a mut O,
}

impl<'a, I, O> ExecutionState for RunningProcess<'a, I, O>
where
    I: InputPort + ?Sized,
    O: OutputPort + ?Sized,
{
    fn read_code(&self, ind: usize) -> Result<i64, Error> {
        self.proc
            .mem
            .get(ind)
            .copied()
            .ok_or(Error::ExecutionExceedIntCode(ind, self.proc.mem.len()))
    }

    fn read_mem(&self, addr: i64) -> Result<i64, Error> {
        let ind = self.proc.mem_ind(addr)?;
        Ok(self.proc.mem[ind])
    }

    fn write_mem(&mut self, addr: i64, value: i64) -> Result<(), Error> {
        let ind = self.proc.mem_ind(addr)?;
        self.proc.mem[ind] = value;

        Ok(())
    }

    fn input(&mut self) -> Result<i64, Error> {
        self.input.get()
    }

    fn output(&mut self, value: i64) -> Result<(), Error> {
        self.output.put(value)?;
        self.proc.outputs.push(value);

        Ok(())
    }

    fn inst_p(&self) -> usize {
        self.proc.inst_p
    }

    fn inst_p_mut(&mut self) -> &mut usize {
        &mut self.proc.inst_p
    }

    fn halt(&mut self) {
        self.proc.halted = true;
    }
}
