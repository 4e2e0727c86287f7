use crate::{int_code::com::IntCodeComputer, Error};

/// Outputs of a diagnostic run: test results followed by the diagnostic code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    outputs: Vec<i64>,
}

impl Diagnostic {
    pub fn outputs(&self) -> &[i64] {
        &self.outputs
    }

    pub fn code(&self) -> Option<i64> {
        self.outputs.last().copied()
    }

    /// Indices of the tests that didn't report 0.
    pub fn failed_tests(&self) -> Vec<usize> {
        let test_count = self.outputs.len().saturating_sub(1);
        self.outputs[..test_count]
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(|(i, _)| i)
            .collect()
    }
}

pub fn run_diagnostic(
    computer: &IntCodeComputer,
    int_code: &[i64],
    system_id: i64,
) -> Result<Diagnostic, Error> {
    let res = computer.execute(int_code, &[system_id])?;
    Ok(Diagnostic {
        outputs: res.into_outputs(),
    })
}
