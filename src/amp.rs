use std::{error, fmt::Display, iter, thread};

use crossbeam_channel::{select, Receiver, Sender};
use crossbeam_utils::sync::WaitGroup;
use log::debug;

use crate::int_code::com::IntCodeComputer;

/// Lazily produced orderings of a phase setting.
///
/// The orderings come from a producer thread running Heap's algorithm and are
/// handed over one at a time, dropping the iterator stops the producer.
pub struct Permutations {
    recv: Receiver<Vec<i64>>,
}

impl Iterator for Permutations {
    type Item = Vec<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv.recv().ok()
    }
}

pub fn permutations(init_numbers: &[i64]) -> Permutations {
    let (sender, recv) = crossbeam_channel::bounded(0);
    let mut numbers = Vec::from(init_numbers);
    thread::spawn(move || {
        let number_count = numbers.len();
        gen_permutation_recur(&sender, &mut numbers, number_count);
    });

    Permutations { recv }
}

// Heap's algorithm to generate permutation of slice, false once nobody listens.
fn gen_permutation_recur(sender: &Sender<Vec<i64>>, numbers: &mut [i64], cur_size: usize) -> bool {
    if cur_size <= 1 {
        return sender.send(Vec::from(&*numbers)).is_ok();
    }

    for i in 0..cur_size {
        if !gen_permutation_recur(sender, numbers, cur_size - 1) {
            return false;
        }

        if cur_size % 2 == 1 {
            numbers.swap(0, cur_size - 1);
        } else {
            numbers.swap(i, cur_size - 1);
        }
    }

    true
}

#[derive(Debug)]
pub enum Error {
    NoAmplifier,
    EmptyAmplifierResult(usize, Vec<i64>),
    ExecutionError(crate::Error, Vec<i64>),
    AmplifierPanicked(usize, Vec<i64>),
    EmptyOutputFromAmplifierLoop(Vec<i64>),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoAmplifier => write!(f, "No phase setting given, no amplifier to run"),
            Error::EmptyAmplifierResult(ind, s) => write!(
                f,
                "Amplifier #{} has empty result with settings({:?})",
                ind, s
            ),
            Error::ExecutionError(e, s) => write!(
                f,
                "Error({}) in execution of amplifiers with settings({:?})",
                e, s
            ),
            Error::AmplifierPanicked(ind, s) => write!(
                f,
                "Amplifier #{} panicked in amplifier loop with settings({:?})",
                ind, s
            ),
            Error::EmptyOutputFromAmplifierLoop(s) => write!(
                f,
                "Got empty output from amplifier loop with settings({:?})",
                s
            ),
        }
    }
}

impl error::Error for Error {}

/// Runs one amplifier after another, each fed its phase then the previous signal.
pub fn amp_chain(
    computer: &IntCodeComputer,
    int_code: &[i64],
    settings: &[i64],
) -> Result<i64, Error> {
    if settings.is_empty() {
        return Err(Error::NoAmplifier);
    }

    let mut amp_res = 0;
    for (i, &setting) in settings.iter().enumerate() {
        let res = computer
            .execute(int_code, &[setting, amp_res])
            .map_err(|e| Error::ExecutionError(e, Vec::from(settings)))?;

        amp_res = res
            .outputs()
            .first()
            .copied()
            .ok_or(Error::EmptyAmplifierResult(i, Vec::from(settings)))?;
    }

    Ok(amp_res)
}

/// Runs the amplifiers as a ring, one thread each, and returns the signal the
/// last amplifier sends back to the first after every other amplifier halted.
pub fn amp_loop(
    computer: &IntCodeComputer,
    int_code: &[i64],
    settings: &[i64],
) -> Result<i64, Error> {
    let amp_count = settings.len();
    if amp_count == 0 {
        return Err(Error::NoAmplifier);
    }

    let (senders, mut receivers): (Vec<_>, Vec<_>) = (0..amp_count)
        .map(|_| crossbeam_channel::bounded::<i64>(0))
        .unzip();
    // Disconnects once the first amplifier has exited.
    let (first_exit_sender, first_exit) = crossbeam_channel::bounded::<()>(0);
    let mut first_exit_sender = Some(first_exit_sender);
    let wait_group = WaitGroup::new();
    let amp_procs = (0..amp_count)
        .map(|i| {
            let computer = computer.clone();
            let image = Vec::from(int_code);
            let input = receivers[i].clone();
            let output = senders[(i + 1) % amp_count].clone();
            // The last amplifier is observed through its final output instead.
            let done = (i + 1 < amp_count).then(|| wait_group.clone());
            let exit_guard = first_exit_sender.take();
            thread::spawn(move || {
                let res = computer.execute_streaming(&image, input, output, done);
                drop(exit_guard);
                res
            })
        })
        .collect::<Vec<_>>();
    receivers.truncate(1);
    let loop_output = receivers.remove(0);

    // Phase settings have to arrive before the first signal.
    let fed = settings
        .iter()
        .zip(senders.iter())
        .chain(iter::once((&0, &senders[0])))
        .all(|(&value, sender)| feed(sender, value, &first_exit));
    drop(senders);

    let signal = if fed {
        wait_group.wait();
        loop_output.recv().ok()
    } else {
        debug!(
            "Failed to feed amplifiers with settings({:?}), one of them has exited.",
            settings
        );
        drop(wait_group);
        None
    };
    drop(loop_output);

    for (i, handle) in amp_procs.into_iter().enumerate() {
        match handle.join() {
            Ok(Ok(res)) => debug!(
                "Amplifier #{} halt after {} steps with settings({:?}).",
                i,
                res.step_count(),
                settings
            ),
            Ok(Err(e)) => return Err(Error::ExecutionError(e, Vec::from(settings))),
            Err(_) => return Err(Error::AmplifierPanicked(i, Vec::from(settings))),
        }
    }

    signal.ok_or(Error::EmptyOutputFromAmplifierLoop(Vec::from(settings)))
}

// The orchestrator keeps a receiver of the first channel, so a send there only
// notices a dead first amplifier through its exit channel.
fn feed(sender: &Sender<i64>, value: i64, first_exit: &Receiver<()>) -> bool {
    select! {
        send(sender, value) -> res => res.is_ok(),
        recv(first_exit) -> _ => false,
    }
}

pub fn max_chain_signal(
    computer: &IntCodeComputer,
    int_code: &[i64],
    phases: &[i64],
) -> Result<i64, Error> {
    max_signal(phases, |settings| amp_chain(computer, int_code, settings))
}

pub fn max_loop_signal(
    computer: &IntCodeComputer,
    int_code: &[i64],
    phases: &[i64],
) -> Result<i64, Error> {
    max_signal(phases, |settings| amp_loop(computer, int_code, settings))
}

fn max_signal<F>(phases: &[i64], mut run: F) -> Result<i64, Error>
where
    F: FnMut(&[i64]) -> Result<i64, Error>,
{
    if phases.is_empty() {
        return Err(Error::NoAmplifier);
    }

    let mut max_signal = i64::MIN;
    for settings in permutations(phases) {
        let signal = run(&settings)?;
        debug!("Settings({:?}) get signal {}.", settings, signal);
        max_signal = max_signal.max(signal);
    }

    Ok(max_signal)
}
