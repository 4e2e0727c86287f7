use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender};

use crate::Error;

// Input port for process, data source
pub trait InputPort {
    fn get(&mut self) -> Result<i64, Error>;
}

// Output port for process, data sink
pub trait OutputPort {
    fn put(&mut self, value: i64) -> Result<(), Error>;
}

impl InputPort for VecDeque<i64> {
    fn get(&mut self) -> Result<i64, Error> {
        self.pop_front().ok_or(Error::NotEnoughInput)
    }
}

impl OutputPort for Vec<i64> {
    fn put(&mut self, value: i64) -> Result<(), Error> {
        self.push(value);
        Ok(())
    }
}

// Blocks until a value arrives, fails once every sender is gone.
impl InputPort for Receiver<i64> {
    fn get(&mut self) -> Result<i64, Error> {
        self.recv().map_err(|_| Error::ChannelClosed)
    }
}

// Blocks until the value is taken, fails once every receiver is gone.
impl OutputPort for Sender<i64> {
    fn put(&mut self, value: i64) -> Result<(), Error> {
        self.send(value).map_err(|_| Error::ChannelClosed)
    }
}
