mod admission;
mod client;
mod read_pump;
mod write_pump;

pub(crate) use admission::*;
pub(crate) use client::*;
