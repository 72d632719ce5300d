/// Simulated live feed: a timer that ticks every few seconds and a small FIFO
/// of synthetic records that the trend charts and value boxes read.

pub mod buffer;
pub mod ticker;
