use std::time::{Duration, Instant};

pub mod binary_heap;
pub mod data_structures;
pub mod io;
pub mod node_picker;

/// runs the function and returns the elapsed time together with its result
pub fn measure_time<R, F: FnOnce() -> R>(function: F) -> (Duration, R) {
    let start = Instant::now();
    let result = function();
    
    (start.elapsed(), result)
}
