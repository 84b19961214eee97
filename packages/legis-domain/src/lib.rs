pub mod augment;
pub mod classify;
pub mod jurisdiction;
pub mod postprocess;

mod words;
