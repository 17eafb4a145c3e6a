// Audio capture, byte-spectrum analysis, and loudness classification for voxmeter.

pub mod analyser;
pub mod capture;
pub mod classify;
pub mod error;
pub mod sampler;
