// Audio loading - file decoding into mono PCM

pub mod decoder;
pub mod signal;

pub use decoder::decode_file;
pub use signal::AudioSignal;
