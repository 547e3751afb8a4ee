mod audio;
mod engines;
mod error_response;
mod health;
mod process;
mod speak;

pub use audio::audio_handler;
pub use engines::engines_handler;
pub use error_response::{ErrorResponse, error_response, turn_error_response};
pub use health::health_handler;
pub use process::process_handler;
pub use speak::speak_handler;
