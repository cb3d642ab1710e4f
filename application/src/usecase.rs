pub mod chat;
pub mod process_audio;

pub use chat::{ChatUseCase, ChatUseCaseImpl};
pub use process_audio::{ProcessAudioUseCase, ProcessAudioUseCaseImpl};
