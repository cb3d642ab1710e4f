pub mod dto;
pub mod error;
pub mod poller;
pub mod prompt;
pub mod session;
pub mod usecase;

pub use dto::*;
pub use error::ApplicationError;
pub use poller::{JobPoller, TokioDelay};
pub use session::SessionStore;
pub use usecase::{
    ChatUseCase, ChatUseCaseImpl, ProcessAudioUseCase, ProcessAudioUseCaseImpl,
};
