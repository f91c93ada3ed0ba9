pub mod authorize;

pub use authorize::AuthorizeUseCase;
