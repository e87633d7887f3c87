mod event;
mod handler;
mod session;

pub use session::TuiSession;
