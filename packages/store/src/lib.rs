//! Client-side state for the Fideliza+ app, free of any renderer.
//!
//! The UI owns one [`Session`] for the whole app and one [`Dashboard`] per
//! signed-in session. Every network round trip is split into a synchronous
//! `begin_*` step that guards and mutates state, the backend call, and a
//! synchronous `finish_*` step that applies the result. The split lets the UI
//! release its state borrow across the `await`; the `async` conveniences
//! (`establish`, `submit`, `sync`, `redeem`) chain the three for tests and
//! non-UI callers.

pub mod backend;
pub mod dashboard;
pub mod forms;
pub mod messages;
pub mod session;

#[cfg(any(test, feature = "test-util"))]
mod memory;
#[cfg(any(test, feature = "test-util"))]
pub use memory::{Call, MemoryBackend};

pub use backend::Backend;
pub use dashboard::{
    fetch_dashboard, Alert, Confirmation, Dashboard, RedeemOutcome, RedeemTicket, Section,
    SyncOutcome, SyncReport, SyncTicket,
};
pub use forms::{
    register_and_login, SignInForm, SignInRequest, SignUpForm, SignUpOutcome, SignUpResult,
};
pub use session::{Frame, IdentityTicket, Screen, Session};
