//! Pure onboarding-funnel logic: navigation state machine, form
//! validation and login, payment session, receipt fingerprinting, and the
//! outbound summary message. Platform-agnostic; the WASM shell in
//! `ui/funnel-wasm` owns timers, DOM, history, and network.

pub mod controller;
pub mod dashboard;
pub mod form;
pub mod message;
pub mod receipt;
pub mod session;
pub mod store;

pub use controller::{FlowController, PaymentOutcome, Transition};
pub use dashboard::{DashboardGate, PromptState};
pub use session::{CountdownEvent, PaymentSession};
pub use store::{MemoryStore, ProfileStore};
