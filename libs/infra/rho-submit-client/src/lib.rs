// [libs/infra/rho-submit-client/src/lib.rs]
//! APARATO: SUBMISSION CLIENT BARREL

pub mod client;
pub mod errors;
pub mod submitter;

pub use client::SubmissionClient;
pub use errors::ClientError;
pub use submitter::{channel, run, DpSender, StopFlag};
