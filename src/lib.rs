pub mod align;
pub mod compare;
pub mod config;
pub mod console;
pub mod corpus;
pub mod error;
pub mod heval;
pub mod layout;
pub mod report;
pub mod textutil;

pub use compare::{run_compare, CompareRequest, CompareSummary};
pub use error::{CompareError, CompareResult};
