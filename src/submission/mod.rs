//! Submission, confirmation and post-confirmation reconciliation.
//!
//! # Data Flow
//! ```text
//! SubmitRequest
//!     → retrier.rs (validate, submit + confirm up to the ceiling)
//!     → signature.rs (raw signature → display hash)
//!     → fees.rs (settlement record → FeeReport)
//!     → leaf.rs (poll until the mint's leaf decodes)
//! ```

pub mod fees;
pub mod leaf;
pub mod retrier;
pub mod signature;

pub use fees::FeeExtractor;
pub use leaf::LeafResolver;
pub use retrier::{SubmissionRetrier, SubmitRequest, ValidatedSubmission};
pub use signature::display_hash;
