//! Rule validators for legal-formality compliance
//!
//! Each validator is a pure function of the extracted text (plus an injected
//! validation date where expiry matters). They share no state and may run in
//! any order; only the aggregator combines their outputs.

pub mod notary;
pub mod supplementary;
pub mod verbiage;
pub mod witness;

pub use notary::check_notary;
pub use supplementary::check_supplementary;
pub use verbiage::check_verbiage;
pub use witness::check_witnesses;
