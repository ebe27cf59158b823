//! Business logic services for storefront.
//!
//! # Services
//!
//! - `last_viewed` - Visitor-scoped memory of the last viewed branch
//! - `resolver` - Resolves which branch a page should render
//! - `signup` - Relays restaurant signups to the approval API

pub mod last_viewed;
pub mod resolver;
pub mod signup;

pub use last_viewed::LastViewedStore;
pub use resolver::{BranchResolver, IdSource, Resolution};
pub use signup::{SignupEnvelope, SignupError, SignupForwarder, SignupRequest};
