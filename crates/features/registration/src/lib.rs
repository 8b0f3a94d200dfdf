//! Registration feature slice.
//!
//! Everything a registrant does, layered over the [`Registry`](boxdraft_registry::Registry):
//! validating the form ([`Submission::validate`]), deriving a display name ([`derive_name`]),
//! walking through [`RegistrationFlow`] and rendering the box screen ([`BoxView`]).

mod error;
mod flow;
mod policy;
mod view;

pub use error::{RegistrationError, RegistrationErrorExt};
pub use flow::{RegistrationFlow, Step};
pub use policy::{Submission, derive_name};
pub use view::{BoxView, Teammate};
