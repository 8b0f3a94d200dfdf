//! Admin feature slice.
//!
//! An [`AdminGate`] checks the shared password and hands out an [`AdminSession`]. Every admin
//! action is a method on the session:
//!
//! * editing questions ([`QuestionDraft`]), boxes ([`BoxDraft`]) and event settings
//!   ([`SettingsDraft`]), with banner images embedded by [`BannerEncoder`];
//! * moving players between boxes regardless of capacity ([`DropTarget`]);
//! * deleting players, or all of them through a confirmed reset;
//! * the [`Dashboard`] read model.

mod banner;
mod dashboard;
mod error;
mod forms;
mod gate;
mod session;

pub use banner::{BannerEncoder, mime_for};
pub use dashboard::{BoxColumn, Dashboard, Placement, PlayerCard, RosterRow};
pub use error::{AdminError, AdminErrorExt};
pub use forms::{BoxDraft, DropTarget, QuestionDraft, SettingsDraft};
pub use gate::AdminGate;
pub use session::AdminSession;
