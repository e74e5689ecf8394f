//! Member management.
//!
//! Registration, duplicate-id checks, login and profile updates for
//! site members.

mod model;
mod repository;
mod service;

pub use model::{Member, MemberForm, MemberUpdate, NewMember, PHONE_SEPARATOR};
pub use repository::MemberRepository;
pub use service::{LoginOutcome, MemberService};
