//! Agency domain: spy cats, missions, targets and the rules between them.

pub mod breed;
pub mod error;
pub mod id;
pub mod mission;
pub mod spy_cat;
pub mod target;

pub use breed::Breed;
pub use error::DomainError;
pub use id::{MissionId, SpyCatId, TargetId};
pub use mission::{Mission, MissionDetails, NewMission, MAX_TARGETS};
pub use spy_cat::{NewSpyCat, SpyCat};
pub use target::{NewTarget, Target, TargetUpdate};
