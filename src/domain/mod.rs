//! Core domain types for IRIS

mod contact;
mod location;
mod safety;
mod sos;

pub use contact::{Contact, UserProfile};
pub use location::Location;
pub use safety::{CrowdPoint, RiskAnalysis, SafetyAssessment, SafetyStatus};
pub use sos::{NotificationLink, PoliceStation, SosCategory, SosDispatchResult, SosLog};
