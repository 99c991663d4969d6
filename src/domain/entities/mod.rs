pub mod submission;
pub mod conference;
pub mod schedule;
pub mod config;

pub use submission::{Submission, SubmissionType, SubmissionWorkflow};
pub use conference::{Conference, ConferenceType, ConferenceRecurrence};
pub use schedule::{Interval, Schedule};
pub use config::{Config, PenaltyCosts, PriorityWeights, SchedulingOptions};
