pub mod schedule_report;

pub use schedule_report::{ScheduleEntry, ScheduleReport, SummaryOutput};
