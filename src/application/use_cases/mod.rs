pub mod analyze_schedule;
pub mod generate_schedule;

pub use analyze_schedule::AnalyzeSchedule;
pub use generate_schedule::{GenerateSchedule, GenerationResult};
