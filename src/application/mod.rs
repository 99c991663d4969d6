pub mod services;
pub mod validation;
pub mod scoring;
pub mod schedulers;
pub mod use_cases;
