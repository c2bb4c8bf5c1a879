pub mod analyzer;
pub mod clock;
pub mod dependencies;
pub mod scheduler;
pub mod types;
pub mod validation;


pub use analyzer::*;
pub use clock::*;
pub use dependencies::*;
pub use scheduler::*;
pub use types::*;
pub use validation::{MAX_TITLE_LENGTH, validate_task, validate_tasks};
