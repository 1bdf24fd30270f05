pub mod error;
pub mod select;
pub mod session;
pub mod summary;

pub use error::{Error, Result};
pub use select::{available_difficulties, select};
pub use session::{Phase, Progress, QuizSession, Settlement, Snapshot};
pub use summary::{percentage, summarize};

pub use model;
