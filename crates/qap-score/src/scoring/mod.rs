pub mod location;
pub mod proximity;
pub mod report;
pub mod rubric;
pub mod session;

pub use location::{LocationUpdate, ProjectLocation};
pub use rubric::{QapTemplate, Scorecard, ScoringCategory};
pub use session::{QapSession, SessionSnapshot};
