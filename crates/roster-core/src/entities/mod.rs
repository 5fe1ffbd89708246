//! Entity structs for all Roster domain objects.
//!
//! Each entity maps to a table in the libSQL database. Identifiers are SQLite
//! integer row ids. All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema`.

mod activity;
mod attendance;
mod cancellation;
mod contact;
mod enrollment;
mod location;
mod meeting;
mod organization;
mod session;
mod student;

pub use activity::Activity;
pub use attendance::AttendanceRecord;
pub use cancellation::Cancellation;
pub use contact::Contact;
pub use enrollment::Enrollment;
pub use location::Location;
pub use meeting::Meeting;
pub use organization::Organization;
pub use session::Session;
pub use student::Student;
