mod activity;
mod cancellation;
mod comms;
mod contact;
mod enroll;
mod location;
mod meeting;
mod org;
mod report;
mod session;
mod student;

pub use activity::ActivityCommands;
pub use cancellation::CancellationCommands;
pub use comms::CommsCommands;
pub use contact::ContactCommands;
pub use enroll::EnrollCommands;
pub use location::LocationCommands;
pub use meeting::{AttendanceCommands, MeetingCommands};
pub use org::OrgCommands;
pub use report::ReportCommands;
pub use session::SessionCommands;
pub use student::StudentCommands;
