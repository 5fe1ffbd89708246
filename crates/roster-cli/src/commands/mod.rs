pub mod activity;
pub mod cancellation;
pub mod comms;
pub mod contact;
pub mod dispatch;
pub mod enroll;
pub mod location;
pub mod meeting;
pub mod org;
pub mod report;
pub mod session;
pub mod shared;
pub mod signin;
pub mod stats;
pub mod student;
