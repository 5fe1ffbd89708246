//! # roster-core
//!
//! Core types, schedule rules, and error types for Roster.
//!
//! This crate provides the foundational types shared across all Roster crates:
//! - Entity structs for organizations, sessions, activities, meetings, students,
//!   enrollments, attendance records and cancellations
//! - Status enums (enrollment, attendance) and schedule enums (activity type, day)
//! - Pure schedule math: weekly occurrence dates minus cancellations
//! - Content-derived enrollment-combination identifiers
//! - Sign-in sheet payload construction and the spreadsheet export seam
//! - Typed response projections returned by service operations
//! - Cross-cutting error types

pub mod combination;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod export;
pub mod identity;
pub mod responses;
pub mod schedule;
pub mod signin;
