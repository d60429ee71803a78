//! HTTP handlers for the content domain

pub mod archer_ranks;
pub mod contact;
pub mod records;
pub mod team_members;
