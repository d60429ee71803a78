//! Domain layer for the content domain

pub mod entities;
