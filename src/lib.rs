//! WatchSense Dashboard - Client-side controller for the review-analysis dashboard
//!
//! This crate submits review queries to the analysis backend, normalizes
//! its loosely typed responses and decides how the report is presented
//! for the detected query intent. It also drives the memory analytics and
//! system info panels.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
