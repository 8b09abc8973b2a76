//! Shared test utilities for the torrent-match workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`bencode`] - minimal bencode writer for descriptor fixtures
//! - [`fixture`] - [`MatchFixture`] builder for data and torrent directories
//! - [`runner`] - [`ScriptedRunner`] standing in for the control tool

pub mod bencode;
pub mod fixture;
pub mod runner;

pub use bencode::{Bencode, torrent_bytes};
pub use fixture::MatchFixture;
pub use runner::ScriptedRunner;
