//! Load-state queries for torrent-match
//!
//! The reconciliation engine only needs the set of descriptor paths a
//! torrent client tracks for a data directory. [`LoadStateSource`] is that
//! capability; [`RtControl`] provides it by shelling out to `rtcontrol`
//! through a [`ProcessRunner`].

pub mod error;
pub mod process;
pub mod rtcontrol;
pub mod source;

pub use error::{Error, Result};
pub use process::{ProcessOutput, ProcessRunner, SystemRunner, locate_program};
pub use rtcontrol::{RtControl, parse_listing};
pub use source::{LoadStateSource, ProcessOutcome};
