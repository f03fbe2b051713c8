//! voice-notes - Record, play and organize voice notes
//!
//! This crate provides the core of a voice memo app: microphone permission,
//! a guarded recording session with a live elapsed timer, a flat directory
//! of named notes, single-handle playback, name search and sharing.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Recording state machine, note names, search, configuration
//! - **Application**: Components and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rodio, arboard, filesystem)
//! - **CLI**: Command-line interface, argument parsing, and stop handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
