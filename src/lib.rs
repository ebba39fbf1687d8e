//! SmartSensor monitoring library.
//!
//! Edge-triggered alerting for a gas / temperature / tilt sensor rig.
//! The pure core ([`sensors`], [`alert`], [`app`]) performs no I/O; the
//! chat notifier, ledger recorder, config store and clock are reached
//! through port traits implemented in [`adapters`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod alert;
pub mod app;
pub mod config;
pub mod error;
pub mod rpc;
pub mod sensors;
