//! Monitoring core: session, commands, events and ports.
//!
//! This module contains the business rules of the SmartSensor monitor:
//! intake, alarm evaluation and edge-triggered dispatch. All interaction
//! with the notification channel, the ledger node and the clock happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without a network.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
