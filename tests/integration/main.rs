//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the monitoring session
//! against recording mock ports. No network or node is required.

mod dispatch_isolation_tests;
mod mock_ports;
mod session_command_tests;
