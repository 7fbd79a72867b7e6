//! Shared test harness modules for the calmroute CLI.

use super::*;

mod helpers;
