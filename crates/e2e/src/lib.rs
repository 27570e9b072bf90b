//! SenseCheck E2E Test Framework
//!
//! Rust-controlled browser checks against the hosted StockSense
//! frontend:
//! - Probes the target URL for reachability before any browser work
//! - Controls Playwright through generated Node scripts
//! - Parses declarative YAML test specs (login flows)
//! - Records screenshots and step logs as artifacts
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  E2E Test Runner (Rust)                   │
//! ├───────────────────────────────────────────────────────────┤
//! │  TestRunner                                               │
//! │    ├── wait_for_target() -> ()                            │
//! │    ├── run_spec(spec: TestSpec) -> TestResult             │
//! │    └── write_results() -> test-results.json               │
//! ├───────────────────────────────────────────────────────────┤
//! │  TestSpec (YAML)                                          │
//! │    ├── name, description, tags                            │
//! │    └── steps: [Step]                                      │
//! │          ├── navigate { url }                             │
//! │          ├── fill { selector, value }                     │
//! │          ├── click { selector }                           │
//! │          ├── assert { selector, text?, attr?, validity? } │
//! │          └── assert_url { contains, negated? }            │
//! └───────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod playwright;
pub mod runner;
pub mod spec;
pub mod target;

pub use error::{E2eError, E2eResult};
pub use runner::TestRunner;
pub use spec::{TestSpec, TestStep};
