//! Data layer: core types, loading, filtering and chart aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → LaunchDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ LaunchDataset │  Vec<LaunchRecord>, site index, payload bounds
//!   └───────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  site selector + payload range → record indices
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate │  pie slices / scatter points
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
