/// Data layer: core types, loading, column extraction and filtering.
///
/// Architecture:
/// ```text
///  .dat / .txt / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ObservationTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  columns  │  time / magnitude / error series, time offset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  seeing / error cuts → visible indices
///   └──────────┘
/// ```

pub mod columns;
pub mod filter;
pub mod loader;
pub mod model;
