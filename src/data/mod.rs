/// Data layer: penguin records, loading, filtering and derived views.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (fail fast on schema errors)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ Arc<Dataset>  │  Vec<Penguin>, immutable after load
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (mass bound, species set) → FilteredDataset
///   └──────────┘
///        │
///        ├──► summary   count + mean bill length / depth
///        └──► grid      table projection + column filters
/// ```

pub mod error;
pub mod filter;
pub mod grid;
pub mod loader;
pub mod model;
pub mod summary;
