/// Data layer: typed records, CSV loading, and filtering.
///
/// Architecture:
/// ```text
///   healthexp.csv (headerless, 6 columns)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Dataset (or an empty one)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   Dataset     │  Vec<ExpenditureRecord>, shared via Arc
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState predicates → filtered indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
