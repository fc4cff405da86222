/// Data layer: core types, locale normalisation, and CSV parsing.
///
/// Architecture:
/// ```text
///  RawUpload (utf-8 bytes / base64 data URL)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode + tokenize → Dataset
///   └──────────┘
///        │  per cell
///        ▼
///   ┌────────────┐
///   │ normalize   │  "1,25" → 1.25   "00:00:01,5" → Timestamp
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Row>, ColumnSet
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod normalize;
