/// Data layer: table loading and the values derived from it.
///
/// Architecture:
/// ```text
///   engine .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  header check, parse rows → TimeSeriesTable
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │   axis    │   │  events   │
///   └──────────┘   └──────────┘
///   AxisChoice      EventMask
///   (calendar or    (confirmed == 1)
///    bar index)
/// ```

pub mod axis;
pub mod events;
pub mod loader;
pub mod model;
