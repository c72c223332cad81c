/// Chart layer: from loaded data to pixels.
///
/// ```text
///   TimeSeriesTable + AxisChoice
///        │
///        ▼
///   ┌──────────┐
///   │  layout   │  four panels, strokes, shared x extent → ChartLayout
///   └──────────┘
///        │  + EventMask
///        ▼
///   ┌──────────┐
///   │  overlay  │  vertical markers on the close and rho panels
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  render   │  plotters bitmap backend → Figure (RGB buffer)
///   └──────────┘
/// ```

pub mod figure;
pub mod font;
pub mod layout;
pub mod overlay;
pub mod render;
