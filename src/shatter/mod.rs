// shatter/ - Click-to-shatter image effect
//
// Pipeline: ring sampling -> Delaunay -> per-triangle fragments with a
// distance-ordered schedule. The stage owns the session and the gallery.

mod delaunay;
mod fragment;
mod sampler;
mod schedule;
mod session;
mod stage;
mod surface;

pub use delaunay::{Delaunay, Triangulate, validate_indices};
pub use fragment::{FragmentGeometry, Rect};
pub use sampler::sample_rings;
pub use schedule::FragmentSchedule;
pub use session::{Fragment, ShatterSession};
pub use stage::{ClickOutcome, PlacedImage, Stage, StageEvent};
pub use surface::cut_surface;
