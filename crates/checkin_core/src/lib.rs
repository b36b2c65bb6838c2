//! Check-in flow: state store, render pipeline, presentation seam and the
//! controller that ties them to a host.

pub mod clock;
pub mod config;
pub mod controller;
pub mod page;
pub mod render;
pub mod store;
pub mod surface;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{load_settings, Settings};
pub use controller::{CheckInController, CheckInInput};
pub use page::PageSurface;
pub use render::{render_view, RenderPipeline, View};
pub use store::StateStore;
pub use surface::{Region, RegionBindings, RegionMap, RegionUpdate, Surface};
