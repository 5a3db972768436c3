//! Quote consumers.
//!
//! Both presentations of the quote (the wide-screen sidebar and the
//! narrow-screen drawer) bind to one [`QuoteViewModel`] over the shared
//! store. The view model turns store state into plain render data and turns
//! user intents back into store commands.

pub mod drawer;
pub mod view;
pub mod view_model;
pub mod viewport;

pub use drawer::DrawerState;
pub use view::{ProductCard, QuoteRow, QuoteView, Surface, count_label};
pub use view_model::QuoteViewModel;
pub use viewport::{NARROW_BREAKPOINT_PX, Viewport};
