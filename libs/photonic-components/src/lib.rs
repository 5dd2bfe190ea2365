//! # Photonic Components
//!
//! Component recipes built on `photonic-geometry`. Every recipe borrows the
//! shared [`WaveguideTemplate`](photonic_geometry::WaveguideTemplate),
//! implements [`ComponentRecipe`](photonic_geometry::ComponentRecipe) and
//! builds a placed [`Component`](photonic_geometry::Component) with
//! `input` and `output` ports.
//!
//! ## Example
//!
//! ```rust
//! use photonic_components::{Taper, Waveguide};
//! use photonic_geometry::{ComponentRecipe, Mask, Point, WaveguideTemplate};
//!
//! let wgt = WaveguideTemplate::builder().bend_radius(20.0).build()?;
//! let mut mask = Mask::new("demo");
//!
//! let wg = mask.add(&Waveguide::new(
//!     vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 80.0)],
//!     &wgt,
//! )?)?;
//! let end = mask.port(wg, "output")?;
//! mask.add(&Taper::new(&wgt, 30.0, 0.5).at(end))?;
//! assert_eq!(mask.len(), 2);
//! # Ok::<(), photonic_geometry::Error>(())
//! ```

pub mod bends;
pub mod taper;
pub mod waveguide;

pub use bends::{BBend, EBend, EulerSBend, SBend};
pub use taper::Taper;
pub use waveguide::{trace_length, validate_trace, Waveguide};
