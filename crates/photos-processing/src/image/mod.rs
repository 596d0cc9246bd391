//! Image handling for the derivative step
//!
//! - [`resize`]: breakpoints and aspect-preserving target geometry
//! - [`derivative`]: decode, downscale and re-encode
//! - [`processor`]: cheap header probing without a full decode

pub mod derivative;
pub mod processor;
pub mod resize;

pub use derivative::{Derivative, DerivativeGenerator};
pub use processor::ImageProcessor;
pub use resize::{target_dimensions, Breakpoint};
