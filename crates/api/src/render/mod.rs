//! Deterministic SVG templating for the embeddable cards.
//!
//! Renderers are pure: given the same inputs they emit identical markup.
//! Every card has a fixed size, and its placeholder shares that size so an
//! embedding README never reflows between states.

mod base;
mod charts;
mod classic;
mod maturity;
mod placeholder;
mod profile;

pub use classic::{activity_bins, render_classic_board, ClassicBoard};
pub use maturity::{render_maturity_card, MaturityCard};
pub use placeholder::{placeholder_svg, CardKind};
pub use profile::{render_profile_card, ProfileCard};
