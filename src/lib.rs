//! Library to calculate star ratings and ppv2 for [osu!]standard maps.
//!
//! ## Description
//!
//! Difficulty is split into an aim and a speed skill. Each object adds a strain
//! to both skills depending on its distance to the previous object and the time
//! in between, while older strains decay over time. The peak strains of 400ms
//! sections are weighted and summed up into the final star ratings.
//!
//! Performance points are then derived from the star ratings, the mod-adjusted
//! map attributes, and the hit results of a play.
//!
//! ## Usage
//!
//! ```no_run
//! use rosu_ppv2::{Beatmap, OsuPP, OsuStars};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Parse the map
//! let map = Beatmap::from_path("./resources/jumps.osu")?;
//!
//! // Calculate difficulty attributes
//! let diff_attrs = OsuStars::new(&map)
//!     .mods(8 + 16) // HDHR
//!     .calculate();
//!
//! let stars = diff_attrs.stars;
//!
//! // Calculate performance attributes
//! let perf_attrs = OsuPP::new(&map)
//!     // To speed up the calculation significantly, we can re-use the previous
//!     // attributes.
//!     // **Note** that this should only be done if the map and mods stay the same.
//!     // Otherwise, the resulting attributes will be incorrect.
//!     .attributes(diff_attrs)
//!     .mods(24) // HDHR, same as before
//!     .combo(789)
//!     .misses(2)
//!     .accuracy(99.2)
//!     .calculate()?;
//!
//! let pp = perf_attrs.pp();
//!
//! // Without a map, stars and map attributes can be specified directly
//! let max_pp = OsuPP::from_stars(perf_attrs.difficulty.aim_strain, perf_attrs.difficulty.speed_strain)
//!     .mods(24)
//!     .ar(9.0)
//!     .od(8.5)
//!     .max_combo(perf_attrs.max_combo())
//!     .n_circles(perf_attrs.difficulty.n_circles)
//!     .n_sliders(perf_attrs.difficulty.n_sliders)
//!     .n_objects(perf_attrs.difficulty.n_objects())
//!     .calculate()?
//!     .pp();
//!
//! println!("Stars: {stars} | PP: {pp}/{max_pp}");
//! # Ok(()) }
//! ```
//!
//! ## Features
//!
//! | Flag | Description
//! | - | -
//! | `default` | Beatmap parsing will be non-async
//! | `async_tokio` | Beatmap parsing will be async through [tokio](https://github.com/tokio-rs/tokio)
//! | `async_std` | Beatmap parsing will be async through [async-std](https://github.com/async-rs/async-std)
//!
//! Warnings about clamped inputs or skipped lines are emitted through [`tracing`].
//!
//! [osu!]: https://osu.ppy.sh/home
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[cfg(all(feature = "async_tokio", feature = "async_std"))]
compile_error!("Only one of the features `async_tokio` and `async_std` should be enabled");

/// Types for osu!standard calculations.
pub mod osu;

/// Beatmap parsing and the types it produces.
pub mod parse;

mod accuracy;
mod mods;

#[doc(inline)]
pub use self::{
    accuracy::Accuracy,
    mods::{parse_acronyms, Mods},
    osu::{DifficultyAttributes, OsuPP, OsuStars, PerformanceAttributes, PpError, PpResult},
    parse::{Beatmap, BeatmapAttributes, GameMode, ParseError, ParseResult},
};
