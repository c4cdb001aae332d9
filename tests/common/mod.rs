// Not every test binary uses every item
#![allow(unused)]

use rosu_ppv2::Beatmap;

pub use self::{mods::*, paths::*};

/// Paths to .osu files
mod paths {
    pub const JUMPS: &str = "./resources/jumps.osu";
    pub const QUIRKS: &str = "./resources/quirks.osu";
    pub const TAIKO: &str = "./resources/taiko.osu";
}

/// Bit values for mods
mod mods {
    pub const NM: u32 = 0;
    pub const NF: u32 = 1 << 0;
    pub const EZ: u32 = 1 << 1;
    pub const TD: u32 = 1 << 2;
    pub const HD: u32 = 1 << 3;
    pub const HR: u32 = 1 << 4;
    pub const DT: u32 = 1 << 6;
    pub const HT: u32 = 1 << 8;
    pub const NC: u32 = 1 << 9;
    pub const FL: u32 = 1 << 10;
    pub const SO: u32 = 1 << 12;
}

#[macro_export]
#[rustfmt::skip]
macro_rules! test_map {
    ($path:expr) => {{
        #[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
        { common::test_map($path) }
        #[cfg(any(feature = "async_tokio", feature = "async_std"))]
        { common::test_map($path).await }
    }};
}

#[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
pub fn test_map(path: &str) -> Beatmap {
    Beatmap::from_path(path).unwrap()
}

#[cfg(feature = "async_tokio")]
pub async fn test_map(path: &str) -> Beatmap {
    Beatmap::from_path(path).await.unwrap()
}

#[cfg(feature = "async_std")]
pub async fn test_map(path: &str) -> Beatmap {
    let file = async_std::fs::File::open(path).await.unwrap();

    Beatmap::parse(file).await.unwrap()
}

/// Run the future to completion on whichever runtime the features enable.
#[cfg(feature = "async_tokio")]
pub fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(fut)
}

#[cfg(feature = "async_std")]
pub fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    async_std::task::block_on(fut)
}

#[track_caller]
pub fn assert_eq_float<F: Float>(a: F, b: F) {
    assert!((a - b).abs() < F::EPSILON, "{a} != {b}")
}

#[track_caller]
pub fn assert_close(a: f64, b: f64, tolerance: f64) {
    assert!((a - b).abs() < tolerance, "{a} != {b} (tolerance {tolerance})")
}

/// Trait to provide flexibility in the `assert_eq_float` function.
pub trait Float:
    Copy + std::fmt::Display + std::ops::Sub<Output = Self> + PartialOrd + Sized
{
    const EPSILON: Self;

    fn abs(self) -> Self;
}

macro_rules! impl_float {
    ( $( $ty:ty )* ) => {
        $(
            impl Float for $ty {
                const EPSILON: Self = Self::EPSILON;

                fn abs(self) -> Self {
                    self.abs()
                }
            }
        )*
    }
}

impl_float!(f32 f64);
