mod attributes;
mod control_point;
mod error;
mod hitobject;
mod pos2;
mod reader;

pub use attributes::{ApplyFlags, BeatmapAttributes};
pub use control_point::TimingPoint;
pub use error::{ParseError, ParseResult};
pub use hitobject::{HitObject, HitObjectKind};
pub use pos2::Pos2;

use reader::FileReader;

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
use std::{fs::File, io::Read, path::Path};

#[cfg(feature = "async_tokio")]
use tokio::{fs::File, io::AsyncRead};

#[cfg(feature = "async_tokio")]
use std::path::Path;

#[cfg(feature = "async_std")]
use async_std::io::Read;

use std::fmt;

macro_rules! parse_body {
    ($reader:ident $( .$await:tt )?) => {{
        // Skip empty lines until the file header
        if $reader.next_line() $( .$await )? ? == 0 {
            return Err(ParseError::IncorrectFileHeader);
        }

        let mut state = BeatmapState::new($reader.version()?);

        while $reader.next_line() $( .$await )? ? != 0 {
            state.process_line(&$reader.get_line())?;
        }

        Ok(state.into_beatmap())
    }};
}

/// The mode of a beatmap.
///
/// Only [`GameMode::Osu`] maps can be calculated, the other modes are
/// recognized so that their maps can be rejected explicitly.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum GameMode {
    Osu = 0,
    Taiko = 1,
    Catch = 2,
    Mania = 3,
}

impl Default for GameMode {
    #[inline]
    fn default() -> Self {
        Self::Osu
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self {
            Self::Osu => "osu!standard",
            Self::Taiko => "osu!taiko",
            Self::Catch => "osu!catch",
            Self::Mania => "osu!mania",
        };

        f.write_str(mode)
    }
}

/// All beatmap data that is relevant for difficulty and performance calculation.
///
/// Hit objects and timing points are expected to be in chronological order.
#[derive(Clone, Debug, PartialEq)]
pub struct Beatmap {
    pub mode: GameMode,
    pub version: u8,

    pub title: String,
    pub title_unicode: String,
    pub artist: String,
    pub artist_unicode: String,
    /// Mapper name
    pub creator: String,
    /// Difficulty name
    pub difficulty_name: String,

    pub n_circles: usize,
    pub n_sliders: usize,
    pub n_spinners: usize,

    pub ar: f32,
    pub od: f32,
    pub cs: f32,
    pub hp: f32,
    pub sv: f64,
    pub tick_rate: f64,

    pub hit_objects: Vec<HitObject>,
    pub timing_points: Vec<TimingPoint>,
}

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            mode: GameMode::Osu,
            version: 14,
            title: String::new(),
            title_unicode: String::new(),
            artist: String::new(),
            artist_unicode: String::new(),
            creator: String::new(),
            difficulty_name: String::new(),
            n_circles: 0,
            n_sliders: 0,
            n_spinners: 0,
            ar: 5.0,
            od: 5.0,
            cs: 5.0,
            hp: 5.0,
            sv: 1.0,
            tick_rate: 1.0,
            hit_objects: Vec::new(),
            timing_points: Vec::new(),
        }
    }
}

impl Beatmap {
    /// Parse a beatmap from a `.osu` file's content.
    ///
    /// Malformed timing point and hit object lines are skipped.
    #[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
    pub fn parse<R: Read>(input: R) -> ParseResult<Self> {
        let mut reader = FileReader::new(input);

        parse_body!(reader)
    }

    /// Parse a beatmap from a `.osu` file's content.
    ///
    /// Malformed timing point and hit object lines are skipped.
    #[cfg(feature = "async_tokio")]
    pub async fn parse<R: AsyncRead + Unpin>(input: R) -> ParseResult<Self> {
        let mut reader = FileReader::new(input);

        parse_body!(reader.await)
    }

    /// Parse a beatmap from a `.osu` file's content.
    ///
    /// Malformed timing point and hit object lines are skipped.
    #[cfg(feature = "async_std")]
    pub async fn parse<R: Read + Unpin>(input: R) -> ParseResult<Self> {
        let mut reader = FileReader::new(input);

        parse_body!(reader.await)
    }

    /// Read and parse the `.osu` file at the given path.
    #[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> ParseResult<Self> {
        Self::parse(File::open(path)?)
    }

    /// Read and parse the `.osu` file at the given path.
    #[cfg(feature = "async_tokio")]
    pub async fn from_path<P: AsRef<Path>>(path: P) -> ParseResult<Self> {
        Self::parse(File::open(path).await?).await
    }

    /// The map's attributes without any mods applied.
    #[inline]
    pub fn attributes(&self) -> BeatmapAttributes {
        BeatmapAttributes::new(self.ar, self.od, self.cs, self.hp)
    }

    /// The maximum achievable combo, i.e. the amount of hit objects
    /// plus all slider ticks, repeats, and tails.
    pub fn max_combo(&self) -> usize {
        let mut max_combo: usize = 0;
        let mut timing_points = self.timing_points.iter().peekable();
        let mut px_per_beat = self.sv * 100.0;
        let mut initialized = false;

        for h in self.hit_objects.iter() {
            let (pixel_len, repeats) = match h.kind {
                HitObjectKind::Slider { pixel_len, repeats } => (pixel_len, repeats.max(1)),
                HitObjectKind::Circle | HitObjectKind::Spinner => {
                    max_combo += 1;

                    continue;
                }
            };

            // Keep track of the current timing point without
            // looping through all of them for every object.
            // The first point applies even to sliders before it.
            while let Some(point) =
                timing_points.next_if(|point| !initialized || h.start_time >= point.time)
            {
                initialized = true;
                let sv_multiplier = point.slider_velocity_multiplier();
                px_per_beat = self.sv * 100.0 * sv_multiplier;

                if self.version < 8 {
                    px_per_beat /= sv_multiplier;
                }
            }

            let spans = repeats as f64;
            let beats = pixel_len * spans / px_per_beat;

            if !(px_per_beat.is_finite() && px_per_beat > 0.0 && beats.is_finite()) {
                tracing::warn!(
                    time = h.start_time,
                    px_per_beat,
                    pixel_len,
                    "invalid slider velocity, ignoring slider ticks"
                );

                // head, repeats, and tail
                max_combo = max_combo.saturating_add(repeats.saturating_add(1));

                continue;
            }

            let ticks = ((beats - 0.1) / spans * self.tick_rate).ceil() as i64;
            let repeats = i64::try_from(repeats).unwrap_or(i64::MAX);

            let combo = ticks
                .saturating_sub(1)
                .saturating_mul(repeats)
                .saturating_add(repeats)
                .saturating_add(1);

            let combo = usize::try_from(combo.max(0)).unwrap_or(usize::MAX);

            max_combo = max_combo.saturating_add(combo);
        }

        max_combo
    }
}

#[derive(Copy, Clone, Debug)]
enum Section {
    None,
    General,
    Metadata,
    Difficulty,
    TimingPoints,
    HitObjects,
}

impl Section {
    #[inline]
    fn from_str(s: &str) -> Self {
        match s {
            "General" => Self::General,
            "Metadata" => Self::Metadata,
            "Difficulty" => Self::Difficulty,
            "TimingPoints" => Self::TimingPoints,
            "HitObjects" => Self::HitObjects,
            _ => Self::None,
        }
    }
}

struct BeatmapState {
    map: Beatmap,
    section: Section,
    ar: Option<f32>,
}

impl BeatmapState {
    const CIRCLE_FLAG: u8 = 1 << 0;
    const SLIDER_FLAG: u8 = 1 << 1;
    const SPINNER_FLAG: u8 = 1 << 3;

    fn new(version: u8) -> Self {
        let map = Beatmap {
            version,
            hit_objects: Vec::with_capacity(256),
            ..Default::default()
        };

        Self {
            map,
            section: Section::None,
            ar: None,
        }
    }

    fn process_line(&mut self, line: &str) -> ParseResult<()> {
        if line.is_empty() {
            return Ok(());
        }

        if line.starts_with('[') && line.ends_with(']') {
            self.section = Section::from_str(&line[1..line.len() - 1]);

            return Ok(());
        }

        match self.section {
            Section::General => self.process_general(line),
            Section::Metadata => {
                self.process_metadata(line);

                Ok(())
            }
            Section::Difficulty => {
                self.process_difficulty(line);

                Ok(())
            }
            Section::TimingPoints => {
                self.process_timing_point(line);

                Ok(())
            }
            Section::HitObjects => {
                self.process_hit_object(line);

                Ok(())
            }
            Section::None => Ok(()),
        }
    }

    fn process_general(&mut self, line: &str) -> ParseResult<()> {
        if let Some(("Mode", value)) = split_colon(line) {
            self.map.mode = match value {
                "0" => GameMode::Osu,
                "1" => GameMode::Taiko,
                "2" => GameMode::Catch,
                "3" => GameMode::Mania,
                _ => return Err(ParseError::InvalidMode(value.to_owned())),
            };
        }

        Ok(())
    }

    fn process_metadata(&mut self, line: &str) {
        let Some((key, value)) = split_colon(line) else {
            tracing::warn!(line, "invalid key-value line");

            return;
        };

        let field = match key {
            "Title" => &mut self.map.title,
            "TitleUnicode" => &mut self.map.title_unicode,
            "Artist" => &mut self.map.artist,
            "ArtistUnicode" => &mut self.map.artist_unicode,
            "Creator" => &mut self.map.creator,
            "Version" => &mut self.map.difficulty_name,
            _ => return,
        };

        value.clone_into(field);
    }

    fn process_difficulty(&mut self, line: &str) {
        let Some((key, value)) = split_colon(line) else {
            tracing::warn!(line, "invalid key-value line");

            return;
        };

        macro_rules! parse_value {
            ( $ty:ty ) => {
                match value.parse::<$ty>() {
                    Ok(value) => value,
                    Err(_) => {
                        tracing::warn!(key, value, "invalid difficulty value");

                        return;
                    }
                }
            };
        }

        match key {
            "CircleSize" => self.map.cs = parse_value!(f32),
            "OverallDifficulty" => self.map.od = parse_value!(f32),
            "ApproachRate" => self.ar = Some(parse_value!(f32)),
            "HPDrainRate" => self.map.hp = parse_value!(f32),
            "SliderMultiplier" => self.map.sv = parse_value!(f64),
            "SliderTickRate" => self.map.tick_rate = parse_value!(f64),
            _ => {}
        }
    }

    fn process_timing_point(&mut self, line: &str) {
        let split: Vec<_> = line.split(',').map(str::trim).collect();

        if split.len() > 8 {
            tracing::warn!(line, "timing point with trailing values");
        } else if split.len() < 2 {
            tracing::warn!(line, "timing point with too few values");

            return;
        }

        let (Ok(time), Ok(beat_len)) = (split[0].parse::<f64>(), split[1].parse::<f64>()) else {
            tracing::warn!(line, "invalid timing point");

            return;
        };

        if !(time.is_finite() && beat_len.is_finite()) {
            tracing::warn!(line, "timing point with non-finite values");

            return;
        }

        let uninherited = split.get(6).map_or(beat_len > 0.0, |field| *field != "0");

        self.map.timing_points.push(TimingPoint {
            time,
            beat_len,
            uninherited,
        });
    }

    fn process_hit_object(&mut self, line: &str) {
        let split: Vec<_> = line.split(',').map(str::trim).collect();

        if split.len() > 11 {
            tracing::warn!(line, "hit object with trailing values");
        } else if split.len() < 5 {
            tracing::warn!(line, "hit object with too few values");

            return;
        }

        let (Ok(x), Ok(y), Ok(start_time), Ok(kind)) = (
            split[0].parse::<f64>(),
            split[1].parse::<f64>(),
            split[2].parse::<f64>(),
            split[3].parse::<u8>(),
        ) else {
            tracing::warn!(line, "invalid hit object");

            return;
        };

        if !(x.is_finite() && y.is_finite() && start_time.is_finite()) {
            tracing::warn!(line, "hit object with non-finite values");

            return;
        }

        let kind = if kind & Self::CIRCLE_FLAG > 0 {
            self.map.n_circles += 1;

            HitObjectKind::Circle
        } else if kind & Self::SLIDER_FLAG > 0 {
            let slider_fields = split
                .get(6)
                .zip(split.get(7))
                .map(|(repeats, len)| (repeats.parse::<usize>(), len.parse::<f64>()));

            let Some((Ok(repeats), Ok(pixel_len))) = slider_fields else {
                tracing::warn!(line, "invalid slider");

                return;
            };

            self.map.n_sliders += 1;

            HitObjectKind::Slider { pixel_len, repeats }
        } else if kind & Self::SPINNER_FLAG > 0 {
            self.map.n_spinners += 1;

            HitObjectKind::Spinner
        } else {
            tracing::warn!(line, "unknown hit object type");

            return;
        };

        self.map.hit_objects.push(HitObject {
            pos: Pos2 { x, y },
            start_time,
            kind,
        });
    }

    fn into_beatmap(self) -> Beatmap {
        let mut map = self.map;

        // AR used to be tied to OD in older formats
        map.ar = self.ar.unwrap_or(map.od);

        map
    }
}

#[inline]
fn split_colon(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;

    Some((key.trim_end(), value.trim_start()))
}
