mod attributes;
mod difficulty_object;
mod osu_object;
mod pp;
mod skill;
mod skill_kind;
mod stars;

use difficulty_object::DifficultyObject;
use osu_object::OsuObject;
use skill::Skill;
use skill_kind::SkillKind;

pub use attributes::{DifficultyAttributes, PerformanceAttributes};
pub use pp::{OsuPP, PpError, PpResult};
pub use stars::{stars, OsuStars, DEFAULT_SINGLETAP_THRESHOLD};
