use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub const MAX_STAGE: u8 = 2;
pub const STAGE_NAMES: [&str; 3] = ["Basic", "Advanced", "Master"];
pub const DEFAULT_BRAIN_BERRIES: u64 = 10_000_000;
const COST_PER_STAGE: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvolveError {
    #[error("Edumon {0} doesn't exist.")]
    UnknownEdumon(u8),
    #[error("Already at the final stage.")]
    FinalStage,
    #[error("Not enough brain berries: need {needed}, have {available}.")]
    NotEnoughBerries { needed: u64, available: u64 },
}

/// Cost of evolving out of `stage`.
pub fn evolution_cost(stage: u8) -> u64 {
    stage as u64 * COST_PER_STAGE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Edumon {
    pub id: u8,
    pub stage: u8,
    pub custom_name: String,
    #[schema(value_type = Vec<String>)]
    pub default_names: [&'static str; 3],
    #[schema(value_type = String)]
    pub element: &'static str,
    #[schema(value_type = Vec<String>)]
    pub backgrounds: [&'static str; 3],
}

impl Edumon {
    fn starter(
        id: u8,
        default_names: [&'static str; 3],
        element: &'static str,
        backgrounds: [&'static str; 3],
    ) -> Edumon {
        Edumon {
            id,
            stage: 0,
            custom_name: String::new(),
            default_names,
            element,
            backgrounds,
        }
    }

    /// Custom name if one was given, else the default for the current stage.
    pub fn display_name(&self) -> &str {
        if self.custom_name.is_empty() {
            self.default_names[self.stage as usize]
        } else {
            &self.custom_name
        }
    }

    pub fn stage_name(&self) -> &'static str {
        STAGE_NAMES[self.stage as usize]
    }

    pub fn background(&self) -> &'static str {
        self.backgrounds[self.stage as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EdumonCollection {
    pub brain_berries: u64,
    pub current_page: usize,
    pub edumon: Vec<Edumon>,
}

impl Default for EdumonCollection {
    fn default() -> Self {
        EdumonCollection::starter()
    }
}

impl EdumonCollection {
    pub fn starter() -> EdumonCollection {
        EdumonCollection {
            brain_berries: DEFAULT_BRAIN_BERRIES,
            current_page: 0,
            edumon: vec![
                Edumon::starter(
                    1,
                    ["Flame Starter", "Flame Guardian", "Flame Master"],
                    "🔥",
                    [
                        "from-red-500 to-orange-600",
                        "from-red-600 to-orange-700",
                        "from-red-700 to-orange-800",
                    ],
                ),
                Edumon::starter(
                    2,
                    ["Aqua Sprout", "Aqua Defender", "Aqua Champion"],
                    "💧",
                    [
                        "from-blue-500 to-cyan-600",
                        "from-blue-600 to-cyan-700",
                        "from-blue-700 to-cyan-800",
                    ],
                ),
                Edumon::starter(
                    3,
                    ["Nature Seed", "Nature Warrior", "Nature Lord"],
                    "🌱",
                    [
                        "from-green-500 to-emerald-600",
                        "from-green-600 to-emerald-700",
                        "from-green-700 to-emerald-800",
                    ],
                ),
                Edumon::starter(
                    4,
                    ["Spark Tiny", "Spark Bolt", "Spark Thunder"],
                    "⚡",
                    [
                        "from-yellow-400 to-amber-500",
                        "from-yellow-500 to-amber-600",
                        "from-yellow-600 to-amber-700",
                    ],
                ),
                Edumon::starter(
                    5,
                    ["Stone Pebble", "Stone Boulder", "Stone Titan"],
                    "🪨",
                    [
                        "from-stone-500 to-gray-700",
                        "from-stone-600 to-gray-800",
                        "from-stone-700 to-gray-900",
                    ],
                ),
                Edumon::starter(
                    6,
                    ["Wind Breeze", "Wind Gale", "Wind Storm"],
                    "☁️",
                    [
                        "from-pink-100 to-purple-200",
                        "from-pink-200 to-purple-300",
                        "from-pink-300 to-purple-400",
                    ],
                ),
            ],
        }
    }

    pub fn get(&self, id: u8) -> Option<&Edumon> {
        self.edumon.iter().find(|it| it.id == id)
    }

    pub fn current(&self) -> Option<&Edumon> {
        self.edumon.get(self.current_page)
    }

    pub fn can_evolve(&self, id: u8) -> bool {
        self.get(id)
            .map(|it| it.stage < MAX_STAGE && self.brain_berries >= evolution_cost(it.stage))
            .unwrap_or(false)
    }

    /// Spends berries and moves the edumon one stage up.
    pub fn evolve(&mut self, id: u8) -> Result<&Edumon, EvolveError> {
        let available = self.brain_berries;
        let edumon = self
            .edumon
            .iter_mut()
            .find(|it| it.id == id)
            .ok_or(EvolveError::UnknownEdumon(id))?;

        if edumon.stage >= MAX_STAGE {
            return Err(EvolveError::FinalStage);
        }
        let needed = evolution_cost(edumon.stage);
        if available < needed {
            return Err(EvolveError::NotEnoughBerries { needed, available });
        }

        edumon.stage += 1;
        self.brain_berries = available - needed;
        Ok(edumon)
    }

    /// Stores a trimmed custom name; blank resets to the stage's default name.
    pub fn rename(&mut self, id: u8, name: &str) -> Result<&Edumon, EvolveError> {
        let edumon = self
            .edumon
            .iter_mut()
            .find(|it| it.id == id)
            .ok_or(EvolveError::UnknownEdumon(id))?;
        edumon.custom_name = name.trim().to_string();
        Ok(edumon)
    }

    pub fn next_page(&mut self) -> usize {
        if !self.edumon.is_empty() {
            self.current_page = (self.current_page + 1) % self.edumon.len();
        }
        self.current_page
    }

    pub fn prev_page(&mut self) -> usize {
        let len = self.edumon.len();
        if len > 0 {
            self.current_page = (self.current_page + len - 1) % len;
        }
        self.current_page
    }
}
