use serde::{Deserialize, Serialize};

/// Progressive disclosure stage, from a conceptual nudge to a near-solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HintLevel {
    Concept = 1,
    Approach = 2,
    Structure = 3,
    Solution = 4,
}

impl HintLevel {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Concept => "Concept",
            Self::Approach => "Approach",
            Self::Structure => "Structure",
            Self::Solution => "Solution",
        }
    }

    pub fn all() -> &'static [HintLevel] {
        &[Self::Concept, Self::Approach, Self::Structure, Self::Solution]
    }
}

impl TryFrom<u8> for HintLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Concept),
            2 => Ok(Self::Approach),
            3 => Ok(Self::Structure),
            4 => Ok(Self::Solution),
            other => Err(format!("hint level must be 1-4, got {}", other)),
        }
    }
}

impl From<HintLevel> for u8 {
    fn from(level: HintLevel) -> Self {
        level.number()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub level: HintLevel,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,
    #[serde(default)]
    pub revealed: bool,
}

/// Ordered hints for one problem plus the reader's position in them.
///
/// `current_level` is 1-based and always within `[1, hints.len()]`
/// (it stays at 1 for an empty hint list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SavedHintSystem")]
pub struct HintSystem {
    hints: Vec<Hint>,
    current_level: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    problem_id: Option<String>,
}

/// Wire shape of `HintSystem`; the level is clamped on the way in.
#[derive(Deserialize)]
struct SavedHintSystem {
    hints: Vec<Hint>,
    #[serde(default)]
    current_level: usize,
    #[serde(default)]
    problem_id: Option<String>,
}

impl From<SavedHintSystem> for HintSystem {
    fn from(saved: SavedHintSystem) -> Self {
        let max = saved.hints.len().max(1);
        Self {
            current_level: saved.current_level.clamp(1, max),
            hints: saved.hints,
            problem_id: saved.problem_id,
        }
    }
}

impl HintSystem {
    /// Opens at level 1 with the first hint revealed.
    pub fn new(hints: Vec<Hint>, problem_id: Option<String>) -> Self {
        let mut system = Self {
            hints,
            current_level: 1,
            problem_id,
        };
        system.reveal_current();
        system
    }

    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    pub fn problem_id(&self) -> Option<&str> {
        self.problem_id.as_deref()
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn total_levels(&self) -> usize {
        self.hints.len()
    }

    pub fn current_hint(&self) -> Option<&Hint> {
        self.hints.get(self.current_level - 1)
    }

    pub fn can_go_next(&self) -> bool {
        self.current_level < self.hints.len()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_level > 1
    }

    /// Step forward one level. Returns false (and changes nothing) at the last level.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current_level += 1;
        self.reveal_current();
        true
    }

    /// Step back one level. Returns false (and changes nothing) at level 1.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.current_level -= 1;
        true
    }

    /// Jump to `level`, clamped into `[1, total_levels]`.
    pub fn go_to(&mut self, level: usize) {
        let max = self.hints.len().max(1);
        self.current_level = level.clamp(1, max);
        self.reveal_current();
    }

    pub fn reveal_current(&mut self) {
        let idx = self.current_level - 1;
        if let Some(hint) = self.hints.get_mut(idx) {
            hint.revealed = true;
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.hints.iter().filter(|h| h.revealed).count()
    }
}
