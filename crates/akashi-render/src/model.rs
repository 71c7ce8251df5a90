#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableStatus {
    Pass,
    Fail,
    Unmatched,
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableResource {
    pub address: String,
    /// `create`, `delete`, or `update`.
    pub direction: String,
    pub status: RenderableStatus,
    /// False for failures and for misses in strict sections.
    pub passed: bool,
    pub matched_by: Option<String>,
    /// Multi-line attribute diff; empty unless the resource failed.
    pub diff: String,
}

impl RenderableResource {
    pub fn glyph(&self) -> &'static str {
        match self.status {
            RenderableStatus::Pass => "✓",
            RenderableStatus::Skipped => "-",
            RenderableStatus::Unmatched if self.passed => "!",
            RenderableStatus::Fail | RenderableStatus::Unmatched => "×",
        }
    }

    /// Address line, without the diff.
    pub fn headline(&self) -> String {
        match self.status {
            RenderableStatus::Pass | RenderableStatus::Fail => {
                format!("{} {}", self.glyph(), self.address)
            }
            RenderableStatus::Unmatched => {
                format!("{} {} (no matching rule)", self.glyph(), self.address)
            }
            RenderableStatus::Skipped => format!("{} {} (not evaluated)", self.glyph(), self.address),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableData {
    pub resources_total: u32,
    pub passed: u32,
    pub failed: u32,
    pub unmatched: u32,
    pub skipped: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub resources: Vec<RenderableResource>,
    pub data: RenderableData,
}

impl RenderableVerdictStatus {
    pub fn label(self) -> &'static str {
        match self {
            RenderableVerdictStatus::Pass => "PASS",
            RenderableVerdictStatus::Warn => "WARN",
            RenderableVerdictStatus::Fail => "FAIL",
        }
    }
}
