use slvm_core::{Color, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub enum LightKind {
    /// Contributes only to `ambient()`.
    Ambient,
    /// Parallel light travelling along `direction`.
    Distant { direction: Vec3 },
    /// Point light at `from` with inverse-square falloff.
    Point { from: Vec3 },
}

/// A light source known to `GridEnv`.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    /// Category names this light belongs to.
    pub categories: Vec<String>,
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::with_kind(LightKind::Ambient, color, intensity)
    }

    pub fn distant(direction: Vec3, color: Color, intensity: f32) -> Self {
        Self::with_kind(LightKind::Distant { direction }, color, intensity)
    }

    pub fn point(from: Vec3, color: Color, intensity: f32) -> Self {
        Self::with_kind(LightKind::Point { from }, color, intensity)
    }

    fn with_kind(kind: LightKind, color: Color, intensity: f32) -> Self {
        Self {
            kind,
            color,
            intensity,
            categories: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self.kind, LightKind::Ambient)
    }

    /// Category filter of `illuminance2`: a comma-separated list where `name`
    /// requires membership and `-name` excludes it. Empty matches everything.
    pub fn matches_category(&self, category: &str) -> bool {
        category
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .all(|c| match c.strip_prefix('-') {
                Some(excluded) => !self.categories.iter().any(|own| own == excluded),
                None => self.categories.iter().any(|own| own == c),
            })
    }

    /// Vector from the light towards the surface point `p`.
    pub fn incident(&self, p: Vec3) -> Vec3 {
        match &self.kind {
            LightKind::Ambient => Vec3::ZERO,
            LightKind::Distant { direction } => *direction,
            LightKind::Point { from } => p - *from,
        }
    }

    /// Light color arriving along `l` (as returned by `incident`).
    pub fn radiance(&self, l: Vec3) -> Color {
        let c = self.color * self.intensity;
        match self.kind {
            LightKind::Point { .. } => {
                let d2 = l.dot(l);
                if d2 > 0.0 { c * (1.0 / d2) } else { c }
            }
            _ => c,
        }
    }
}
