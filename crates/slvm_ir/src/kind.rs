use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Surface,
    LightSource,
    Volume,
    Displacement,
    Transformation,
    Imager,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 6] = [
        ShaderKind::Surface,
        ShaderKind::LightSource,
        ShaderKind::Volume,
        ShaderKind::Displacement,
        ShaderKind::Transformation,
        ShaderKind::Imager,
    ];

    pub fn parse(word: &str) -> Option<ShaderKind> {
        Self::ALL.into_iter().find(|k| k.keyword() == word)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ShaderKind::Surface => "surface",
            ShaderKind::LightSource => "lightsource",
            ShaderKind::Volume => "volume",
            ShaderKind::Displacement => "displacement",
            ShaderKind::Transformation => "transformation",
            ShaderKind::Imager => "imager",
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
