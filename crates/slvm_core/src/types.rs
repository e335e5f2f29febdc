use std::fmt;

/// Declared type of a shading value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VarType {
    Float,
    String,
    Point,
    Vector,
    Normal,
    Color,
    Matrix,
}

impl VarType {
    pub const ALL: [VarType; 7] = [
        VarType::Float,
        VarType::String,
        VarType::Point,
        VarType::Vector,
        VarType::Normal,
        VarType::Color,
        VarType::Matrix,
    ];

    pub fn parse(word: &str) -> Option<VarType> {
        Some(match word {
            "float" => VarType::Float,
            "string" => VarType::String,
            "point" => VarType::Point,
            "vector" => VarType::Vector,
            "normal" => VarType::Normal,
            "color" => VarType::Color,
            "matrix" => VarType::Matrix,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            VarType::Float => "float",
            VarType::String => "string",
            VarType::Point => "point",
            VarType::Vector => "vector",
            VarType::Normal => "normal",
            VarType::Color => "color",
            VarType::Matrix => "matrix",
        }
    }

    /// Single-letter suffix used in mnemonics (`addff`, `negp`, ...).
    pub fn letter(self) -> char {
        match self {
            VarType::Float => 'f',
            VarType::String => 's',
            VarType::Point => 'p',
            VarType::Vector => 'v',
            VarType::Normal => 'n',
            VarType::Color => 'c',
            VarType::Matrix => 'm',
        }
    }

    pub fn storage(self) -> Storage {
        match self {
            VarType::Float => Storage::Float,
            VarType::String => Storage::String,
            VarType::Point | VarType::Vector | VarType::Normal => Storage::Triple,
            VarType::Color => Storage::Color,
            VarType::Matrix => Storage::Matrix,
        }
    }

    /// Number of floats one element of this type consumes from an argument list.
    pub fn float_count(self) -> usize {
        match self {
            VarType::Float => 1,
            VarType::String => 0,
            VarType::Point | VarType::Vector | VarType::Normal | VarType::Color => 3,
            VarType::Matrix => 16,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Uniform values hold one element, varying values one per grid point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VarClass {
    Uniform,
    Varying,
}

impl VarClass {
    pub fn parse(word: &str) -> Option<VarClass> {
        match word {
            "uniform" => Some(VarClass::Uniform),
            "varying" => Some(VarClass::Varying),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            VarClass::Uniform => "uniform",
            VarClass::Varying => "varying",
        }
    }

    pub fn is_varying(self) -> bool {
        self == VarClass::Varying
    }

    /// Varying if either side is.
    pub fn combine(self, other: VarClass) -> VarClass {
        if self.is_varying() || other.is_varying() {
            VarClass::Varying
        } else {
            VarClass::Uniform
        }
    }
}

impl fmt::Display for VarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Physical storage shared by one or more `VarType`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Storage {
    Float,
    String,
    Triple,
    Color,
    Matrix,
}
