use slvm_core::{VarClass, VarType};
use std::fmt;

/// Graphics-state variables supplied by the execution environment.
///
/// Declaration order is the bit order of the `USES` header mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StdVar {
    Cs,
    Os,
    Ng,
    Du,
    Dv,
    L,
    Cl,
    Ol,
    P,
    DPdu,
    DPdv,
    N,
    U,
    V,
    S,
    T,
    I,
    Ci,
    Oi,
    Ps,
    E,
    NComps,
    Time,
    Alpha,
    Ns,
}

static STD_VAR_NAMES: phf::Map<&'static str, StdVar> = phf::phf_map! {
    "Cs" => StdVar::Cs,
    "Os" => StdVar::Os,
    "Ng" => StdVar::Ng,
    "du" => StdVar::Du,
    "dv" => StdVar::Dv,
    "L" => StdVar::L,
    "Cl" => StdVar::Cl,
    "Ol" => StdVar::Ol,
    "P" => StdVar::P,
    "dPdu" => StdVar::DPdu,
    "dPdv" => StdVar::DPdv,
    "N" => StdVar::N,
    "u" => StdVar::U,
    "v" => StdVar::V,
    "s" => StdVar::S,
    "t" => StdVar::T,
    "I" => StdVar::I,
    "Ci" => StdVar::Ci,
    "Oi" => StdVar::Oi,
    "Ps" => StdVar::Ps,
    "E" => StdVar::E,
    "ncomps" => StdVar::NComps,
    "time" => StdVar::Time,
    "alpha" => StdVar::Alpha,
    "Ns" => StdVar::Ns,
};

impl StdVar {
    pub const COUNT: usize = 25;

    pub const ALL: [StdVar; StdVar::COUNT] = [
        StdVar::Cs,
        StdVar::Os,
        StdVar::Ng,
        StdVar::Du,
        StdVar::Dv,
        StdVar::L,
        StdVar::Cl,
        StdVar::Ol,
        StdVar::P,
        StdVar::DPdu,
        StdVar::DPdv,
        StdVar::N,
        StdVar::U,
        StdVar::V,
        StdVar::S,
        StdVar::T,
        StdVar::I,
        StdVar::Ci,
        StdVar::Oi,
        StdVar::Ps,
        StdVar::E,
        StdVar::NComps,
        StdVar::Time,
        StdVar::Alpha,
        StdVar::Ns,
    ];

    pub fn parse(name: &str) -> Option<StdVar> {
        STD_VAR_NAMES.get(name).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            StdVar::Cs => "Cs",
            StdVar::Os => "Os",
            StdVar::Ng => "Ng",
            StdVar::Du => "du",
            StdVar::Dv => "dv",
            StdVar::L => "L",
            StdVar::Cl => "Cl",
            StdVar::Ol => "Ol",
            StdVar::P => "P",
            StdVar::DPdu => "dPdu",
            StdVar::DPdv => "dPdv",
            StdVar::N => "N",
            StdVar::U => "u",
            StdVar::V => "v",
            StdVar::S => "s",
            StdVar::T => "t",
            StdVar::I => "I",
            StdVar::Ci => "Ci",
            StdVar::Oi => "Oi",
            StdVar::Ps => "Ps",
            StdVar::E => "E",
            StdVar::NComps => "ncomps",
            StdVar::Time => "time",
            StdVar::Alpha => "alpha",
            StdVar::Ns => "Ns",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn bit(self) -> u32 {
        1 << self.index()
    }

    pub fn ty(self) -> VarType {
        match self {
            StdVar::Cs | StdVar::Os | StdVar::Cl | StdVar::Ol | StdVar::Ci | StdVar::Oi => {
                VarType::Color
            }
            StdVar::Ng | StdVar::N | StdVar::Ns => VarType::Normal,
            StdVar::L | StdVar::DPdu | StdVar::DPdv | StdVar::I => VarType::Vector,
            StdVar::P | StdVar::Ps | StdVar::E => VarType::Point,
            StdVar::Du
            | StdVar::Dv
            | StdVar::U
            | StdVar::V
            | StdVar::S
            | StdVar::T
            | StdVar::NComps
            | StdVar::Time
            | StdVar::Alpha => VarType::Float,
        }
    }

    pub fn class(self) -> VarClass {
        match self {
            StdVar::E | StdVar::NComps | StdVar::Time | StdVar::Du | StdVar::Dv => {
                VarClass::Uniform
            }
            _ => VarClass::Varying,
        }
    }
}

impl fmt::Display for StdVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `USES` header bit-mask of standard variables a shader touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UsesMask(pub u32);

impl UsesMask {
    pub const ALL: UsesMask = UsesMask((1 << StdVar::COUNT) - 1);

    pub fn contains(self, var: StdVar) -> bool {
        self.0 & var.bit() != 0
    }

    pub fn insert(&mut self, var: StdVar) {
        self.0 |= var.bit();
    }

    /// Bits above the last standard variable.
    pub fn unknown_bits(self) -> u32 {
        self.0 & !Self::ALL.0
    }

    pub fn iter(self) -> impl Iterator<Item = StdVar> {
        StdVar::ALL.into_iter().filter(move |v| self.contains(*v))
    }
}
