//! The closed opcode catalogue.
//!
//! Every mnemonic in `OPCODES` maps to one `Opcode`. The variant fixes the
//! operand types the handler pops; operand *tokens* that follow the mnemonic in
//! the program text are described by `OpInfo::operands`.

use slvm_core::VarType;

/// Token kind that follows a mnemonic in the program text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandKind {
    Float,
    Str,
    Var,
    Label,
}

impl OperandKind {
    pub fn describe(self) -> &'static str {
        match self {
            OperandKind::Float => "number",
            OperandKind::Str => "string",
            OperandKind::Var => "variable",
            OperandKind::Label => "label",
        }
    }
}

/// Static descriptor stored in the mnemonic table.
#[derive(Debug, PartialEq, Eq)]
pub struct OpInfo {
    pub code: Opcode,
    pub operands: &'static [OperandKind],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Ls,
    Gt,
    Ge,
    Le,
    Eq,
    Ne,
}

/// Operand shapes of binary opcodes. Triple shapes carry the result type,
/// which is the type of the triple operand (the left one for `TT`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    FF,
    TT(VarType),
    CC,
    FT(VarType),
    TF(VarType),
    FC,
    CF,
    MM,
    SS,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathFn {
    Radians,
    Degrees,
    Sin,
    Asin,
    Cos,
    Acos,
    Tan,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Sqrt,
    InverseSqrt,
    Log,
    LogB,
    Abs,
    Sign,
    Floor,
    Ceil,
    Round,
    Pow,
    Mod,
    Min,
    Max,
    Step,
    Clamp,
    SmoothStep,
    Mix,
    PMin,
    PMax,
    CMin,
    CMax,
    PClamp,
    CClamp,
    PMix,
    CMix,
    FSpline,
    CSpline,
    PSpline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeomFn {
    XComp,
    YComp,
    ZComp,
    SetXComp,
    SetYComp,
    SetZComp,
    Comp,
    SetComp,
    Length,
    Distance,
    Normalize,
    FaceForward,
    FaceForward2,
    Reflect,
    Refract,
    PtLineD,
    MComp,
    SetMComp,
    Determinant,
    TransformM,
    VTransformM,
    NTransformM,
    Translate,
    Scale,
    Rotate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrFn {
    Concat,
    Format,
    Printf,
    Match,
}

/// Calls that need the execution environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeFn {
    /// Point/vector/normal into a named space; `from` selects the two-space form.
    Transform { ty: VarType, from: bool },
    /// Color into (or between) named color spaces.
    CTransform { from: bool },
    Depth,
    CalculateNormal,
    Area,
    Du(VarType),
    Dv(VarType),
    Deriv(VarType),
    Random(VarType),
    Noise { ty: VarType, dims: u8 },
    CellNoise { ty: VarType, dims: u8 },
    Ambient,
    Diffuse,
    Specular,
    Phong,
    /// `two_coords` pops explicit `s t`; otherwise the standard `s t` are used.
    Texture { ty: VarType, two_coords: bool },
    Environment(VarType),
    Shadow,
    Trace,
    Attribute,
    Option,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllumFn {
    Init,
    InitCategory,
    Advance,
    Illuminance,
    IlluminanceCategory,
    Illuminate,
    IlluminateAll,
    Solar,
    SolarAll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowOp {
    RsPush,
    RsPop,
    RsGet,
    RsInverse,
    SClear,
    SGet,
    SJz,
    SJnz,
    RsJz,
    RsJnz,
    Jz,
    Jnz,
    Jmp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    Nop,
    Dup,
    Drop,
    DebugBreak,
    PushF,
    PushS,
    PushP,
    PushV,
    IPushV,
    Pop,
    IPop,
    Merge(VarType),
    /// Triple from three floats.
    BuildTriple(VarType),
    BuildColor,
    BuildMatrix,
    /// Float promoted to another type.
    FromFloat(VarType),
    TripleToColor,
    ColorToTriple(VarType),
    Arith(ArithOp, Shape),
    Dot,
    Cross(VarType),
    Neg(VarType),
    Compare(CmpOp, Shape),
    And,
    Or,
    Not,
    Math(MathFn),
    Geom(GeomFn),
    Str(StrFn),
    Bridge(BridgeFn),
    Illum(IllumFn),
    Flow(FlowOp),
}

impl Opcode {
    /// Opcodes whose single operand is a jump target.
    pub fn is_jump(self) -> bool {
        matches!(
            self,
            Opcode::Flow(
                FlowOp::SJz
                    | FlowOp::SJnz
                    | FlowOp::RsJz
                    | FlowOp::RsJnz
                    | FlowOp::Jz
                    | FlowOp::Jnz
                    | FlowOp::Jmp
            )
        )
    }

    /// Opcodes whose variable operand must name an array local.
    pub fn needs_array(self) -> bool {
        matches!(self, Opcode::IPushV | Opcode::IPop)
    }
}
