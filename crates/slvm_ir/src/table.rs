//! Static mnemonic table.

use crate::opcode::{
    ArithOp, BridgeFn, CmpOp, FlowOp, GeomFn, IllumFn, MathFn, OpInfo, Opcode, OperandKind,
    Shape, StrFn,
};
use slvm_core::VarType;

const NONE: &[OperandKind] = &[];
const F: &[OperandKind] = &[OperandKind::Float];
const S: &[OperandKind] = &[OperandKind::Str];
const FFF: &[OperandKind] = &[OperandKind::Float, OperandKind::Float, OperandKind::Float];
const V: &[OperandKind] = &[OperandKind::Var];
const L: &[OperandKind] = &[OperandKind::Label];

pub static OPCODES: phf::Map<&'static str, OpInfo> = phf::phf_map! {
    "nop" => OpInfo { code: Opcode::Nop, operands: NONE },
    "dup" => OpInfo { code: Opcode::Dup, operands: NONE },
    "drop" => OpInfo { code: Opcode::Drop, operands: NONE },
    "debug_break" => OpInfo { code: Opcode::DebugBreak, operands: NONE },
    "pushif" => OpInfo { code: Opcode::PushF, operands: F },
    "pushis" => OpInfo { code: Opcode::PushS, operands: S },
    "puship" => OpInfo { code: Opcode::PushP, operands: FFF },
    "pushv" => OpInfo { code: Opcode::PushV, operands: V },
    "ipushv" => OpInfo { code: Opcode::IPushV, operands: V },
    "pop" => OpInfo { code: Opcode::Pop, operands: V },
    "ipop" => OpInfo { code: Opcode::IPop, operands: V },
    "mergef" => OpInfo { code: Opcode::Merge(VarType::Float), operands: NONE },
    "merges" => OpInfo { code: Opcode::Merge(VarType::String), operands: NONE },
    "mergep" => OpInfo { code: Opcode::Merge(VarType::Point), operands: NONE },
    "mergev" => OpInfo { code: Opcode::Merge(VarType::Vector), operands: NONE },
    "mergen" => OpInfo { code: Opcode::Merge(VarType::Normal), operands: NONE },
    "mergec" => OpInfo { code: Opcode::Merge(VarType::Color), operands: NONE },
    "mergem" => OpInfo { code: Opcode::Merge(VarType::Matrix), operands: NONE },
    "settp" => OpInfo { code: Opcode::BuildTriple(VarType::Point), operands: NONE },
    "settv" => OpInfo { code: Opcode::BuildTriple(VarType::Vector), operands: NONE },
    "settn" => OpInfo { code: Opcode::BuildTriple(VarType::Normal), operands: NONE },
    "settc" => OpInfo { code: Opcode::BuildColor, operands: NONE },
    "settm" => OpInfo { code: Opcode::BuildMatrix, operands: NONE },
    "setfc" => OpInfo { code: Opcode::FromFloat(VarType::Color), operands: NONE },
    "setfp" => OpInfo { code: Opcode::FromFloat(VarType::Point), operands: NONE },
    "setfv" => OpInfo { code: Opcode::FromFloat(VarType::Vector), operands: NONE },
    "setfn" => OpInfo { code: Opcode::FromFloat(VarType::Normal), operands: NONE },
    "setfm" => OpInfo { code: Opcode::FromFloat(VarType::Matrix), operands: NONE },
    "setpc" => OpInfo { code: Opcode::TripleToColor, operands: NONE },
    "setcp" => OpInfo { code: Opcode::ColorToTriple(VarType::Point), operands: NONE },
    "setvc" => OpInfo { code: Opcode::TripleToColor, operands: NONE },
    "setcv" => OpInfo { code: Opcode::ColorToTriple(VarType::Vector), operands: NONE },
    "setnc" => OpInfo { code: Opcode::TripleToColor, operands: NONE },
    "setcn" => OpInfo { code: Opcode::ColorToTriple(VarType::Normal), operands: NONE },
    "addff" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::FF), operands: NONE },
    "addpp" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::TT(VarType::Point)), operands: NONE },
    "addpv" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::TT(VarType::Point)), operands: NONE },
    "addpn" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::TT(VarType::Point)), operands: NONE },
    "addvp" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::TT(VarType::Vector)), operands: NONE },
    "addvv" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::TT(VarType::Vector)), operands: NONE },
    "addvn" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::TT(VarType::Vector)), operands: NONE },
    "addnp" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::TT(VarType::Normal)), operands: NONE },
    "addnv" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::TT(VarType::Normal)), operands: NONE },
    "addnn" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::TT(VarType::Normal)), operands: NONE },
    "addcc" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::CC), operands: NONE },
    "addfp" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::FT(VarType::Point)), operands: NONE },
    "addpf" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::TF(VarType::Point)), operands: NONE },
    "addfv" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::FT(VarType::Vector)), operands: NONE },
    "addvf" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::TF(VarType::Vector)), operands: NONE },
    "addfn" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::FT(VarType::Normal)), operands: NONE },
    "addnf" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::TF(VarType::Normal)), operands: NONE },
    "addfc" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::FC), operands: NONE },
    "addcf" => OpInfo { code: Opcode::Arith(ArithOp::Add, Shape::CF), operands: NONE },
    "subff" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::FF), operands: NONE },
    "subpp" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::TT(VarType::Point)), operands: NONE },
    "subpv" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::TT(VarType::Point)), operands: NONE },
    "subpn" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::TT(VarType::Point)), operands: NONE },
    "subvp" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::TT(VarType::Vector)), operands: NONE },
    "subvv" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::TT(VarType::Vector)), operands: NONE },
    "subvn" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::TT(VarType::Vector)), operands: NONE },
    "subnp" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::TT(VarType::Normal)), operands: NONE },
    "subnv" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::TT(VarType::Normal)), operands: NONE },
    "subnn" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::TT(VarType::Normal)), operands: NONE },
    "subcc" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::CC), operands: NONE },
    "subfp" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::FT(VarType::Point)), operands: NONE },
    "subpf" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::TF(VarType::Point)), operands: NONE },
    "subfv" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::FT(VarType::Vector)), operands: NONE },
    "subvf" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::TF(VarType::Vector)), operands: NONE },
    "subfn" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::FT(VarType::Normal)), operands: NONE },
    "subnf" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::TF(VarType::Normal)), operands: NONE },
    "subfc" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::FC), operands: NONE },
    "subcf" => OpInfo { code: Opcode::Arith(ArithOp::Sub, Shape::CF), operands: NONE },
    "mulff" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::FF), operands: NONE },
    "mulpp" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::TT(VarType::Point)), operands: NONE },
    "mulpv" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::TT(VarType::Point)), operands: NONE },
    "mulpn" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::TT(VarType::Point)), operands: NONE },
    "mulvp" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::TT(VarType::Vector)), operands: NONE },
    "mulvv" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::TT(VarType::Vector)), operands: NONE },
    "mulvn" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::TT(VarType::Vector)), operands: NONE },
    "mulnp" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::TT(VarType::Normal)), operands: NONE },
    "mulnv" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::TT(VarType::Normal)), operands: NONE },
    "mulnn" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::TT(VarType::Normal)), operands: NONE },
    "mulcc" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::CC), operands: NONE },
    "mulfp" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::FT(VarType::Point)), operands: NONE },
    "mulpf" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::TF(VarType::Point)), operands: NONE },
    "mulfv" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::FT(VarType::Vector)), operands: NONE },
    "mulvf" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::TF(VarType::Vector)), operands: NONE },
    "mulfn" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::FT(VarType::Normal)), operands: NONE },
    "mulnf" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::TF(VarType::Normal)), operands: NONE },
    "mulfc" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::FC), operands: NONE },
    "mulcf" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::CF), operands: NONE },
    "mulmm" => OpInfo { code: Opcode::Arith(ArithOp::Mul, Shape::MM), operands: NONE },
    "divff" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::FF), operands: NONE },
    "divpp" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::TT(VarType::Point)), operands: NONE },
    "divpv" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::TT(VarType::Point)), operands: NONE },
    "divpn" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::TT(VarType::Point)), operands: NONE },
    "divvp" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::TT(VarType::Vector)), operands: NONE },
    "divvv" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::TT(VarType::Vector)), operands: NONE },
    "divvn" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::TT(VarType::Vector)), operands: NONE },
    "divnp" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::TT(VarType::Normal)), operands: NONE },
    "divnv" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::TT(VarType::Normal)), operands: NONE },
    "divnn" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::TT(VarType::Normal)), operands: NONE },
    "divcc" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::CC), operands: NONE },
    "divfp" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::FT(VarType::Point)), operands: NONE },
    "divpf" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::TF(VarType::Point)), operands: NONE },
    "divfv" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::FT(VarType::Vector)), operands: NONE },
    "divvf" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::TF(VarType::Vector)), operands: NONE },
    "divfn" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::FT(VarType::Normal)), operands: NONE },
    "divnf" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::TF(VarType::Normal)), operands: NONE },
    "divfc" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::FC), operands: NONE },
    "divcf" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::CF), operands: NONE },
    "divmm" => OpInfo { code: Opcode::Arith(ArithOp::Div, Shape::MM), operands: NONE },
    "dotpp" => OpInfo { code: Opcode::Dot, operands: NONE },
    "crspp" => OpInfo { code: Opcode::Cross(VarType::Point), operands: NONE },
    "dotpv" => OpInfo { code: Opcode::Dot, operands: NONE },
    "crspv" => OpInfo { code: Opcode::Cross(VarType::Point), operands: NONE },
    "dotpn" => OpInfo { code: Opcode::Dot, operands: NONE },
    "crspn" => OpInfo { code: Opcode::Cross(VarType::Point), operands: NONE },
    "dotvp" => OpInfo { code: Opcode::Dot, operands: NONE },
    "crsvp" => OpInfo { code: Opcode::Cross(VarType::Vector), operands: NONE },
    "dotvv" => OpInfo { code: Opcode::Dot, operands: NONE },
    "crsvv" => OpInfo { code: Opcode::Cross(VarType::Vector), operands: NONE },
    "dotvn" => OpInfo { code: Opcode::Dot, operands: NONE },
    "crsvn" => OpInfo { code: Opcode::Cross(VarType::Vector), operands: NONE },
    "dotnp" => OpInfo { code: Opcode::Dot, operands: NONE },
    "crsnp" => OpInfo { code: Opcode::Cross(VarType::Normal), operands: NONE },
    "dotnv" => OpInfo { code: Opcode::Dot, operands: NONE },
    "crsnv" => OpInfo { code: Opcode::Cross(VarType::Normal), operands: NONE },
    "dotnn" => OpInfo { code: Opcode::Dot, operands: NONE },
    "crsnn" => OpInfo { code: Opcode::Cross(VarType::Normal), operands: NONE },
    "negf" => OpInfo { code: Opcode::Neg(VarType::Float), operands: NONE },
    "negp" => OpInfo { code: Opcode::Neg(VarType::Point), operands: NONE },
    "negv" => OpInfo { code: Opcode::Neg(VarType::Vector), operands: NONE },
    "negn" => OpInfo { code: Opcode::Neg(VarType::Normal), operands: NONE },
    "negc" => OpInfo { code: Opcode::Neg(VarType::Color), operands: NONE },
    "negm" => OpInfo { code: Opcode::Neg(VarType::Matrix), operands: NONE },
    "lsff" => OpInfo { code: Opcode::Compare(CmpOp::Ls, Shape::FF), operands: NONE },
    "gtff" => OpInfo { code: Opcode::Compare(CmpOp::Gt, Shape::FF), operands: NONE },
    "geff" => OpInfo { code: Opcode::Compare(CmpOp::Ge, Shape::FF), operands: NONE },
    "leff" => OpInfo { code: Opcode::Compare(CmpOp::Le, Shape::FF), operands: NONE },
    "eqff" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::FF), operands: NONE },
    "eqpp" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::TT(VarType::Point)), operands: NONE },
    "eqpv" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::TT(VarType::Point)), operands: NONE },
    "eqpn" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::TT(VarType::Point)), operands: NONE },
    "eqvp" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::TT(VarType::Vector)), operands: NONE },
    "eqvv" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::TT(VarType::Vector)), operands: NONE },
    "eqvn" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::TT(VarType::Vector)), operands: NONE },
    "eqnp" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::TT(VarType::Normal)), operands: NONE },
    "eqnv" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::TT(VarType::Normal)), operands: NONE },
    "eqnn" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::TT(VarType::Normal)), operands: NONE },
    "eqcc" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::CC), operands: NONE },
    "eqss" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::SS), operands: NONE },
    "eqmm" => OpInfo { code: Opcode::Compare(CmpOp::Eq, Shape::MM), operands: NONE },
    "neff" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::FF), operands: NONE },
    "nepp" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::TT(VarType::Point)), operands: NONE },
    "nepv" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::TT(VarType::Point)), operands: NONE },
    "nepn" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::TT(VarType::Point)), operands: NONE },
    "nevp" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::TT(VarType::Vector)), operands: NONE },
    "nevv" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::TT(VarType::Vector)), operands: NONE },
    "nevn" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::TT(VarType::Vector)), operands: NONE },
    "nenp" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::TT(VarType::Normal)), operands: NONE },
    "nenv" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::TT(VarType::Normal)), operands: NONE },
    "nenn" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::TT(VarType::Normal)), operands: NONE },
    "necc" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::CC), operands: NONE },
    "ness" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::SS), operands: NONE },
    "nemm" => OpInfo { code: Opcode::Compare(CmpOp::Ne, Shape::MM), operands: NONE },
    "land" => OpInfo { code: Opcode::And, operands: NONE },
    "lor" => OpInfo { code: Opcode::Or, operands: NONE },
    "lnot" => OpInfo { code: Opcode::Not, operands: NONE },
    "radians" => OpInfo { code: Opcode::Math(MathFn::Radians), operands: NONE },
    "degrees" => OpInfo { code: Opcode::Math(MathFn::Degrees), operands: NONE },
    "sin" => OpInfo { code: Opcode::Math(MathFn::Sin), operands: NONE },
    "asin" => OpInfo { code: Opcode::Math(MathFn::Asin), operands: NONE },
    "cos" => OpInfo { code: Opcode::Math(MathFn::Cos), operands: NONE },
    "acos" => OpInfo { code: Opcode::Math(MathFn::Acos), operands: NONE },
    "tan" => OpInfo { code: Opcode::Math(MathFn::Tan), operands: NONE },
    "atan" => OpInfo { code: Opcode::Math(MathFn::Atan), operands: NONE },
    "atan2" => OpInfo { code: Opcode::Math(MathFn::Atan2), operands: NONE },
    "sinh" => OpInfo { code: Opcode::Math(MathFn::Sinh), operands: NONE },
    "cosh" => OpInfo { code: Opcode::Math(MathFn::Cosh), operands: NONE },
    "tanh" => OpInfo { code: Opcode::Math(MathFn::Tanh), operands: NONE },
    "exp" => OpInfo { code: Opcode::Math(MathFn::Exp), operands: NONE },
    "sqrt" => OpInfo { code: Opcode::Math(MathFn::Sqrt), operands: NONE },
    "inversesqrt" => OpInfo { code: Opcode::Math(MathFn::InverseSqrt), operands: NONE },
    "log" => OpInfo { code: Opcode::Math(MathFn::Log), operands: NONE },
    "logb" => OpInfo { code: Opcode::Math(MathFn::LogB), operands: NONE },
    "abs" => OpInfo { code: Opcode::Math(MathFn::Abs), operands: NONE },
    "sign" => OpInfo { code: Opcode::Math(MathFn::Sign), operands: NONE },
    "floor" => OpInfo { code: Opcode::Math(MathFn::Floor), operands: NONE },
    "ceil" => OpInfo { code: Opcode::Math(MathFn::Ceil), operands: NONE },
    "round" => OpInfo { code: Opcode::Math(MathFn::Round), operands: NONE },
    "pow" => OpInfo { code: Opcode::Math(MathFn::Pow), operands: NONE },
    "mod" => OpInfo { code: Opcode::Math(MathFn::Mod), operands: NONE },
    "min" => OpInfo { code: Opcode::Math(MathFn::Min), operands: NONE },
    "max" => OpInfo { code: Opcode::Math(MathFn::Max), operands: NONE },
    "step" => OpInfo { code: Opcode::Math(MathFn::Step), operands: NONE },
    "clamp" => OpInfo { code: Opcode::Math(MathFn::Clamp), operands: NONE },
    "smoothstep" => OpInfo { code: Opcode::Math(MathFn::SmoothStep), operands: NONE },
    "mix" => OpInfo { code: Opcode::Math(MathFn::Mix), operands: NONE },
    "pmin" => OpInfo { code: Opcode::Math(MathFn::PMin), operands: NONE },
    "pmax" => OpInfo { code: Opcode::Math(MathFn::PMax), operands: NONE },
    "cmin" => OpInfo { code: Opcode::Math(MathFn::CMin), operands: NONE },
    "cmax" => OpInfo { code: Opcode::Math(MathFn::CMax), operands: NONE },
    "pclamp" => OpInfo { code: Opcode::Math(MathFn::PClamp), operands: NONE },
    "cclamp" => OpInfo { code: Opcode::Math(MathFn::CClamp), operands: NONE },
    "pmix" => OpInfo { code: Opcode::Math(MathFn::PMix), operands: NONE },
    "cmix" => OpInfo { code: Opcode::Math(MathFn::CMix), operands: NONE },
    "fspline" => OpInfo { code: Opcode::Math(MathFn::FSpline), operands: NONE },
    "cspline" => OpInfo { code: Opcode::Math(MathFn::CSpline), operands: NONE },
    "pspline" => OpInfo { code: Opcode::Math(MathFn::PSpline), operands: NONE },
    "xcomp" => OpInfo { code: Opcode::Geom(GeomFn::XComp), operands: NONE },
    "ycomp" => OpInfo { code: Opcode::Geom(GeomFn::YComp), operands: NONE },
    "zcomp" => OpInfo { code: Opcode::Geom(GeomFn::ZComp), operands: NONE },
    "setxcomp" => OpInfo { code: Opcode::Geom(GeomFn::SetXComp), operands: NONE },
    "setycomp" => OpInfo { code: Opcode::Geom(GeomFn::SetYComp), operands: NONE },
    "setzcomp" => OpInfo { code: Opcode::Geom(GeomFn::SetZComp), operands: NONE },
    "comp" => OpInfo { code: Opcode::Geom(GeomFn::Comp), operands: NONE },
    "setcomp" => OpInfo { code: Opcode::Geom(GeomFn::SetComp), operands: NONE },
    "length" => OpInfo { code: Opcode::Geom(GeomFn::Length), operands: NONE },
    "distance" => OpInfo { code: Opcode::Geom(GeomFn::Distance), operands: NONE },
    "normalize" => OpInfo { code: Opcode::Geom(GeomFn::Normalize), operands: NONE },
    "faceforward" => OpInfo { code: Opcode::Geom(GeomFn::FaceForward), operands: NONE },
    "faceforward2" => OpInfo { code: Opcode::Geom(GeomFn::FaceForward2), operands: NONE },
    "reflect" => OpInfo { code: Opcode::Geom(GeomFn::Reflect), operands: NONE },
    "refract" => OpInfo { code: Opcode::Geom(GeomFn::Refract), operands: NONE },
    "ptlined" => OpInfo { code: Opcode::Geom(GeomFn::PtLineD), operands: NONE },
    "mcomp" => OpInfo { code: Opcode::Geom(GeomFn::MComp), operands: NONE },
    "setmcomp" => OpInfo { code: Opcode::Geom(GeomFn::SetMComp), operands: NONE },
    "determinant" => OpInfo { code: Opcode::Geom(GeomFn::Determinant), operands: NONE },
    "transformm" => OpInfo { code: Opcode::Geom(GeomFn::TransformM), operands: NONE },
    "vtransformm" => OpInfo { code: Opcode::Geom(GeomFn::VTransformM), operands: NONE },
    "ntransformm" => OpInfo { code: Opcode::Geom(GeomFn::NTransformM), operands: NONE },
    "translate" => OpInfo { code: Opcode::Geom(GeomFn::Translate), operands: NONE },
    "scale" => OpInfo { code: Opcode::Geom(GeomFn::Scale), operands: NONE },
    "rotate" => OpInfo { code: Opcode::Geom(GeomFn::Rotate), operands: NONE },
    "concat" => OpInfo { code: Opcode::Str(StrFn::Concat), operands: NONE },
    "format" => OpInfo { code: Opcode::Str(StrFn::Format), operands: NONE },
    "printf" => OpInfo { code: Opcode::Str(StrFn::Printf), operands: NONE },
    "match" => OpInfo { code: Opcode::Str(StrFn::Match), operands: NONE },
    "transform" => OpInfo { code: Opcode::Bridge(BridgeFn::Transform { ty: VarType::Point, from: false }), operands: NONE },
    "transforms" => OpInfo { code: Opcode::Bridge(BridgeFn::Transform { ty: VarType::Point, from: true }), operands: NONE },
    "vtransform" => OpInfo { code: Opcode::Bridge(BridgeFn::Transform { ty: VarType::Vector, from: false }), operands: NONE },
    "vtransforms" => OpInfo { code: Opcode::Bridge(BridgeFn::Transform { ty: VarType::Vector, from: true }), operands: NONE },
    "ntransform" => OpInfo { code: Opcode::Bridge(BridgeFn::Transform { ty: VarType::Normal, from: false }), operands: NONE },
    "ntransforms" => OpInfo { code: Opcode::Bridge(BridgeFn::Transform { ty: VarType::Normal, from: true }), operands: NONE },
    "ctransform" => OpInfo { code: Opcode::Bridge(BridgeFn::CTransform { from: false }), operands: NONE },
    "ctransforms" => OpInfo { code: Opcode::Bridge(BridgeFn::CTransform { from: true }), operands: NONE },
    "depth" => OpInfo { code: Opcode::Bridge(BridgeFn::Depth), operands: NONE },
    "calculatenormal" => OpInfo { code: Opcode::Bridge(BridgeFn::CalculateNormal), operands: NONE },
    "area" => OpInfo { code: Opcode::Bridge(BridgeFn::Area), operands: NONE },
    "fDu" => OpInfo { code: Opcode::Bridge(BridgeFn::Du(VarType::Float)), operands: NONE },
    "fDv" => OpInfo { code: Opcode::Bridge(BridgeFn::Dv(VarType::Float)), operands: NONE },
    "fDeriv" => OpInfo { code: Opcode::Bridge(BridgeFn::Deriv(VarType::Float)), operands: NONE },
    "pDu" => OpInfo { code: Opcode::Bridge(BridgeFn::Du(VarType::Point)), operands: NONE },
    "pDv" => OpInfo { code: Opcode::Bridge(BridgeFn::Dv(VarType::Point)), operands: NONE },
    "pDeriv" => OpInfo { code: Opcode::Bridge(BridgeFn::Deriv(VarType::Point)), operands: NONE },
    "cDu" => OpInfo { code: Opcode::Bridge(BridgeFn::Du(VarType::Color)), operands: NONE },
    "cDv" => OpInfo { code: Opcode::Bridge(BridgeFn::Dv(VarType::Color)), operands: NONE },
    "cDeriv" => OpInfo { code: Opcode::Bridge(BridgeFn::Deriv(VarType::Color)), operands: NONE },
    "frandom" => OpInfo { code: Opcode::Bridge(BridgeFn::Random(VarType::Float)), operands: NONE },
    "crandom" => OpInfo { code: Opcode::Bridge(BridgeFn::Random(VarType::Color)), operands: NONE },
    "prandom" => OpInfo { code: Opcode::Bridge(BridgeFn::Random(VarType::Point)), operands: NONE },
    "fnoise1" => OpInfo { code: Opcode::Bridge(BridgeFn::Noise { ty: VarType::Float, dims: 1 }), operands: NONE },
    "fcellnoise1" => OpInfo { code: Opcode::Bridge(BridgeFn::CellNoise { ty: VarType::Float, dims: 1 }), operands: NONE },
    "fnoise2" => OpInfo { code: Opcode::Bridge(BridgeFn::Noise { ty: VarType::Float, dims: 2 }), operands: NONE },
    "fcellnoise2" => OpInfo { code: Opcode::Bridge(BridgeFn::CellNoise { ty: VarType::Float, dims: 2 }), operands: NONE },
    "fnoise3" => OpInfo { code: Opcode::Bridge(BridgeFn::Noise { ty: VarType::Float, dims: 3 }), operands: NONE },
    "fcellnoise3" => OpInfo { code: Opcode::Bridge(BridgeFn::CellNoise { ty: VarType::Float, dims: 3 }), operands: NONE },
    "fnoise4" => OpInfo { code: Opcode::Bridge(BridgeFn::Noise { ty: VarType::Float, dims: 4 }), operands: NONE },
    "fcellnoise4" => OpInfo { code: Opcode::Bridge(BridgeFn::CellNoise { ty: VarType::Float, dims: 4 }), operands: NONE },
    "cnoise1" => OpInfo { code: Opcode::Bridge(BridgeFn::Noise { ty: VarType::Color, dims: 1 }), operands: NONE },
    "ccellnoise1" => OpInfo { code: Opcode::Bridge(BridgeFn::CellNoise { ty: VarType::Color, dims: 1 }), operands: NONE },
    "cnoise2" => OpInfo { code: Opcode::Bridge(BridgeFn::Noise { ty: VarType::Color, dims: 2 }), operands: NONE },
    "ccellnoise2" => OpInfo { code: Opcode::Bridge(BridgeFn::CellNoise { ty: VarType::Color, dims: 2 }), operands: NONE },
    "cnoise3" => OpInfo { code: Opcode::Bridge(BridgeFn::Noise { ty: VarType::Color, dims: 3 }), operands: NONE },
    "ccellnoise3" => OpInfo { code: Opcode::Bridge(BridgeFn::CellNoise { ty: VarType::Color, dims: 3 }), operands: NONE },
    "cnoise4" => OpInfo { code: Opcode::Bridge(BridgeFn::Noise { ty: VarType::Color, dims: 4 }), operands: NONE },
    "ccellnoise4" => OpInfo { code: Opcode::Bridge(BridgeFn::CellNoise { ty: VarType::Color, dims: 4 }), operands: NONE },
    "pnoise1" => OpInfo { code: Opcode::Bridge(BridgeFn::Noise { ty: VarType::Point, dims: 1 }), operands: NONE },
    "pcellnoise1" => OpInfo { code: Opcode::Bridge(BridgeFn::CellNoise { ty: VarType::Point, dims: 1 }), operands: NONE },
    "pnoise2" => OpInfo { code: Opcode::Bridge(BridgeFn::Noise { ty: VarType::Point, dims: 2 }), operands: NONE },
    "pcellnoise2" => OpInfo { code: Opcode::Bridge(BridgeFn::CellNoise { ty: VarType::Point, dims: 2 }), operands: NONE },
    "pnoise3" => OpInfo { code: Opcode::Bridge(BridgeFn::Noise { ty: VarType::Point, dims: 3 }), operands: NONE },
    "pcellnoise3" => OpInfo { code: Opcode::Bridge(BridgeFn::CellNoise { ty: VarType::Point, dims: 3 }), operands: NONE },
    "pnoise4" => OpInfo { code: Opcode::Bridge(BridgeFn::Noise { ty: VarType::Point, dims: 4 }), operands: NONE },
    "pcellnoise4" => OpInfo { code: Opcode::Bridge(BridgeFn::CellNoise { ty: VarType::Point, dims: 4 }), operands: NONE },
    "ambient" => OpInfo { code: Opcode::Bridge(BridgeFn::Ambient), operands: NONE },
    "diffuse" => OpInfo { code: Opcode::Bridge(BridgeFn::Diffuse), operands: NONE },
    "specular" => OpInfo { code: Opcode::Bridge(BridgeFn::Specular), operands: NONE },
    "phong" => OpInfo { code: Opcode::Bridge(BridgeFn::Phong), operands: NONE },
    "ftexture1" => OpInfo { code: Opcode::Bridge(BridgeFn::Texture { ty: VarType::Float, two_coords: false }), operands: NONE },
    "ftexture2" => OpInfo { code: Opcode::Bridge(BridgeFn::Texture { ty: VarType::Float, two_coords: true }), operands: NONE },
    "fenvironment2" => OpInfo { code: Opcode::Bridge(BridgeFn::Environment(VarType::Float)), operands: NONE },
    "ctexture1" => OpInfo { code: Opcode::Bridge(BridgeFn::Texture { ty: VarType::Color, two_coords: false }), operands: NONE },
    "ctexture2" => OpInfo { code: Opcode::Bridge(BridgeFn::Texture { ty: VarType::Color, two_coords: true }), operands: NONE },
    "cenvironment2" => OpInfo { code: Opcode::Bridge(BridgeFn::Environment(VarType::Color)), operands: NONE },
    "shadow" => OpInfo { code: Opcode::Bridge(BridgeFn::Shadow), operands: NONE },
    "trace" => OpInfo { code: Opcode::Bridge(BridgeFn::Trace), operands: NONE },
    "attribute" => OpInfo { code: Opcode::Bridge(BridgeFn::Attribute), operands: V },
    "option" => OpInfo { code: Opcode::Bridge(BridgeFn::Option), operands: V },
    "init_illuminance" => OpInfo { code: Opcode::Illum(IllumFn::Init), operands: NONE },
    "init_illuminance2" => OpInfo { code: Opcode::Illum(IllumFn::InitCategory), operands: NONE },
    "advance_illuminance" => OpInfo { code: Opcode::Illum(IllumFn::Advance), operands: NONE },
    "illuminance" => OpInfo { code: Opcode::Illum(IllumFn::Illuminance), operands: NONE },
    "illuminance2" => OpInfo { code: Opcode::Illum(IllumFn::IlluminanceCategory), operands: NONE },
    "illuminate" => OpInfo { code: Opcode::Illum(IllumFn::Illuminate), operands: NONE },
    "illuminate2" => OpInfo { code: Opcode::Illum(IllumFn::IlluminateAll), operands: NONE },
    "solar" => OpInfo { code: Opcode::Illum(IllumFn::Solar), operands: NONE },
    "solar2" => OpInfo { code: Opcode::Illum(IllumFn::SolarAll), operands: NONE },
    "RS_PUSH" => OpInfo { code: Opcode::Flow(FlowOp::RsPush), operands: NONE },
    "RS_POP" => OpInfo { code: Opcode::Flow(FlowOp::RsPop), operands: NONE },
    "RS_GET" => OpInfo { code: Opcode::Flow(FlowOp::RsGet), operands: NONE },
    "RS_INVERSE" => OpInfo { code: Opcode::Flow(FlowOp::RsInverse), operands: NONE },
    "S_CLEAR" => OpInfo { code: Opcode::Flow(FlowOp::SClear), operands: NONE },
    "S_GET" => OpInfo { code: Opcode::Flow(FlowOp::SGet), operands: NONE },
    "S_JZ" => OpInfo { code: Opcode::Flow(FlowOp::SJz), operands: L },
    "S_JNZ" => OpInfo { code: Opcode::Flow(FlowOp::SJnz), operands: L },
    "RS_JZ" => OpInfo { code: Opcode::Flow(FlowOp::RsJz), operands: L },
    "RS_JNZ" => OpInfo { code: Opcode::Flow(FlowOp::RsJnz), operands: L },
    "jz" => OpInfo { code: Opcode::Flow(FlowOp::Jz), operands: L },
    "jnz" => OpInfo { code: Opcode::Flow(FlowOp::Jnz), operands: L },
    "jmp" => OpInfo { code: Opcode::Flow(FlowOp::Jmp), operands: L },
};

/// Look up a mnemonic, returning the table's own key so program elements can
/// hold a `&'static str`.
pub fn lookup_opcode(name: &str) -> Option<(&'static str, &'static OpInfo)> {
    OPCODES.get_entry(name).map(|(k, v)| (*k, v))
}

pub fn mnemonics() -> impl Iterator<Item = &'static str> {
    OPCODES.keys().copied()
}
