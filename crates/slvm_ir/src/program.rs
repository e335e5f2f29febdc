use crate::kind::ShaderKind;
use crate::opcode::OpInfo;
use crate::stdvar::{StdVar, UsesMask};
use slvm_core::{VarClass, VarType};

/// Variable operand: a declared local or a standard variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VarRef {
    Local(usize),
    Std(StdVar),
}

/// A resolved jump target. `position` indexes the segment's element list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Label {
    pub id: u32,
    pub position: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProgramElement {
    Op {
        name: &'static str,
        info: &'static OpInfo,
    },
    Float(f32),
    Str(String),
    Var(VarRef),
    Label(Label),
    /// Placeholder between the loader's two passes. Never executed.
    UnresolvedLabel(u32),
}

impl ProgramElement {
    pub fn describe(&self) -> &'static str {
        match self {
            ProgramElement::Op { .. } => "opcode",
            ProgramElement::Float(_) => "float",
            ProgramElement::Str(_) => "string",
            ProgramElement::Var(_) => "variable",
            ProgramElement::Label(_) => "label",
            ProgramElement::UnresolvedLabel(_) => "unresolved label",
        }
    }
}

/// A declaration from the Data segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalDecl {
    pub name: String,
    pub ty: VarType,
    pub class: VarClass,
    pub param: bool,
    pub output: bool,
    pub array_len: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Init,
    Code,
}

impl SegmentKind {
    pub fn name(self) -> &'static str {
        match self {
            SegmentKind::Init => "Init",
            SegmentKind::Code => "Code",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Segment {
    pub elements: Vec<ProgramElement>,
    /// Every label defined in the segment, in definition order.
    pub labels: Vec<Label>,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn label(&self, id: u32) -> Option<Label> {
        self.labels.iter().copied().find(|l| l.id == id)
    }

    /// Number of opcode elements.
    pub fn instruction_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, ProgramElement::Op { .. }))
            .count()
    }
}

/// A loaded shading program. Read-only once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub kind: ShaderKind,
    pub version: String,
    pub uses: UsesMask,
    pub locals: Vec<LocalDecl>,
    pub init: Segment,
    pub code: Segment,
}

impl Program {
    pub fn new(kind: ShaderKind) -> Self {
        Self {
            kind,
            version: String::new(),
            uses: UsesMask::default(),
            locals: Vec::new(),
            init: Segment::default(),
            code: Segment::default(),
        }
    }

    pub fn segment(&self, kind: SegmentKind) -> &Segment {
        match kind {
            SegmentKind::Init => &self.init,
            SegmentKind::Code => &self.code,
        }
    }

    pub fn segment_mut(&mut self, kind: SegmentKind) -> &mut Segment {
        match kind {
            SegmentKind::Init => &mut self.init,
            SegmentKind::Code => &mut self.code,
        }
    }

    pub fn local_index(&self, name: &str) -> Option<usize> {
        self.locals.iter().position(|l| l.name == name)
    }

    pub fn params(&self) -> impl Iterator<Item = &LocalDecl> {
        self.locals.iter().filter(|l| l.param)
    }
}
