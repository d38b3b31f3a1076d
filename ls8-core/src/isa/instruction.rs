use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum OperandDef<'a> {
    /// Literal value encoded in the instruction stream.
    ImmediateConstant { pattern: &'a str },
    /// Index into the general-purpose register file.
    Register { pattern: &'a str, format: &'a str },
}

impl<'a> OperandDef<'a> {
    pub fn pattern(&self) -> &'a str {
        match self {
            OperandDef::ImmediateConstant { pattern, .. } => pattern,
            OperandDef::Register { pattern, .. } => pattern,
        }
    }

    fn format_value(&self, value: u8) -> String {
        match self {
            OperandDef::ImmediateConstant { .. } => format!("{}", value),
            OperandDef::Register { format, pattern } => format.replace(pattern, &value.to_string()),
        }
    }
}

impl<'a> fmt::Display for OperandDef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

pub struct InstructionDef<'a> {
    mnemonic: &'a str,
    opcode: u8,
    operands: &'a [OperandDef<'a>],
}

impl<'a> InstructionDef<'a> {
    pub const fn new(mnemonic: &'a str, opcode: u8, operands: &'a [OperandDef<'a>]) -> Self {
        Self {
            mnemonic,
            opcode,
            operands,
        }
    }

    pub fn mnemonic(&self) -> &'a str {
        self.mnemonic
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    pub fn operands(&self) -> &'a [OperandDef<'a>] {
        self.operands
    }

    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }

    /// Total encoded length: the opcode byte plus one byte per operand.
    pub fn len_bytes(&self) -> usize {
        1 + self.operand_count()
    }

    pub fn decode(&'a self, address: usize, bytes: &[u8]) -> Instruction<'a> {
        let end = self.operand_count().min(bytes.len());
        Instruction::new(address, &bytes[..end], self)
    }
}

impl<'a> fmt::Debug for InstructionDef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstructionDef")
            .field("mnemonic", &self.mnemonic)
            .field("opcode", &format_args!("0x{:02X}", self.opcode))
            .field("operands", &self.operands)
            .finish()
    }
}

impl<'a> fmt::Display for InstructionDef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands: Vec<String> = self.operands.iter().map(|op| op.to_string()).collect();
        if operands.is_empty() {
            f.write_str(self.mnemonic)
        } else {
            write!(f, "{} {}", self.mnemonic, operands.join(", "))
        }
    }
}

/// An instruction decoded at a particular address, with its operand bytes.
pub struct Instruction<'a> {
    address: usize,
    operands: Vec<u8>,
    def: &'a InstructionDef<'a>,
}

impl<'a> Instruction<'a> {
    pub fn new(address: usize, operands: &[u8], def: &'a InstructionDef<'a>) -> Self {
        Self {
            address,
            operands: Vec::from(operands),
            def,
        }
    }

    pub fn address(&self) -> usize {
        self.address
    }

    pub fn def(&self) -> &'a InstructionDef<'a> {
        self.def
    }

    pub fn operands(&self) -> &[u8] {
        &self.operands
    }

    pub fn len_bytes(&self) -> usize {
        self.def.len_bytes()
    }
}

impl<'a> fmt::Debug for Instruction<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("address", &self.address)
            .field("operands", &self.operands)
            .field("def", &self.def)
            .finish()
    }
}

impl<'a> fmt::Display for Instruction<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Operands missing from a truncated image are shown as the template.
        let operands: Vec<String> = self
            .def
            .operands
            .iter()
            .enumerate()
            .map(|(idx, op)| match self.operands.get(idx) {
                Some(value) => op.format_value(*value),
                None => op.to_string(),
            })
            .collect();
        if operands.is_empty() {
            f.write_str(self.def.mnemonic)
        } else {
            write!(f, "{} {}", self.def.mnemonic, operands.join(", "))
        }
    }
}
