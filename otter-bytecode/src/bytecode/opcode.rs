/// A single bytecode instruction's opcode.
///
/// Discriminants are part of the on-disk format and must not change.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum OpCode
{
    /// Push constant at the 1-byte operand index.
    Const       = 0,
    Nil         = 1,
    True        = 2,
    False       = 3,
    Pop         = 4,
    /// Push local at the 1-byte stack-slot operand.
    GetLocal    = 5,
    /// Pop and store into the local at the 1-byte stack-slot operand.
    SetLocal    = 6,
    Equal       = 7,
    Greater     = 8,
    Less        = 9,
    Add         = 10,
    Subtract    = 11,
    Multiply    = 12,
    Divide      = 13,
    Not         = 14,
    Negate      = 15,
    Print       = 16,
    /// Unconditional forward jump by the 2-byte big-endian operand.
    Jump        = 17,
    /// Pop; jump forward by the 2-byte big-endian operand if falsy.
    JumpIfFalse = 18,
    /// Unconditional backward jump by the 2-byte big-endian operand.
    Loop        = 19,
    Return      = 20,
}

impl OpCode
{
    /// Look up the opcode for a raw byte, if it names one.
    pub fn from_byte(byte: u8) -> Option<Self>
    {
        Some(match byte {
            0  => Self::Const,
            1  => Self::Nil,
            2  => Self::True,
            3  => Self::False,
            4  => Self::Pop,
            5  => Self::GetLocal,
            6  => Self::SetLocal,
            7  => Self::Equal,
            8  => Self::Greater,
            9  => Self::Less,
            10 => Self::Add,
            11 => Self::Subtract,
            12 => Self::Multiply,
            13 => Self::Divide,
            14 => Self::Not,
            15 => Self::Negate,
            16 => Self::Print,
            17 => Self::Jump,
            18 => Self::JumpIfFalse,
            19 => Self::Loop,
            20 => Self::Return,
            _  => return None,
        })
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn every_discriminant_round_trips_through_from_byte()
    {
        for opcode in [
            OpCode::Const, OpCode::Nil, OpCode::True, OpCode::False, OpCode::Pop,
            OpCode::GetLocal, OpCode::SetLocal, OpCode::Equal, OpCode::Greater, OpCode::Less,
            OpCode::Add, OpCode::Subtract, OpCode::Multiply, OpCode::Divide,
            OpCode::Not, OpCode::Negate, OpCode::Print,
            OpCode::Jump, OpCode::JumpIfFalse, OpCode::Loop, OpCode::Return,
        ] {
            assert_eq!(OpCode::from_byte(opcode as u8), Some(opcode));
        }
    }

    #[test]
    fn unknown_byte_is_none()
    {
        assert_eq!(OpCode::from_byte(0xff), None);
    }
}
