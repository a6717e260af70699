//! Function descriptors - the callable surface an extension exposes.
//!
//! Native and script functions share a common prefix on the wire but are
//! distinct entities: a library of kind "native" holds only
//! [`NativeFunction`] entries and one of kind "script" only
//! [`ScriptFunction`] entries.
//!
//! ## Layout (dialect 700)
//! ```text
//! revision:i32
//! name:str  symbol:str  invokeType:i32  helpLine:str  hidden:i32
//! argCount:i32  argType[17]:i32  resultType:i32
//! ```
//!
//! The argument-type array always spans 17 slots; only the first
//! `argCount` (at most 16) carry meaning, the 17th is dead weight kept
//! for wire compatibility. Script functions write `invokeType` = 2 and
//! argument/result types of 2 across the board, and readers ignore all
//! of them; a script `argCount` of -1 marks a function accepting any
//! number of arguments.

use std::io::{Read, Write};

use crate::entry::{REVISION_DEFAULT, expect_revision, write_revision};
use crate::utils::{
    AnsiString, ansi_str, le_bool, le_i32, write_ansi_str, write_ansi_str_or, write_le_bool,
    write_le_i32,
};
use crate::{Error, Result};

/// Most arguments a function can declare.
pub const MAX_ARGS: usize = 16;

/// Wire slots in the argument-type array (one more than [`MAX_ARGS`];
/// the extra slot is carried for wire compatibility and never used).
pub const ARG_SLOTS: usize = 17;

/// Calling convention of a native function.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CallConv {
    #[default]
    Stdcall = 11,
    Cdecl = 12,
}

impl TryFrom<i32> for CallConv {
    type Error = Error;
    fn try_from(v: i32) -> Result<Self> {
        match v {
            11 => Ok(Self::Stdcall),
            12 => Ok(Self::Cdecl),
            _ => Err(Error::Parse("invalid calling convention")),
        }
    }
}

/// GameMaker value type of an argument or result.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ValueType {
    String = 1,
    #[default]
    Real = 2,
}

impl TryFrom<i32> for ValueType {
    type Error = Error;
    fn try_from(v: i32) -> Result<Self> {
        match v {
            1 => Ok(Self::String),
            2 => Ok(Self::Real),
            _ => Err(Error::Parse("invalid value type")),
        }
    }
}

/// A function exported by a native (DLL) library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeFunction {
    /// Name visible to game code.
    pub name: AnsiString,
    /// Exported symbol to bind; empty means "use [`name`](Self::name)".
    pub symbol: AnsiString,
    pub call_conv: CallConv,
    /// One-line description shown by the IDE's code completion.
    pub help_line: AnsiString,
    pub hidden: bool,
    /// Declared argument count, 0..=[`MAX_ARGS`].
    pub arg_count: u8,
    /// Per-argument value types; slots past `arg_count` are padding.
    pub arg_types: [ValueType; ARG_SLOTS],
    pub result_type: ValueType,
}

impl Default for NativeFunction {
    fn default() -> Self {
        Self {
            name: AnsiString::new(),
            symbol: AnsiString::new(),
            call_conv: CallConv::default(),
            help_line: AnsiString::new(),
            hidden: false,
            arg_count: 0,
            arg_types: [ValueType::default(); ARG_SLOTS],
            result_type: ValueType::default(),
        }
    }
}

impl NativeFunction {
    /// Parse a full function entry (revision prefix included) from `r`.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        expect_revision(r, REVISION_DEFAULT)?;
        let name = ansi_str(r)?;
        let symbol = ansi_str(r)?;
        let call_conv = CallConv::try_from(le_i32(r)?)?;
        let help_line = ansi_str(r)?;
        let hidden = le_bool(r)?;
        let arg_count = read_arg_count(r)?.ok_or(Error::Parse(
            "native functions cannot take a variable argument count",
        ))?;
        let mut arg_types = [ValueType::default(); ARG_SLOTS];
        for slot in &mut arg_types {
            *slot = ValueType::try_from(le_i32(r)?)?;
        }
        let result_type = ValueType::try_from(le_i32(r)?)?;
        Ok(Self {
            name,
            symbol,
            call_conv,
            help_line,
            hidden,
            arg_count,
            arg_types,
            result_type,
        })
    }

    /// Write a full function entry to `w`.
    pub fn write_to<W: Write>(&self, w: &mut W, optimize: bool) -> Result<()> {
        write_revision(w, REVISION_DEFAULT, optimize)?;
        write_ansi_str(w, &self.name)?;
        write_common(
            w,
            optimize,
            &self.name,
            &self.symbol,
            self.call_conv as i32,
            &self.help_line,
            self.hidden,
        )?;
        write_le_i32(w, self.arg_count as i32)?;
        for slot in &self.arg_types {
            write_le_i32(w, *slot as i32)?;
        }
        write_le_i32(w, self.result_type as i32)
    }
}

/// A function implemented as a GML script library entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScriptFunction {
    pub name: AnsiString,
    /// Script name to bind; empty means "use [`name`](Self::name)".
    pub symbol: AnsiString,
    pub help_line: AnsiString,
    pub hidden: bool,
    /// Accepts any number of arguments (stored as -1 on the wire).
    pub any_arity: bool,
    /// Declared argument count; 0 when [`any_arity`](Self::any_arity).
    pub arg_count: u8,
}

impl ScriptFunction {
    /// Parse a full function entry (revision prefix included) from `r`.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        expect_revision(r, REVISION_DEFAULT)?;
        let name = ansi_str(r)?;
        let symbol = ansi_str(r)?;
        // Always written as 2, but a GM8-bundled extension ships another
        // value here, so anything is accepted.
        let _invoke = le_i32(r)?;
        let help_line = ansi_str(r)?;
        let hidden = le_bool(r)?;
        let (any_arity, arg_count) = match read_arg_count(r)? {
            None => (true, 0),
            Some(n) => (false, n),
        };
        for _ in 0..ARG_SLOTS {
            let _ignored = le_i32(r)?;
        }
        let _result = le_i32(r)?;
        Ok(Self {
            name,
            symbol,
            help_line,
            hidden,
            any_arity,
            arg_count,
        })
    }

    /// Write a full function entry to `w`.
    pub fn write_to<W: Write>(&self, w: &mut W, optimize: bool) -> Result<()> {
        write_revision(w, REVISION_DEFAULT, optimize)?;
        write_ansi_str(w, &self.name)?;
        write_common(
            w,
            optimize,
            &self.name,
            &self.symbol,
            2,
            &self.help_line,
            self.hidden,
        )?;
        let wire_count = if self.any_arity {
            -1
        } else {
            self.arg_count as i32
        };
        write_le_i32(w, wire_count)?;
        for _ in 0..ARG_SLOTS {
            write_le_i32(w, ValueType::Real as i32)?;
        }
        write_le_i32(w, ValueType::Real as i32)
    }
}

/// Argument count field: `None` for the any-arity marker -1, otherwise a
/// count within 0..=[`MAX_ARGS`].
fn read_arg_count<R: Read>(r: &mut R) -> Result<Option<u8>> {
    match le_i32(r)? {
        -1 => Ok(None),
        n if (0..=MAX_ARGS as i32).contains(&n) => Ok(Some(n as u8)),
        _ => Err(Error::Parse("argument count out of range")),
    }
}

/// The fields both function flavors share past the name, with the
/// optimize elisions (symbol when it merely repeats the name, help line
/// when the function is hidden anyway).
fn write_common<W: Write>(
    w: &mut W,
    optimize: bool,
    name: &AnsiString,
    symbol: &AnsiString,
    invoke: i32,
    help_line: &AnsiString,
    hidden: bool,
) -> Result<()> {
    let empty = AnsiString::new();
    write_ansi_str_or(w, optimize && symbol == name, &empty, symbol)?;
    write_le_i32(w, invoke)?;
    write_ansi_str_or(w, optimize && hidden, &empty, help_line)?;
    write_le_bool(w, hidden)
}
