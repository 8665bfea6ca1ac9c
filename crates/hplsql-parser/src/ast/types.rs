//! Data type definitions.

use core::fmt;

use super::expression::{Expr, Ident};

/// Built-in type names, plus user-named and anchored types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    Bigint,
    BinaryDouble,
    BinaryFloat,
    BinaryInteger,
    Bit,
    Char,
    Date,
    Datetime,
    Dec,
    Decimal,
    Double,
    /// `DOUBLE PRECISION`
    DoublePrecision,
    Float,
    Int,
    Int2,
    Int4,
    Int8,
    Integer,
    Nchar,
    Number,
    Numeric,
    Nvarchar,
    PlsInteger,
    Real,
    /// `RESULT_SET_LOCATOR VARYING`
    ResultSetLocator,
    SimpleDouble,
    SimpleFloat,
    SimpleInteger,
    Smalldatetime,
    Smallint,
    String,
    SysRefcursor,
    Timestamp,
    Tinyint,
    Varchar,
    Varchar2,
    Xml,
    /// A type outside the catalogue, optionally anchored to another object.
    Named {
        name: Ident,
        anchor: Option<TypeAnchor>,
    },
}

impl TypeName {
    /// Returns the SQL spelling of a built-in type, or `None` for named types.
    #[must_use]
    pub const fn builtin_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Bigint => "BIGINT",
            Self::BinaryDouble => "BINARY_DOUBLE",
            Self::BinaryFloat => "BINARY_FLOAT",
            Self::BinaryInteger => "BINARY_INTEGER",
            Self::Bit => "BIT",
            Self::Char => "CHAR",
            Self::Date => "DATE",
            Self::Datetime => "DATETIME",
            Self::Dec => "DEC",
            Self::Decimal => "DECIMAL",
            Self::Double => "DOUBLE",
            Self::DoublePrecision => "DOUBLE PRECISION",
            Self::Float => "FLOAT",
            Self::Int => "INT",
            Self::Int2 => "INT2",
            Self::Int4 => "INT4",
            Self::Int8 => "INT8",
            Self::Integer => "INTEGER",
            Self::Nchar => "NCHAR",
            Self::Number => "NUMBER",
            Self::Numeric => "NUMERIC",
            Self::Nvarchar => "NVARCHAR",
            Self::PlsInteger => "PLS_INTEGER",
            Self::Real => "REAL",
            Self::ResultSetLocator => "RESULT_SET_LOCATOR VARYING",
            Self::SimpleDouble => "SIMPLE_DOUBLE",
            Self::SimpleFloat => "SIMPLE_FLOAT",
            Self::SimpleInteger => "SIMPLE_INTEGER",
            Self::Smalldatetime => "SMALLDATETIME",
            Self::Smallint => "SMALLINT",
            Self::String => "STRING",
            Self::SysRefcursor => "SYS_REFCURSOR",
            Self::Timestamp => "TIMESTAMP",
            Self::Tinyint => "TINYINT",
            Self::Varchar => "VARCHAR",
            Self::Varchar2 => "VARCHAR2",
            Self::Xml => "XML",
            Self::Named { .. } => return None,
        };
        Some(name)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, anchor } => {
                write!(f, "{name}")?;
                match anchor {
                    Some(TypeAnchor::Type) => f.write_str("%TYPE"),
                    Some(TypeAnchor::RowType) => f.write_str("%ROWTYPE"),
                    None => Ok(()),
                }
            }
            builtin => f.write_str(builtin.builtin_name().unwrap_or_default()),
        }
    }
}

/// `%TYPE` / `%ROWTYPE` anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeAnchor {
    Type,
    RowType,
}

/// The size part of a length clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthValue {
    Number(i64),
    Max,
}

/// Length semantics of a character type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Char,
    Byte,
}

/// `( n | MAX [CHAR|BYTE] [, scale] )`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeLength {
    pub size: LengthValue,
    pub unit: Option<LengthUnit>,
    pub scale: Option<i64>,
}

impl fmt::Display for TypeLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size {
            LengthValue::Number(n) => write!(f, "({n}")?,
            LengthValue::Max => f.write_str("(MAX")?,
        }
        match self.unit {
            Some(LengthUnit::Char) => f.write_str(" CHAR")?,
            Some(LengthUnit::Byte) => f.write_str(" BYTE")?,
            None => {}
        }
        if let Some(scale) = self.scale {
            write!(f, ", {scale}")?;
        }
        f.write_str(")")
    }
}

/// A data type with its optional length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataType {
    pub name: TypeName,
    pub length: Option<TypeLength>,
}

impl DataType {
    /// Creates a type without a length clause.
    #[must_use]
    pub const fn new(name: TypeName) -> Self {
        Self { name, length: None }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(length) = &self.length {
            write!(f, "{length}")?;
        }
        Ok(())
    }
}

/// Attributes that may follow a data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeAttr {
    Null,
    NotNull,
    CharacterSet(Ident),
    /// `[NOT] CASESPECIFIC` or `[NOT] CS`
    CaseSpecific { negated: bool },
}

/// Default value clause of a declaration or column.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// `:= expr` or `= expr`
    Assign(Expr),
    /// `[WITH] DEFAULT [expr]`
    Default(Option<Expr>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_display() {
        let dt = DataType {
            name: TypeName::Varchar2,
            length: Some(TypeLength {
                size: LengthValue::Number(100),
                unit: Some(LengthUnit::Char),
                scale: None,
            }),
        };
        assert_eq!(dt.to_string(), "VARCHAR2(100 CHAR)");

        let dec = DataType {
            name: TypeName::Decimal,
            length: Some(TypeLength {
                size: LengthValue::Number(10),
                unit: None,
                scale: Some(2),
            }),
        };
        assert_eq!(dec.to_string(), "DECIMAL(10, 2)");
    }

    #[test]
    fn test_anchored_type_display() {
        let anchored = TypeName::Named {
            name: Ident::from_parts(vec!["emp".into(), "salary".into()]),
            anchor: Some(TypeAnchor::Type),
        };
        assert_eq!(anchored.to_string(), "emp.salary%TYPE");
        assert_eq!(anchored.builtin_name(), None);
        assert_eq!(TypeName::DoublePrecision.to_string(), "DOUBLE PRECISION");
    }
}
