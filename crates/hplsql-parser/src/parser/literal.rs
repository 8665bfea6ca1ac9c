//! Literals, data types, type attributes and default clauses.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    DataType, DefaultValue, Literal, LengthUnit, LengthValue, TypeAnchor, TypeAttr, TypeLength,
    TypeName,
};
use crate::lexer::{Keyword, TokenKind};

/// Maps a keyword to the built-in type it names.
const fn builtin_type(keyword: Keyword) -> Option<TypeName> {
    let name = match keyword {
        Keyword::Bigint => TypeName::Bigint,
        Keyword::BinaryDouble => TypeName::BinaryDouble,
        Keyword::BinaryFloat => TypeName::BinaryFloat,
        Keyword::BinaryInteger => TypeName::BinaryInteger,
        Keyword::Bit => TypeName::Bit,
        Keyword::Char => TypeName::Char,
        Keyword::Date => TypeName::Date,
        Keyword::Datetime => TypeName::Datetime,
        Keyword::Dec => TypeName::Dec,
        Keyword::Decimal => TypeName::Decimal,
        Keyword::Float => TypeName::Float,
        Keyword::Int => TypeName::Int,
        Keyword::Int2 => TypeName::Int2,
        Keyword::Int4 => TypeName::Int4,
        Keyword::Int8 => TypeName::Int8,
        Keyword::Integer => TypeName::Integer,
        Keyword::Nchar => TypeName::Nchar,
        Keyword::Number => TypeName::Number,
        Keyword::Numeric => TypeName::Numeric,
        Keyword::Nvarchar => TypeName::Nvarchar,
        Keyword::PlsInteger => TypeName::PlsInteger,
        Keyword::Real => TypeName::Real,
        Keyword::SimpleDouble => TypeName::SimpleDouble,
        Keyword::SimpleFloat => TypeName::SimpleFloat,
        Keyword::SimpleInteger => TypeName::SimpleInteger,
        Keyword::Smalldatetime => TypeName::Smalldatetime,
        Keyword::Smallint => TypeName::Smallint,
        Keyword::String => TypeName::String,
        Keyword::SysRefcursor => TypeName::SysRefcursor,
        Keyword::Timestamp => TypeName::Timestamp,
        Keyword::Tinyint => TypeName::Tinyint,
        Keyword::Varchar => TypeName::Varchar,
        Keyword::Varchar2 => TypeName::Varchar2,
        Keyword::Xml => TypeName::Xml,
        _ => return None,
    };
    Some(name)
}

impl Parser {
    /// Consumes a literal if one starts at the cursor.
    ///
    /// A `+` directly before a number folds into the literal.
    pub(crate) fn try_literal(&mut self) -> Option<Literal> {
        let literal = match self.current().kind.clone() {
            TokenKind::Integer(n) => Literal::Integer(n),
            TokenKind::Decimal(d) => Literal::Decimal(d),
            TokenKind::String(s) => Literal::String(s),
            TokenKind::DoubleQuotedString(s) => Literal::DoubleQuoted(s),
            TokenKind::Keyword(Keyword::True) => Literal::Boolean(true),
            TokenKind::Keyword(Keyword::False) => Literal::Boolean(false),
            TokenKind::Keyword(Keyword::Null) => Literal::Null,
            TokenKind::Keyword(kw @ (Keyword::Date | Keyword::Timestamp)) => {
                let TokenKind::String(value) = &self.peek_nth(1).kind else {
                    return None;
                };
                let literal = if kw == Keyword::Date {
                    Literal::Date(value.clone())
                } else {
                    Literal::Timestamp(value.clone())
                };
                self.advance();
                literal
            }
            TokenKind::Plus => {
                let literal = match &self.peek_nth(1).kind {
                    TokenKind::Integer(n) => Literal::Integer(*n),
                    TokenKind::Decimal(d) => Literal::Decimal(d.clone()),
                    _ => return None,
                };
                self.advance();
                literal
            }
            _ => return None,
        };
        self.advance();
        Some(literal)
    }

    /// Parses an optionally negative integer.
    pub(crate) fn parse_int_literal(&mut self) -> Result<i64, ParseError> {
        let negative = self.check(&TokenKind::Minus)
            && matches!(self.peek_nth(1).kind, TokenKind::Integer(_));
        if negative {
            self.advance();
        }
        match self.current().kind {
            TokenKind::Integer(n) => {
                self.advance();
                Ok(if negative { -n } else { n })
            }
            _ => Err(self.error_here(&["integer"])),
        }
    }

    /// Parses a data type with its optional length clause.
    ///
    /// # Errors
    ///
    /// Returns an error if no type name is found or the length clause is
    /// malformed.
    pub fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let name = self.parse_type_name()?;
        let length = self.parse_type_length()?;
        Ok(DataType { name, length })
    }

    fn parse_type_name(&mut self) -> Result<TypeName, ParseError> {
        let qualified = self.check_nth(1, &TokenKind::Dot) || self.check_nth(1, &TokenKind::Percent);
        match self.current().as_keyword() {
            Some(Keyword::Double) if !qualified => {
                self.advance();
                if self.eat_keyword(Keyword::Precision) {
                    return Ok(TypeName::DoublePrecision);
                }
                return Ok(TypeName::Double);
            }
            Some(Keyword::ResultSetLocator) if self.check_keyword_nth(1, Keyword::Varying) => {
                self.advance();
                self.advance();
                return Ok(TypeName::ResultSetLocator);
            }
            Some(kw) if !qualified => {
                if let Some(name) = builtin_type(kw) {
                    self.advance();
                    return Ok(name);
                }
            }
            _ => {}
        }

        let name = self.parse_ident()?;
        let anchor = if self.check(&TokenKind::Percent) {
            let anchor = match self.peek_nth(1).as_keyword() {
                Some(Keyword::Type) => TypeAnchor::Type,
                Some(Keyword::Rowtype) => TypeAnchor::RowType,
                _ => {
                    self.advance();
                    return Err(self.error_here(&["TYPE", "ROWTYPE"]));
                }
            };
            self.advance();
            self.advance();
            Some(anchor)
        } else {
            None
        };
        Ok(TypeName::Named { name, anchor })
    }

    /// Parses `( n | MAX [CHAR | BYTE] [, scale] )` if present.
    fn parse_type_length(&mut self) -> Result<Option<TypeLength>, ParseError> {
        let size_next = matches!(self.peek_nth(1).kind, TokenKind::Integer(_))
            || self.check_keyword_nth(1, Keyword::Max);
        if !self.check(&TokenKind::LeftParen) || !size_next {
            return Ok(None);
        }
        self.advance();
        let size = if self.eat_keyword(Keyword::Max) {
            LengthValue::Max
        } else {
            LengthValue::Number(self.parse_int_literal()?)
        };
        let unit = if self.eat_keyword(Keyword::Char) {
            Some(LengthUnit::Char)
        } else if self.eat_keyword(Keyword::Byte) {
            Some(LengthUnit::Byte)
        } else {
            None
        };
        let scale = if self.eat(&TokenKind::Comma) {
            Some(self.parse_int_literal()?)
        } else {
            None
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(Some(TypeLength { size, unit, scale }))
    }

    /// Parses the attributes that may follow a data type.
    pub(crate) fn parse_type_attrs(&mut self) -> Result<Vec<TypeAttr>, ParseError> {
        let mut attrs = Vec::new();
        loop {
            let negated = self.check_keyword(Keyword::Not);
            let next = self.peek_nth(usize::from(negated)).as_keyword();
            match next {
                Some(Keyword::Null) => {
                    if negated {
                        self.advance();
                    }
                    self.advance();
                    attrs.push(if negated {
                        TypeAttr::NotNull
                    } else {
                        TypeAttr::Null
                    });
                }
                Some(Keyword::Casespecific | Keyword::Cs) => {
                    if negated {
                        self.advance();
                    }
                    self.advance();
                    attrs.push(TypeAttr::CaseSpecific { negated });
                }
                Some(Keyword::Character)
                    if !negated && self.check_keyword_nth(1, Keyword::Set) =>
                {
                    self.advance();
                    self.advance();
                    attrs.push(TypeAttr::CharacterSet(self.parse_ident()?));
                }
                _ => break,
            }
        }
        Ok(attrs)
    }

    /// Parses `:= expr`, `= expr`, `WITH DEFAULT [expr]` or `DEFAULT [expr]`.
    pub(crate) fn parse_default_value(&mut self) -> Result<Option<DefaultValue>, ParseError> {
        if self.check(&TokenKind::Colon) && self.check_nth(1, &TokenKind::Eq) {
            self.advance();
            self.advance();
            return Ok(Some(DefaultValue::Assign(self.parse_expr()?)));
        }
        if self.eat(&TokenKind::Eq) {
            return Ok(Some(DefaultValue::Assign(self.parse_expr()?)));
        }
        let with_default =
            self.check_keyword(Keyword::With) && self.check_keyword_nth(1, Keyword::Default);
        if with_default {
            self.advance();
        }
        if !self.eat_keyword(Keyword::Default) {
            return Ok(None);
        }
        let value = if self.starts_expression() {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Some(DefaultValue::Default(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;

    #[test]
    fn test_literals() {
        let mut parser = Parser::from_sql("42 'it''s' DATE '2024-01-01' TRUE +7");
        assert_eq!(parser.try_literal(), Some(Literal::Integer(42)));
        assert_eq!(parser.try_literal(), Some(Literal::String("it's".into())));
        assert_eq!(
            parser.try_literal(),
            Some(Literal::Date("2024-01-01".into()))
        );
        assert_eq!(parser.try_literal(), Some(Literal::Boolean(true)));
        assert_eq!(parser.try_literal(), Some(Literal::Integer(7)));
    }

    #[test]
    fn test_date_without_string_is_not_a_literal() {
        let mut parser = Parser::from_sql("date + 1");
        assert_eq!(parser.try_literal(), None);
    }

    #[test]
    fn test_data_types() {
        let mut parser = Parser::from_sql("VARCHAR2(100 CHAR)");
        assert_eq!(parser.parse_data_type().unwrap().to_string(), "VARCHAR2(100 CHAR)");

        let mut parser = Parser::from_sql("DOUBLE PRECISION");
        assert_eq!(parser.parse_data_type().unwrap().name, TypeName::DoublePrecision);

        let mut parser = Parser::from_sql("emp.salary%TYPE");
        assert_eq!(parser.parse_data_type().unwrap().to_string(), "emp.salary%TYPE");

        let mut parser = Parser::from_sql("NVARCHAR(MAX)");
        let dt = parser.parse_data_type().unwrap();
        assert!(matches!(
            dt.length,
            Some(TypeLength {
                size: LengthValue::Max,
                ..
            })
        ));
    }

    #[test]
    fn test_paren_without_size_is_not_a_length() {
        let mut parser = Parser::from_sql("INT (a)");
        let dt = parser.parse_data_type().unwrap();
        assert_eq!(dt.length, None);
        assert!(parser.check(&TokenKind::LeftParen));
    }

    #[test]
    fn test_type_attrs() {
        let mut parser = Parser::from_sql("NOT NULL NOT CASESPECIFIC CHARACTER SET latin");
        let attrs = parser.parse_type_attrs().unwrap();
        assert_eq!(
            attrs,
            vec![
                TypeAttr::NotNull,
                TypeAttr::CaseSpecific { negated: true },
                TypeAttr::CharacterSet(crate::ast::Ident::new("latin")),
            ]
        );
    }

    #[test]
    fn test_default_forms() {
        let mut parser = Parser::from_sql(":= 1");
        assert_eq!(
            parser.parse_default_value().unwrap(),
            Some(DefaultValue::Assign(Expr::integer(1)))
        );
        let mut parser = Parser::from_sql("WITH DEFAULT");
        assert_eq!(
            parser.parse_default_value().unwrap(),
            Some(DefaultValue::Default(None))
        );
        let mut parser = Parser::from_sql("DEFAULT 'x'");
        assert_eq!(
            parser.parse_default_value().unwrap(),
            Some(DefaultValue::Default(Some(Expr::string("x"))))
        );
    }
}
