//! Token types shared by the lexer and the parser.

use core::fmt;

use super::{Position, Span};

/// Declares the keyword table.
///
/// Reserved words can never be used as identifiers; every other keyword is
/// identifier-eligible. The table is closed: adding a word here changes how
/// any program using it as a plain name parses.
macro_rules! keywords {
    (
        reserved { $($r:ident => $rs:literal,)* }
        non_reserved { $($n:ident => $ns:literal,)* }
    ) => {
        /// HPL/SQL keywords, across every supported dialect.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Keyword {
            $($r,)*
            $($n,)*
        }

        impl Keyword {
            /// Every keyword known to the grammar.
            pub const ALL: &'static [Self] = &[$(Self::$r,)* $(Self::$n,)*];

            /// Attempts to parse a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($rs => Some(Self::$r),)*
                    $($ns => Some(Self::$n),)*
                    _ => None,
                }
            }

            /// Returns the canonical upper-case spelling.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$r => $rs,)*
                    $(Self::$n => $ns,)*
                }
            }

            /// Returns true if the keyword can never stand in for an identifier.
            #[must_use]
            pub const fn is_reserved(&self) -> bool {
                matches!(self, $(Self::$r)|*)
            }
        }
    };
}

keywords! {
    reserved {
        Alter => "ALTER",
        And => "AND",
        As => "AS",
        Begin => "BEGIN",
        Between => "BETWEEN",
        By => "BY",
        Case => "CASE",
        Constraint => "CONSTRAINT",
        Create => "CREATE",
        Declare => "DECLARE",
        Delete => "DELETE",
        Drop => "DROP",
        Else => "ELSE",
        Elseif => "ELSEIF",
        Elsif => "ELSIF",
        End => "END",
        Except => "EXCEPT",
        Exception => "EXCEPTION",
        Exists => "EXISTS",
        False => "FALSE",
        For => "FOR",
        Foreign => "FOREIGN",
        From => "FROM",
        Having => "HAVING",
        If => "IF",
        In => "IN",
        Insert => "INSERT",
        Intersect => "INTERSECT",
        Is => "IS",
        Join => "JOIN",
        Like => "LIKE",
        Loop => "LOOP",
        Merge => "MERGE",
        Not => "NOT",
        Null => "NULL",
        On => "ON",
        Or => "OR",
        Qualify => "QUALIFY",
        Sel => "SEL",
        Select => "SELECT",
        Set => "SET",
        Table => "TABLE",
        Then => "THEN",
        True => "TRUE",
        Union => "UNION",
        Update => "UPDATE",
        Using => "USING",
        Values => "VALUES",
        When => "WHEN",
        Where => "WHERE",
        While => "WHILE",
    }
    non_reserved {
        Action => "ACTION",
        ActivityCount => "ACTIVITY_COUNT",
        Add => "ADD",
        All => "ALL",
        Allocate => "ALLOCATE",
        AnsiNulls => "ANSI_NULLS",
        AnsiPadding => "ANSI_PADDING",
        Asc => "ASC",
        Associate => "ASSOCIATE",
        At => "AT",
        AutoIncrement => "AUTO_INCREMENT",
        Avg => "AVG",
        Batchsize => "BATCHSIZE",
        Bigint => "BIGINT",
        BinaryDouble => "BINARY_DOUBLE",
        BinaryFloat => "BINARY_FLOAT",
        BinaryInteger => "BINARY_INTEGER",
        Bit => "BIT",
        Body => "BODY",
        Break => "BREAK",
        Bulk => "BULK",
        Byte => "BYTE",
        Call => "CALL",
        Caller => "CALLER",
        Cascade => "CASCADE",
        Casespecific => "CASESPECIFIC",
        Cast => "CAST",
        Char => "CHAR",
        Character => "CHARACTER",
        Charset => "CHARSET",
        Client => "CLIENT",
        Close => "CLOSE",
        Clustered => "CLUSTERED",
        Cmp => "CMP",
        Collect => "COLLECT",
        Collection => "COLLECTION",
        Column => "COLUMN",
        Comment => "COMMENT",
        Commit => "COMMIT",
        Compress => "COMPRESS",
        Concat => "CONCAT",
        Condition => "CONDITION",
        Constant => "CONSTANT",
        Continue => "CONTINUE",
        Copy => "COPY",
        Count => "COUNT",
        CountBig => "COUNT_BIG",
        Creation => "CREATION",
        Creator => "CREATOR",
        Cs => "CS",
        CumeDist => "CUME_DIST",
        Current => "CURRENT",
        CurrentDate => "CURRENT_DATE",
        CurrentSchema => "CURRENT_SCHEMA",
        CurrentTimestamp => "CURRENT_TIMESTAMP",
        CurrentUser => "CURRENT_USER",
        Cursor => "CURSOR",
        Data => "DATA",
        Database => "DATABASE",
        Date => "DATE",
        Datetime => "DATETIME",
        Day => "DAY",
        Days => "DAYS",
        Dec => "DEC",
        Decimal => "DECIMAL",
        Default => "DEFAULT",
        Deferred => "DEFERRED",
        Defined => "DEFINED",
        Definer => "DEFINER",
        Definition => "DEFINITION",
        Delimited => "DELIMITED",
        Delimiter => "DELIMITER",
        DenseRank => "DENSE_RANK",
        Desc => "DESC",
        Describe => "DESCRIBE",
        Diagnostics => "DIAGNOSTICS",
        Directory => "DIRECTORY",
        Distinct => "DISTINCT",
        Distribute => "DISTRIBUTE",
        Do => "DO",
        Double => "DOUBLE",
        Dynamic => "DYNAMIC",
        Enable => "ENABLE",
        Engine => "ENGINE",
        Escaped => "ESCAPED",
        Exclusive => "EXCLUSIVE",
        Exec => "EXEC",
        Execute => "EXECUTE",
        Exit => "EXIT",
        Fallback => "FALLBACK",
        Fetch => "FETCH",
        Fields => "FIELDS",
        FirstValue => "FIRST_VALUE",
        Float => "FLOAT",
        Format => "FORMAT",
        Found => "FOUND",
        Full => "FULL",
        Function => "FUNCTION",
        Get => "GET",
        Global => "GLOBAL",
        Grant => "GRANT",
        Group => "GROUP",
        Handler => "HANDLER",
        Hash => "HASH",
        Hdfs => "HDFS",
        Hive => "HIVE",
        Host => "HOST",
        Identity => "IDENTITY",
        Ignore => "IGNORE",
        Immediate => "IMMEDIATE",
        Include => "INCLUDE",
        Index => "INDEX",
        Initrans => "INITRANS",
        Inner => "INNER",
        Inout => "INOUT",
        Int => "INT",
        Int2 => "INT2",
        Int4 => "INT4",
        Int8 => "INT8",
        Integer => "INTEGER",
        Interval => "INTERVAL",
        Into => "INTO",
        Invoker => "INVOKER",
        Isopen => "ISOPEN",
        Items => "ITEMS",
        Keep => "KEEP",
        Key => "KEY",
        Keys => "KEYS",
        Lag => "LAG",
        Language => "LANGUAGE",
        LastValue => "LAST_VALUE",
        Lead => "LEAD",
        Leave => "LEAVE",
        Left => "LEFT",
        Limit => "LIMIT",
        Lines => "LINES",
        Local => "LOCAL",
        Location => "LOCATION",
        Locator => "LOCATOR",
        Locators => "LOCATORS",
        Locks => "LOCKS",
        Log => "LOG",
        Logged => "LOGGED",
        Logging => "LOGGING",
        Map => "MAP",
        Matched => "MATCHED",
        Max => "MAX",
        MaxPartDate => "MAX_PART_DATE",
        MaxPartInt => "MAX_PART_INT",
        MaxPartString => "MAX_PART_STRING",
        Maxtrans => "MAXTRANS",
        MessageText => "MESSAGE_TEXT",
        Microsecond => "MICROSECOND",
        Microseconds => "MICROSECONDS",
        Min => "MIN",
        MinPartDate => "MIN_PART_DATE",
        MinPartInt => "MIN_PART_INT",
        MinPartString => "MIN_PART_STRING",
        Multiset => "MULTISET",
        Nchar => "NCHAR",
        No => "NO",
        Nocompress => "NOCOMPRESS",
        Nocount => "NOCOUNT",
        Nologging => "NOLOGGING",
        None => "NONE",
        Notfound => "NOTFOUND",
        Number => "NUMBER",
        Numeric => "NUMERIC",
        Nvarchar => "NVARCHAR",
        Object => "OBJECT",
        Of => "OF",
        Off => "OFF",
        Only => "ONLY",
        Open => "OPEN",
        Order => "ORDER",
        Out => "OUT",
        Outer => "OUTER",
        Over => "OVER",
        Overwrite => "OVERWRITE",
        Owner => "OWNER",
        Package => "PACKAGE",
        PartCount => "PART_COUNT",
        PartLoc => "PART_LOC",
        Partition => "PARTITION",
        Pctfree => "PCTFREE",
        Pctused => "PCTUSED",
        PlsInteger => "PLS_INTEGER",
        Precision => "PRECISION",
        Preserve => "PRESERVE",
        Primary => "PRIMARY",
        Print => "PRINT",
        Proc => "PROC",
        Procedure => "PROCEDURE",
        QueryBand => "QUERY_BAND",
        Quit => "QUIT",
        QuotedIdentifier => "QUOTED_IDENTIFIER",
        Raise => "RAISE",
        Rank => "RANK",
        Real => "REAL",
        References => "REFERENCES",
        Regexp => "REGEXP",
        Replace => "REPLACE",
        Resignal => "RESIGNAL",
        Restrict => "RESTRICT",
        Result => "RESULT",
        ResultSetLocator => "RESULT_SET_LOCATOR",
        Return => "RETURN",
        Returns => "RETURNS",
        Reverse => "REVERSE",
        Right => "RIGHT",
        Rlike => "RLIKE",
        Role => "ROLE",
        Rollback => "ROLLBACK",
        Row => "ROW",
        RowCount => "ROW_COUNT",
        RowNumber => "ROW_NUMBER",
        Rows => "ROWS",
        Rowtype => "ROWTYPE",
        Rr => "RR",
        Rs => "RS",
        Schema => "SCHEMA",
        Second => "SECOND",
        Seconds => "SECONDS",
        Security => "SECURITY",
        Segment => "SEGMENT",
        Session => "SESSION",
        Sets => "SETS",
        Share => "SHARE",
        Signal => "SIGNAL",
        SimpleDouble => "SIMPLE_DOUBLE",
        SimpleFloat => "SIMPLE_FLOAT",
        SimpleInteger => "SIMPLE_INTEGER",
        Smalldatetime => "SMALLDATETIME",
        Smallint => "SMALLINT",
        Sql => "SQL",
        Sqlexception => "SQLEXCEPTION",
        Sqlinsert => "SQLINSERT",
        Sqlstate => "SQLSTATE",
        Sqlwarning => "SQLWARNING",
        Statistics => "STATISTICS",
        Stats => "STATS",
        Stdev => "STDEV",
        Step => "STEP",
        Storage => "STORAGE",
        Stored => "STORED",
        String => "STRING",
        Substring => "SUBSTRING",
        Sum => "SUM",
        Summary => "SUMMARY",
        Sysdate => "SYSDATE",
        SysRefcursor => "SYS_REFCURSOR",
        Tablespace => "TABLESPACE",
        Temporary => "TEMPORARY",
        Terminated => "TERMINATED",
        TextimageOn => "TEXTIMAGE_ON",
        Timestamp => "TIMESTAMP",
        Tinyint => "TINYINT",
        Title => "TITLE",
        To => "TO",
        Top => "TOP",
        Transaction => "TRANSACTION",
        Trim => "TRIM",
        Truncate => "TRUNCATE",
        Type => "TYPE",
        Unique => "UNIQUE",
        Ur => "UR",
        Use => "USE",
        User => "USER",
        Value => "VALUE",
        Var => "VAR",
        Varchar => "VARCHAR",
        Varchar2 => "VARCHAR2",
        Variance => "VARIANCE",
        Varying => "VARYING",
        Volatile => "VOLATILE",
        With => "WITH",
        Without => "WITHOUT",
        Work => "WORK",
        XactAbort => "XACT_ABORT",
        Xml => "XML",
        Yes => "YES",
    }
}

impl Keyword {
    /// Returns true if the keyword may be used wherever an identifier is expected.
    #[must_use]
    pub const fn is_identifier_eligible(&self) -> bool {
        !self.is_reserved()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Decimal literal, kept as written (e.g., 3.14)
    Decimal(String),
    /// Single-quoted string literal
    String(String),
    /// Double-quoted string literal
    DoubleQuotedString(String),

    // Names
    /// Identifier, plain or quoted with brackets/backticks
    Identifier(String),
    /// Keyword
    Keyword(Keyword),
    /// Statement label written as `name:`
    Label(String),
    /// File path such as `c:\scripts\init.sql`
    FilePath(String),

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// :
    Colon,
    /// .
    Dot,
    /// ..
    DotDot,

    // Operators
    /// =
    Eq,
    /// ==
    EqEq,
    /// =>
    Arrow,
    /// <>
    NotEq,
    /// !=
    BangEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// *
    Star,
    /// /
    Slash,
    /// +
    Plus,
    /// -
    Minus,
    /// %
    Percent,
    /// |
    Pipe,
    /// ||
    Concat,
    /// !
    Bang,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown input
    Error(String),
}

impl TokenKind {
    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn keyword(&self) -> Option<Keyword> {
        match self {
            Self::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if the token can stand for one part of an identifier.
    #[must_use]
    pub const fn is_identifier_like(&self) -> bool {
        match self {
            Self::Identifier(_) => true,
            Self::Keyword(kw) => kw.is_identifier_eligible(),
            _ => false,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let punct = match self {
            Self::Integer(n) => return write!(f, "integer {n}"),
            Self::Decimal(d) => return write!(f, "decimal {d}"),
            Self::String(s) => return write!(f, "string '{s}'"),
            Self::DoubleQuotedString(s) => return write!(f, "string \"{s}\""),
            Self::Identifier(name) => return write!(f, "identifier `{name}`"),
            Self::Keyword(kw) => return write!(f, "keyword {kw}"),
            Self::Label(name) => return write!(f, "label {name}:"),
            Self::FilePath(path) => return write!(f, "file path {path}"),
            Self::Error(message) => return write!(f, "invalid input ({message})"),
            Self::Eof => return f.write_str("end of input"),
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Dot => ".",
            Self::DotDot => "..",
            Self::Eq => "=",
            Self::EqEq => "==",
            Self::Arrow => "=>",
            Self::NotEq => "<>",
            Self::BangEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Percent => "%",
            Self::Pipe => "|",
            Self::Concat => "||",
            Self::Bang => "!",
        };
        write!(f, "`{punct}`")
    }
}

/// A token with its raw text and location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The raw source text of the token.
    pub text: String,
    /// Byte range in the source.
    pub span: Span,
    /// Line and column of the first character.
    pub position: Position,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            position,
        }
    }

    /// Creates an end-of-input token located at `span`.
    #[must_use]
    pub fn eof(span: Span, position: Position) -> Self {
        Self::new(TokenKind::Eof, "", span, position)
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        self.kind.keyword()
    }

    /// Case-insensitive comparison of the raw text.
    #[must_use]
    pub fn text_is(&self, text: &str) -> bool {
        self.text.eq_ignore_ascii_case(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("Current_Date"), Some(Keyword::CurrentDate));
        assert_eq!(Keyword::from_str("not_a_keyword"), None);
    }

    #[test]
    fn test_keyword_round_trips_through_text() {
        for kw in Keyword::ALL {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(*kw), "{kw:?}");
        }
    }

    #[test]
    fn test_reserved_words() {
        assert!(Keyword::Select.is_reserved());
        assert!(Keyword::End.is_reserved());
        assert!(!Keyword::Count.is_reserved());
        assert!(Keyword::Count.is_identifier_eligible());
        assert!(Keyword::Transaction.is_identifier_eligible());
    }

    #[test]
    fn test_go_is_not_a_keyword() {
        assert_eq!(Keyword::from_str("GO"), None);
    }

    #[test]
    fn test_token_kind_identifier_like() {
        assert!(TokenKind::Identifier("x".into()).is_identifier_like());
        assert!(TokenKind::Keyword(Keyword::Date).is_identifier_like());
        assert!(!TokenKind::Keyword(Keyword::Where).is_identifier_like());
        assert!(!TokenKind::Comma.is_identifier_like());
    }

    #[test]
    fn test_token_text_is() {
        let tok = Token::new(
            TokenKind::Identifier("go".into()),
            "go",
            Span::new(0, 2),
            Position::default(),
        );
        assert!(tok.text_is("GO"));
        assert!(!tok.is_eof());
    }
}
