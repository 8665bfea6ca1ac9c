//! SQL dialect tags.
//!
//! The grammar is unified: one parser accepts every dialect at once. The
//! dialect is not a parser setting, it is a tag on the syntax fragments
//! that only one family of databases writes, such as table options.

use core::fmt;

/// The SQL families whose syntax the grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Syntax shared by several dialects.
    Generic,
    Hive,
    Oracle,
    Teradata,
    Db2,
    MySql,
    MsSql,
}

impl Dialect {
    /// Every dialect tag.
    pub const ALL: [Self; 7] = [
        Self::Generic,
        Self::Hive,
        Self::Oracle,
        Self::Teradata,
        Self::Db2,
        Self::MySql,
        Self::MsSql,
    ];

    /// Returns the name of the dialect.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Hive => "hive",
            Self::Oracle => "oracle",
            Self::Teradata => "teradata",
            Self::Db2 => "db2",
            Self::MySql => "mysql",
            Self::MsSql => "mssql",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
