use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 帳戶類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountKind {
    #[default]
    Checking,
    Savings,
}

impl AccountKind {
    /// Name sent on the wire in `createCompte`.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AccountKind::Checking => "CHECKING",
            AccountKind::Savings => "SAVINGS",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAccountKind(pub String);

impl fmt::Display for UnknownAccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown account kind: '{}'", self.0)
    }
}

impl std::error::Error for UnknownAccountKind {}

impl FromStr for AccountKind {
    type Err = UnknownAccountKind;

    /// 大小寫敏感；同時接受服務端舊有的法文名稱
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CHECKING" | "COURANT" => Ok(AccountKind::Checking),
            "SAVINGS" | "EPARGNE" => Ok(AccountKind::Savings),
            other => Err(UnknownAccountKind(other.to_string())),
        }
    }
}

/// A bank account as decoded from a `getComptes` response.
///
/// Every field is always populated. Values that could not be read from the
/// response carry their default, so they are not authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Option<i64>,
    pub balance: f64,
    pub created_at: NaiveDateTime,
    pub kind: AccountKind,
}

/// Raw text of one account record, before any coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAccount {
    pub id: Option<String>,
    pub solde: Option<String>,
    pub date_creation: Option<String>,
    pub kind: Option<String>,
}
