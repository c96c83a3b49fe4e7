//! Best-effort decoding of `getComptes` records.
//!
//! Each field degrades to its own default. Decoding an [`Account`] never fails.

use crate::domain::model::{Account, AccountKind, RawAccount};
use crate::domain::soap::SoapObject;
use crate::utils::error::{ClientError, Result};
use chrono::{NaiveDate, NaiveDateTime};

pub const FIELD_ID: &str = "id";
pub const FIELD_SOLDE: &str = "solde";
pub const FIELD_DATE_CREATION: &str = "dateCreation";
pub const FIELD_TYPE: &str = "type";

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

impl RawAccount {
    /// 從 SOAP 紀錄取出原始字串；缺少的欄位為 `None`
    pub fn from_record(record: &SoapObject) -> Self {
        let field = |name: &str| record.property(name).map(|p| p.text.clone());
        Self {
            id: field(FIELD_ID),
            solde: field(FIELD_SOLDE),
            date_creation: field(FIELD_DATE_CREATION),
            kind: field(FIELD_TYPE),
        }
    }
}

/// Decodes one record. `now` is used when the creation date is unusable.
pub fn decode_account(raw: &RawAccount, now: NaiveDateTime) -> Account {
    Account {
        id: raw.id.as_deref().and_then(parse_id),
        balance: raw.solde.as_deref().and_then(parse_balance).unwrap_or(0.0),
        created_at: raw
            .date_creation
            .as_deref()
            .and_then(parse_created_at)
            .unwrap_or(now),
        kind: raw
            .kind
            .as_deref()
            .and_then(|s| s.parse::<AccountKind>().ok())
            .unwrap_or_default(),
    }
}

/// Decodes every property of a `getComptesResponse` body, in order.
///
/// Fails only when a property is not a record at all.
pub fn decode_accounts(body: &SoapObject, now: NaiveDateTime) -> Result<Vec<Account>> {
    body.properties
        .iter()
        .enumerate()
        .map(|(index, property)| {
            if !property.is_record() {
                return Err(ClientError::NotARecord {
                    index,
                    name: property.name.clone(),
                });
            }
            Ok(decode_account(&RawAccount::from_record(property), now))
        })
        .collect()
}

fn parse_id(s: &str) -> Option<i64> {
    s.parse().ok()
}

fn parse_balance(s: &str) -> Option<f64> {
    s.parse().ok()
}

/// 先試完整日期時間，再退回純日期（當日 00:00:00）；尾端多餘字元（毫秒、時區）忽略
fn parse_created_at(s: &str) -> Option<NaiveDateTime> {
    if let Ok((datetime, _)) = NaiveDateTime::parse_and_remainder(s, DATE_TIME_FORMAT) {
        return Some(datetime);
    }
    NaiveDate::parse_and_remainder(s, DATE_FORMAT)
        .ok()
        .and_then(|(date, _)| date.and_hms_opt(0, 0, 0))
}

/// Decimal string for `solde`. Always carries a fractional part, e.g. `100.0`.
pub fn format_balance(balance: f64) -> String {
    let mut s = balance.to_string();
    if balance.is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}
