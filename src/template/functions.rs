//! Date arithmetic helpers exposed to ticket templates.
use chrono::{DateTime, Days, FixedOffset, format::Item, format::StrftimeItems};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tera::{Function, Value};

use crate::template::layout;

/// Name of the formatting function inside templates.
pub const ADD_DATE_AND_FORMAT: &str = "AddDateAndFormat";
/// Name of the day offset callable inside templates.
pub const ADD_DAY: &str = "AddDay";

/// Add `days` calendar days to `reference`, keeping the wall-clock time.
///
/// Negative values move backwards. Returns `None` when the result leaves
/// chrono's representable range.
pub fn add_days(
    reference: DateTime<FixedOffset>,
    days: i64,
) -> Option<DateTime<FixedOffset>> {
    let magnitude = Days::new(days.unsigned_abs());

    if days >= 0 {
        reference.checked_add_days(magnitude)
    } else {
        reference.checked_sub_days(magnitude)
    }
}

/// Format `reference + days` with a Go layout or strftime `format`.
pub fn add_date_and_format(
    reference: DateTime<FixedOffset>,
    format: &str,
    days: i64,
) -> tera::Result<String> {
    let date = add_days(reference, days).ok_or_else(|| {
        tera::Error::msg(format!("date out of range: {reference} + {days} days"))
    })?;

    let utc = date.offset().local_minus_utc() == 0;
    let strftime = layout::to_strftime(format, utc);
    let items = StrftimeItems::new(&strftime).collect::<Vec<Item>>();

    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(tera::Error::msg(format!("invalid date format: {format}")));
    }

    Ok(date.format_with_items(items.iter()).to_string())
}

fn required_arg<T: DeserializeOwned>(
    function: &str,
    args: &HashMap<String, Value>,
    name: &str,
) -> tera::Result<T> {
    let value = args.get(name).ok_or_else(|| {
        tera::Error::msg(format!(
            "function `{function}` requires argument `{name}`"
        ))
    })?;

    tera::from_value(value.clone()).map_err(|err| {
        tera::Error::msg(format!(
            "function `{function}` received invalid `{name}`: {err}"
        ))
    })
}

/// `AddDateAndFormat(format="2006-01-02", days=7)`
pub struct AddDateAndFormat {
    reference: DateTime<FixedOffset>,
}

impl AddDateAndFormat {
    pub fn new(reference: DateTime<FixedOffset>) -> Self {
        Self { reference }
    }
}

impl Function for AddDateAndFormat {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let format: String = required_arg(ADD_DATE_AND_FORMAT, args, "format")?;
        let days: i64 = required_arg(ADD_DATE_AND_FORMAT, args, "days")?;
        let formatted = add_date_and_format(self.reference, &format, days)?;
        Ok(Value::String(formatted))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// `AddDay(days=7)`: RFC 3339 timestamp, usable with the `date` filter.
pub struct AddDay {
    reference: DateTime<FixedOffset>,
}

impl AddDay {
    pub fn new(reference: DateTime<FixedOffset>) -> Self {
        Self { reference }
    }
}

impl Function for AddDay {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let days: i64 = required_arg(ADD_DAY, args, "days")?;
        let date = add_days(self.reference, days).ok_or_else(|| {
            tera::Error::msg(format!(
                "date out of range: {} + {days} days",
                self.reference
            ))
        })?;
        Ok(Value::String(date.to_rfc3339()))
    }

    fn is_safe(&self) -> bool {
        true
    }
}
