//! Age evaluation for the minimum-age rule.

use chrono::{Datelike, Months, NaiveDate, Utc};

use crate::constants::MIN_AGE_YEARS;
use crate::error::{DomainError, DomainResult};

/// Current calendar date in UTC. All age checks are evaluated against it.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Age in whole years of someone born on `nascimento`, as of `hoje`.
///
/// Takes the calendar-year difference and subtracts one when the birthday
/// has not yet happened by `hoje`. In non-leap years a Feb 29 birthday is
/// reached on Mar 1.
pub fn idade_em(nascimento: NaiveDate, hoje: NaiveDate) -> i32 {
    let mut idade = hoje.year() - nascimento.year();
    if nascimento > shift_years(hoje, -idade) {
        idade -= 1;
    }
    idade
}

/// Fails with [`DomainError::Underage`] unless the subject is at least
/// [`MIN_AGE_YEARS`] old on `hoje`.
pub fn ensure_adult(nascimento: NaiveDate, hoje: NaiveDate) -> DomainResult<()> {
    if idade_em(nascimento, hoje) < MIN_AGE_YEARS {
        return Err(DomainError::Underage);
    }
    Ok(())
}

/// Moves `date` by whole years, clamping to the end of the month.
fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let months = Months::new(years.unsigned_abs() * 12);
    let shifted = if years >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}
