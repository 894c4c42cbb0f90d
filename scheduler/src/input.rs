//! Validation of caller-supplied process records.
//!
//! Validation is all-or-nothing: the first offending row is reported and no
//! partial list is returned.

use std::collections::HashSet;
use std::error::Error;
use std::fmt::{self, Display};
use std::num::{IntErrorKind, NonZeroUsize};

use crate::{Pid, ProcessSpec};

/// A column of the process table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Pid,
    ArrivalTime,
    BurstTime,
    Priority,
}

impl Field {
    fn requirement(self) -> &'static str {
        match self {
            Field::Pid | Field::BurstTime => "must be > 0",
            Field::ArrivalTime | Field::Priority => "must be >= 0",
        }
    }

    fn minimum(self) -> i64 {
        match self {
            Field::Pid | Field::BurstTime => 1,
            Field::ArrivalTime | Field::Priority => 0,
        }
    }

    fn maximum(self) -> u64 {
        match self {
            Field::Priority => u32::MAX.into(),
            Field::Pid | Field::ArrivalTime | Field::BurstTime => usize::MAX as u64,
        }
    }

    // Values below the minimum keep the sign error, anything else is too large.
    fn range_error(self, row: usize, value: i64) -> InputValidationError {
        let kind = if value < self.minimum() {
            ValidationErrorKind::OutOfRange(value)
        } else {
            ValidationErrorKind::Overflow(value.to_string())
        };
        InputValidationError::new(row, self, kind)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Pid => write!(f, "PID"),
            Field::ArrivalTime => write!(f, "Arrival Time"),
            Field::BurstTime => write!(f, "Burst Time"),
            Field::Priority => write!(f, "Priority"),
        }
    }
}

/// Why a row was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The field is absent.
    Missing,

    /// The field is not an integer.
    NonNumeric(String),

    /// The value is below the allowed minimum.
    OutOfRange(i64),

    /// The integer, given as written, does not fit the field.
    Overflow(String),

    /// The PID was already used by an earlier row.
    Duplicate(Pid),

    /// The row has this many fields, more than a record can hold.
    Unexpected(usize),
}

/// A process record failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValidationError {
    /// The 1-based row of the offending record.
    pub row: usize,

    /// The offending field, if the error concerns a single field.
    pub field: Option<Field>,

    pub kind: ValidationErrorKind,
}

impl InputValidationError {
    fn new(row: usize, field: Field, kind: ValidationErrorKind) -> Self {
        InputValidationError {
            row,
            field: Some(field),
            kind,
        }
    }
}

impl Display for InputValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = self.row;
        match (&self.kind, self.field) {
            (ValidationErrorKind::Missing, Some(field)) => {
                write!(f, "missing input at row {row}: {field} is required")
            }
            (ValidationErrorKind::NonNumeric(text), Some(field)) => {
                write!(f, "invalid input (non-numeric) at row {row}: {field} \"{text}\"")
            }
            (ValidationErrorKind::OutOfRange(value), Some(field)) => {
                write!(
                    f,
                    "invalid input at row {row}: {field} {} but is {value}",
                    field.requirement()
                )
            }
            (ValidationErrorKind::Overflow(text), Some(field)) => {
                write!(
                    f,
                    "invalid input at row {row}: {field} must be between {} and {} but is {text}",
                    field.minimum(),
                    field.maximum()
                )
            }
            (ValidationErrorKind::Duplicate(pid), _) => {
                write!(f, "duplicate PID {pid} at row {row}")
            }
            (ValidationErrorKind::Unexpected(count), _) => {
                write!(f, "too many fields at row {row}: expected 3 or 4, found {count}")
            }
            (_, None) => write!(f, "invalid input at row {row}"),
        }
    }
}

impl Error for InputValidationError {}

impl ProcessSpec {
    /// Validates a record given as signed integers.
    ///
    /// * `row` - the 1-based row used in error reports.
    pub fn validate(
        row: usize,
        pid: Pid,
        arrival_time: i64,
        burst_time: i64,
        priority: i64,
    ) -> Result<ProcessSpec, InputValidationError> {
        let arrival = usize::try_from(arrival_time)
            .map_err(|_| Field::ArrivalTime.range_error(row, arrival_time))?;
        let burst = usize::try_from(burst_time)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| Field::BurstTime.range_error(row, burst_time))?;
        let priority =
            u32::try_from(priority).map_err(|_| Field::Priority.range_error(row, priority))?;

        Ok(ProcessSpec::new(pid, arrival, burst, priority))
    }
}

/// Validates `(arrival, burst, priority)` tuples, assigning PIDs by
/// position starting from 1.
pub fn from_rows(rows: &[(i64, i64, i64)]) -> Result<Vec<ProcessSpec>, InputValidationError> {
    rows.iter()
        .enumerate()
        .map(|(index, &(arrival, burst, priority))| {
            ProcessSpec::validate(index + 1, Pid::from_position(index), arrival, burst, priority)
        })
        .collect()
}

/// Parses a process table.
///
/// Every non-blank line that does not start with `#` is one record. Fields
/// are separated by whitespace or commas. A record has either three fields,
/// `arrival burst priority`, with the PID given by position, or four,
/// `pid arrival burst priority`, where the PID may carry a `P` prefix.
///
/// ```
/// let specs = scheduler::parse_table("0 5 1\n# late\nP7, 3, 2, 0").unwrap();
/// assert_eq!(specs.len(), 2);
/// assert_eq!(specs[1].pid, 7);
/// ```
pub fn parse_table(text: &str) -> Result<Vec<ProcessSpec>, InputValidationError> {
    let records = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let mut specs = Vec::new();
    for (index, line) in records.enumerate() {
        let row = index + 1;
        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .collect();

        let (pid, values) = match fields.len() {
            0..=3 => (Pid::from_position(index), &fields[..]),
            4 => (parse_pid(row, fields[0])?, &fields[1..]),
            count => {
                return Err(InputValidationError {
                    row,
                    field: None,
                    kind: ValidationErrorKind::Unexpected(count),
                })
            }
        };

        let arrival = parse_number(row, Field::ArrivalTime, values.first())?;
        let burst = parse_number(row, Field::BurstTime, values.get(1))?;
        let priority = parse_number(row, Field::Priority, values.get(2))?;
        specs.push(ProcessSpec::validate(row, pid, arrival, burst, priority)?);
    }

    check_unique(&specs)?;
    Ok(specs)
}

/// Rejects the first record whose PID repeats an earlier one.
pub fn check_unique(specs: &[ProcessSpec]) -> Result<(), InputValidationError> {
    let mut seen = HashSet::new();
    for (index, spec) in specs.iter().enumerate() {
        if !seen.insert(spec.pid) {
            return Err(InputValidationError::new(
                index + 1,
                Field::Pid,
                ValidationErrorKind::Duplicate(spec.pid),
            ));
        }
    }
    Ok(())
}

fn parse_number(row: usize, field: Field, text: Option<&&str>) -> Result<i64, InputValidationError> {
    let text = text.ok_or(InputValidationError::new(row, field, ValidationErrorKind::Missing))?;
    text.parse::<i64>().map_err(|err| {
        let text = (*text).to_owned();
        let kind = match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                ValidationErrorKind::Overflow(text)
            }
            _ => ValidationErrorKind::NonNumeric(text),
        };
        InputValidationError::new(row, field, kind)
    })
}

fn parse_pid(row: usize, text: &str) -> Result<Pid, InputValidationError> {
    let digits = text.strip_prefix(['P', 'p']).unwrap_or(text);
    let value = parse_number(row, Field::Pid, Some(&digits)).map_err(|mut err| {
        if let ValidationErrorKind::NonNumeric(_) = err.kind {
            err.kind = ValidationErrorKind::NonNumeric(text.to_owned());
        }
        err
    })?;
    usize::try_from(value)
        .ok()
        .and_then(Pid::new)
        .ok_or_else(|| Field::Pid.range_error(row, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_get_positional_pids() {
        let specs = from_rows(&[(0, 5, 1), (3, 2, 0)]).unwrap();
        assert_eq!(specs[0].pid, 1);
        assert_eq!(specs[1].pid, 2);
        assert_eq!(specs[1].arrival_time, 3);
        assert_eq!(specs[1].burst_time.get(), 2);
        assert_eq!(specs[1].priority, 0);
    }

    #[test]
    fn empty_input_is_valid() {
        assert_eq!(from_rows(&[]), Ok(vec![]));
        assert_eq!(parse_table("\n  \n# nothing here\n"), Ok(vec![]));
    }

    #[test]
    fn out_of_range_values_report_row_and_field() {
        let err = from_rows(&[(0, 1, 0), (-1, 2, 0)]).unwrap_err();
        assert_eq!(err.row, 2);
        assert_eq!(err.field, Some(Field::ArrivalTime));
        assert_eq!(err.kind, ValidationErrorKind::OutOfRange(-1));

        let err = from_rows(&[(0, 0, 0)]).unwrap_err();
        assert_eq!(err.field, Some(Field::BurstTime));
        assert_eq!(
            err.to_string(),
            "invalid input at row 1: Burst Time must be > 0 but is 0"
        );

        let err = from_rows(&[(0, 1, -3)]).unwrap_err();
        assert_eq!(err.field, Some(Field::Priority));
    }

    #[test]
    fn table_accepts_commas_comments_and_explicit_pids() {
        let specs = parse_table("# at bt pr\n0, 4, 2\n\np9 1 2 1\n").unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].pid, 1);
        assert_eq!(specs[1].pid, 9);
        assert_eq!(specs[1].arrival_time, 1);
    }

    #[test]
    fn table_rejects_non_numeric_and_missing_fields() {
        let err = parse_table("0 4 2\n1 two 1").unwrap_err();
        assert_eq!(err.row, 2);
        assert_eq!(err.field, Some(Field::BurstTime));
        assert_eq!(err.kind, ValidationErrorKind::NonNumeric("two".to_string()));

        let err = parse_table("0 4").unwrap_err();
        assert_eq!(err.field, Some(Field::Priority));
        assert_eq!(err.kind, ValidationErrorKind::Missing);

        let err = parse_table("1 0 4 2 9").unwrap_err();
        assert_eq!(err.field, None);
        assert_eq!(err.kind, ValidationErrorKind::Unexpected(5));
    }

    #[test]
    fn values_above_the_field_range_are_too_large() {
        let err = from_rows(&[(0, 1, 5_000_000_000)]).unwrap_err();
        assert_eq!(err.field, Some(Field::Priority));
        assert_eq!(err.kind, ValidationErrorKind::Overflow("5000000000".to_string()));
        assert_eq!(
            err.to_string(),
            "invalid input at row 1: Priority must be between 0 and 4294967295 but is 5000000000"
        );

        let err = parse_table("0 99999999999999999999 1").unwrap_err();
        assert_eq!(err.field, Some(Field::BurstTime));
        assert_eq!(
            err.kind,
            ValidationErrorKind::Overflow("99999999999999999999".to_string())
        );

        let err = parse_table("0 1 -99999999999999999999").unwrap_err();
        assert_eq!(err.field, Some(Field::Priority));
        assert!(matches!(err.kind, ValidationErrorKind::Overflow(_)));
    }

    #[test]
    fn table_rejects_bad_and_duplicate_pids() {
        let err = parse_table("P0 0 1 1").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::OutOfRange(0));

        let err = parse_table("Px 0 1 1").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NonNumeric("Px".to_string()));

        let err = parse_table("P2 0 1 1\n0 1 1").unwrap_err();
        assert_eq!(err.row, 2);
        assert_eq!(err.kind, ValidationErrorKind::Duplicate(Pid::new(2).unwrap()));
    }
}
