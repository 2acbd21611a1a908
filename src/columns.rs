//! Column type inference, filter operators and filter rules for tabular
//! data.
//!
//! Classification is a sampling heuristic: only the first
//! [`SAMPLE_SIZE`] unique non-blank values of a column are inspected, so
//! sparse or mixed columns can be misclassified. Treat the result as a
//! hint for choosing filter operators, not as a guarantee about every
//! value in the column.

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

/// Number of unique values sampled per column.
pub const SAMPLE_SIZE: usize = 10;

/// Values this short are never read as dates, so bare numbers and
/// abbreviations like `2024` or `1.2.24` stay out of the date class.
const MIN_DATE_LEN: usize = 8;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    String,
    Number,
    Date,
}

impl ColumnType {
    /// Lowercase name used in HTML attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infers the type of a column from its values.
///
/// Samples the first [`SAMPLE_SIZE`] unique non-blank values in order of
/// appearance. An empty sample is a string column. A sample made entirely
/// of finite numbers is a number column; one made entirely of parseable
/// dates longer than eight characters is a date column. Anything else is a
/// string column.
pub fn infer_column_type<'a, I>(values: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sample: Vec<&str> = Vec::with_capacity(SAMPLE_SIZE);
    for value in values {
        let value = value.trim();
        if value.is_empty() || sample.contains(&value) {
            continue;
        }
        sample.push(value);
        if sample.len() == SAMPLE_SIZE {
            break;
        }
    }

    if sample.is_empty() {
        ColumnType::String
    } else if sample.iter().all(|value| is_number(value)) {
        ColumnType::Number
    } else if sample.iter().all(|value| is_date(value)) {
        ColumnType::Date
    } else {
        ColumnType::String
    }
}

fn is_number(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(f64::is_finite)
}

fn is_date(value: &str) -> bool {
    if value.chars().count() <= MIN_DATE_LEN {
        return false;
    }

    DateTime::parse_from_rfc3339(value).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|format| NaiveDate::parse_from_str(value, format).is_ok())
}

/// Comparison offered when filtering a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    GreaterOrEqual,
    LessOrEqual,
    Contains,
    In,
    IsNull,
    IsNotNull,
    Between,
}

/// Operators for string columns.
pub const STRING_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Equals,
    FilterOperator::NotEquals,
    FilterOperator::Contains,
    FilterOperator::In,
    FilterOperator::IsNull,
    FilterOperator::IsNotNull,
];

/// Operators for number and date columns.
pub const NUMBER_DATE_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Equals,
    FilterOperator::NotEquals,
    FilterOperator::GreaterOrEqual,
    FilterOperator::LessOrEqual,
    FilterOperator::Contains,
    FilterOperator::Between,
    FilterOperator::In,
    FilterOperator::IsNull,
    FilterOperator::IsNotNull,
];

impl FilterOperator {
    /// Wire symbol of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "=",
            FilterOperator::NotEquals => "<>",
            FilterOperator::GreaterOrEqual => ">=",
            FilterOperator::LessOrEqual => "<=",
            FilterOperator::Contains => "~~*",
            FilterOperator::In => "in",
            FilterOperator::IsNull => "is_null",
            FilterOperator::IsNotNull => "is_not_null",
            FilterOperator::Between => "between",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "does not equal",
            FilterOperator::GreaterOrEqual => "greater or equal",
            FilterOperator::LessOrEqual => "less or equal",
            FilterOperator::Contains => "contains",
            FilterOperator::In => "one of",
            FilterOperator::IsNull => "is empty",
            FilterOperator::IsNotNull => "is not empty",
            FilterOperator::Between => "from...to",
        }
    }

    /// False for the null checks, which take no operand.
    pub fn requires_value(&self) -> bool {
        !matches!(self, FilterOperator::IsNull | FilterOperator::IsNotNull)
    }

    /// True when the operand is typed freely instead of picked from the
    /// column's values.
    pub fn is_free_text(&self) -> bool {
        matches!(
            self,
            FilterOperator::GreaterOrEqual
                | FilterOperator::LessOrEqual
                | FilterOperator::Contains
                | FilterOperator::Between
        )
    }

    /// True for the two-operand range operator.
    pub fn is_between(&self) -> bool {
        matches!(self, FilterOperator::Between)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for FilterOperator {
    type Err = anyhow::Error;

    fn from_str(symbol: &str) -> Result<Self> {
        let operator = match symbol {
            "=" => FilterOperator::Equals,
            "<>" => FilterOperator::NotEquals,
            ">=" => FilterOperator::GreaterOrEqual,
            "<=" => FilterOperator::LessOrEqual,
            "~~*" => FilterOperator::Contains,
            "in" => FilterOperator::In,
            "is_null" => FilterOperator::IsNull,
            "is_not_null" => FilterOperator::IsNotNull,
            "between" => FilterOperator::Between,
            other => bail!("Unknown filter operator: {}", other),
        };
        Ok(operator)
    }
}

/// Operators available for a column of the given type.
pub fn operators_for(column_type: ColumnType) -> &'static [FilterOperator] {
    match column_type {
        ColumnType::String => STRING_OPERATORS,
        ColumnType::Number | ColumnType::Date => NUMBER_DATE_OPERATORS,
    }
}

/// Part of a date matched by the `contains` operator on date columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePart {
    Day,
    Month,
    Year,
}

/// Date parts in the order they are offered.
pub const DATE_PARTS: &[DatePart] = &[DatePart::Day, DatePart::Month, DatePart::Year];

/// Month names indexed by month number minus one.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl DatePart {
    /// Lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePart::Day => "day",
            DatePart::Month => "month",
            DatePart::Year => "year",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DatePart::Day => "Day",
            DatePart::Month => "Month",
            DatePart::Year => "Year",
        }
    }

    /// Parses the value matched against this part of a date.
    ///
    /// # Errors
    ///
    /// Returns error if the value is not an integer, or if a day or month
    /// falls outside its calendar range.
    pub fn parse_value(&self, value: &str) -> Result<u32> {
        let Ok(number) = value.trim().parse::<u32>() else {
            bail!("Invalid {} value: {}", self.as_str(), value);
        };

        let valid = match self {
            DatePart::Day => (1..=31).contains(&number),
            DatePart::Month => (1..=12).contains(&number),
            DatePart::Year => true,
        };
        if !valid {
            bail!("{} out of range: {}", self.label(), number);
        }

        Ok(number)
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatePart {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self> {
        let part = match name {
            "day" => DatePart::Day,
            "month" => DatePart::Month,
            "year" => DatePart::Year,
            other => bail!("Unknown date part: {}", other),
        };
        Ok(part)
    }
}

/// Operand of a filter rule: one value, or a set for `in`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Single(String),
    Many(Vec<String>),
}

/// A filter applied to one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    /// Column identifier
    pub id: String,
    pub operator: FilterOperator,
    pub value: Option<FilterValue>,
    /// Upper bound for `between`
    pub value2: Option<String>,
    /// Date part matched by `contains` on date columns
    pub date_part: Option<DatePart>,
    pub date_part_value: Option<String>,
}

impl FilterRule {
    /// Creates a rule with no operands.
    pub fn new(id: impl Into<String>, operator: FilterOperator) -> Self {
        Self {
            id: id.into(),
            operator,
            value: None,
            value2: None,
            date_part: None,
            date_part_value: None,
        }
    }

    /// Sets the operand.
    pub fn with_value(mut self, value: FilterValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the upper bound of a `between` rule.
    pub fn with_upper_bound(mut self, value: impl Into<String>) -> Self {
        self.value2 = Some(value.into());
        self
    }

    /// Restricts a `contains` rule to one part of a date.
    pub fn with_date_part(mut self, part: DatePart, value: impl Into<String>) -> Self {
        self.date_part = Some(part);
        self.date_part_value = Some(value.into());
        self
    }

    /// Checks the rule against the type of the column it filters.
    ///
    /// # Errors
    ///
    /// Returns error if the operator is not offered for the column type,
    /// if a required operand is missing, if `between` lacks its upper
    /// bound, if a set operand is used with anything but `in`, or if a
    /// date part is used outside `contains` on a date column.
    pub fn validate(&self, column_type: ColumnType) -> Result<()> {
        if !operators_for(column_type).contains(&self.operator) {
            bail!(
                "Operator {} is not available for {} column {}",
                self.operator,
                column_type,
                self.id
            );
        }

        if let Some(part) = self.date_part {
            if self.operator != FilterOperator::Contains || column_type != ColumnType::Date {
                bail!("Date part filters need contains on a date column: {}", self.id);
            }
            let Some(value) = &self.date_part_value else {
                bail!("Missing {} value for column {}", part, self.id);
            };
            part.parse_value(value)?;
            return Ok(());
        }

        match (&self.value, self.operator.requires_value()) {
            (None, true) => bail!("Operator {} needs a value: {}", self.operator, self.id),
            (Some(FilterValue::Many(_)), _) if self.operator != FilterOperator::In => {
                bail!("Operator {} takes a single value: {}", self.operator, self.id)
            }
            _ => {}
        }

        if self.operator.is_between() && self.value2.is_none() {
            bail!("Range filter needs an upper bound: {}", self.id);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_numbers() {
        // Arrange
        let values = ["1", "2.5", "-3", "1e3", " 42 "];

        // Act
        let column_type = infer_column_type(values);

        // Assert
        assert_eq!(column_type, ColumnType::Number);
    }

    #[test]
    fn test_infer_dates() {
        // Arrange
        let values = [
            "2024-01-15",
            "2024-01-15T10:30:00Z",
            "15.01.2024",
            "01/15/2024",
            "2024-01-15 10:30:00",
        ];

        // Act
        let column_type = infer_column_type(values);

        // Assert
        assert_eq!(column_type, ColumnType::Date);
    }

    #[test]
    fn test_infer_mixed_is_string() {
        // Arrange
        let values = ["1", "two", "3"];

        // Act
        let column_type = infer_column_type(values);

        // Assert
        assert_eq!(column_type, ColumnType::String);
    }

    #[test]
    fn test_infer_empty_is_string() {
        // Arrange
        let values: [&str; 2] = ["", "   "];

        // Act
        let column_type = infer_column_type(values);

        // Assert
        assert_eq!(column_type, ColumnType::String);
    }

    #[test]
    fn test_infinite_values_are_not_numbers() {
        // Arrange & Act & Assert
        assert_eq!(infer_column_type(["inf", "1"]), ColumnType::String);
        assert_eq!(infer_column_type(["NaN"]), ColumnType::String);
    }

    #[test]
    fn test_short_dates_are_rejected() {
        // Arrange & Act & Assert
        assert!(!is_date("1.1.2024"));
        assert!(is_date("01.01.2024"));
    }

    #[test]
    fn test_sampling_only_inspects_first_unique_values() {
        // Arrange: ten distinct numbers, repeats, then a word past the sample
        let mut values: Vec<String> = (0..10).map(|n| n.to_string()).collect();
        values.extend(["3".to_string(), "word".to_string()]);

        // Act
        let column_type = infer_column_type(values.iter().map(String::as_str));

        // Assert
        assert_eq!(
            column_type,
            ColumnType::Number,
            "Values past the sample are not inspected"
        );
    }

    #[test]
    fn test_duplicates_do_not_fill_sample() {
        // Arrange
        let mut values = vec!["7"; 20];
        values.push("word");

        // Act
        let column_type = infer_column_type(values);

        // Assert
        assert_eq!(column_type, ColumnType::String);
    }

    #[test]
    fn test_operators_for_types() {
        // Arrange & Act
        let string_ops = operators_for(ColumnType::String);
        let date_ops = operators_for(ColumnType::Date);

        // Assert
        assert!(!string_ops.contains(&FilterOperator::Between));
        assert!(!string_ops.contains(&FilterOperator::GreaterOrEqual));
        assert!(date_ops.contains(&FilterOperator::Between));
        assert_eq!(operators_for(ColumnType::Number), date_ops);
    }

    #[test]
    fn test_operator_flags() {
        // Arrange & Act & Assert
        assert!(!FilterOperator::IsNull.requires_value());
        assert!(FilterOperator::In.requires_value());
        assert!(FilterOperator::Contains.is_free_text());
        assert!(!FilterOperator::Equals.is_free_text());
        assert!(FilterOperator::Between.is_between());
    }

    #[test]
    fn test_operator_symbol_round_trip() {
        // Arrange & Act
        let parsed: Vec<FilterOperator> = NUMBER_DATE_OPERATORS
            .iter()
            .map(|op| op.symbol().parse().expect("Symbol should parse"))
            .collect();

        // Assert
        assert_eq!(parsed, NUMBER_DATE_OPERATORS);
        assert!("like".parse::<FilterOperator>().is_err());
    }

    #[test]
    fn test_date_part_parse_value() {
        // Arrange & Act & Assert
        assert_eq!(DatePart::Day.parse_value("31").expect("Should parse"), 31);
        assert_eq!(DatePart::Month.parse_value(" 12 ").expect("Should parse"), 12);
        assert_eq!(DatePart::Year.parse_value("2024").expect("Should parse"), 2024);
        assert!(DatePart::Day.parse_value("0").is_err());
        assert!(DatePart::Month.parse_value("13").is_err());
        assert!(DatePart::Year.parse_value("last").is_err());
    }

    #[test]
    fn test_date_part_names() {
        // Arrange & Act
        let parsed: Vec<DatePart> = DATE_PARTS
            .iter()
            .map(|part| part.as_str().parse().expect("Name should parse"))
            .collect();

        // Assert
        assert_eq!(parsed, DATE_PARTS);
        assert!("week".parse::<DatePart>().is_err());
        assert_eq!(MONTHS[0], "January");
    }

    #[test]
    fn test_rule_with_value_is_valid() {
        // Arrange
        let rule = FilterRule::new("name", FilterOperator::Equals)
            .with_value(FilterValue::Single("navbar".into()));

        // Act
        let result = rule.validate(ColumnType::String);

        // Assert
        assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn test_rule_missing_value() {
        // Arrange
        let rule = FilterRule::new("name", FilterOperator::Contains);

        // Act
        let result = rule.validate(ColumnType::String);

        // Assert
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("needs a value"));
    }

    #[test]
    fn test_null_check_needs_no_value() {
        // Arrange
        let rule = FilterRule::new("name", FilterOperator::IsNull);

        // Act & Assert
        assert!(rule.validate(ColumnType::String).is_ok());
    }

    #[test]
    fn test_rule_operator_must_fit_column() {
        // Arrange
        let rule = FilterRule::new("name", FilterOperator::GreaterOrEqual)
            .with_value(FilterValue::Single("3".into()));

        // Act & Assert
        assert!(rule.validate(ColumnType::String).is_err());
        assert!(rule.validate(ColumnType::Number).is_ok());
    }

    #[test]
    fn test_between_needs_upper_bound() {
        // Arrange
        let open = FilterRule::new("count", FilterOperator::Between)
            .with_value(FilterValue::Single("1".into()));
        let closed = open.clone().with_upper_bound("9");

        // Act & Assert
        assert!(open.validate(ColumnType::Number).is_err());
        assert!(closed.validate(ColumnType::Number).is_ok());
    }

    #[test]
    fn test_value_set_only_for_in() {
        // Arrange
        let values = FilterValue::Many(vec!["a".into(), "b".into()]);
        let in_rule = FilterRule::new("name", FilterOperator::In).with_value(values.clone());
        let eq_rule = FilterRule::new("name", FilterOperator::Equals).with_value(values);

        // Act & Assert
        assert!(in_rule.validate(ColumnType::String).is_ok());
        assert!(eq_rule.validate(ColumnType::String).is_err());
    }

    #[test]
    fn test_date_part_rule() {
        // Arrange
        let rule =
            FilterRule::new("added", FilterOperator::Contains).with_date_part(DatePart::Month, "3");
        let bad_month =
            FilterRule::new("added", FilterOperator::Contains).with_date_part(DatePart::Month, "13");

        // Act & Assert
        assert!(rule.validate(ColumnType::Date).is_ok());
        assert!(rule.validate(ColumnType::Number).is_err());
        assert!(bad_month.validate(ColumnType::Date).is_err());
    }
}
