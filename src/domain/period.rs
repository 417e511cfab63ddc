// Period labels for the chart's horizontal axis
use super::error::DomainError;
use chrono::Month;

/// Label a (month, year) pair, e.g. `label(1, 2021) == "January 2021"`.
///
/// Out-of-range months are a data-integrity violation and are reported,
/// never rendered.
pub fn label(month: u32, year: i32) -> Result<String, DomainError> {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or(DomainError::InvalidMonth(month))?;

    Ok(format!("{} {}", name.name(), year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_formats_month_and_year() {
        assert_eq!(label(1, 2021).unwrap(), "January 2021");
        assert_eq!(label(12, 1999).unwrap(), "December 1999");
        assert_eq!(label(3, 2022).unwrap(), "March 2022");
    }

    #[test]
    fn test_label_covers_every_month() {
        let labels: Vec<String> = (1..=12).map(|m| label(m, 2020).unwrap()).collect();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[8], "September 2020");
        assert!(labels.iter().all(|l| l.ends_with(" 2020")));
    }

    #[test]
    fn test_label_rejects_out_of_range_month() {
        assert_eq!(label(0, 2021), Err(DomainError::InvalidMonth(0)));
        assert_eq!(label(13, 2021), Err(DomainError::InvalidMonth(13)));
        assert_eq!(label(300, 2021), Err(DomainError::InvalidMonth(300)));
    }
}
