/// Brands per page on the browse view.
pub const BROWSE_PAGE_SIZE: i64 = 6;

/// Brands shown on the home page teaser.
pub const HOME_TEASER_SIZE: i64 = 3;

/// `ceil(total / limit)`, never less than one page.
#[must_use]
pub fn page_count(total: i64, limit: i64) -> i64 {
    if limit <= 0 || total <= 0 {
        return 1;
    }
    ((total + limit - 1) / limit).max(1)
}

/// Parse a 1-based `page` query value. Missing, malformed or non-positive
/// values resolve to the first page.
#[must_use]
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Row offset of a 1-based page.
#[must_use]
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(13, 6), 3);
        assert_eq!(page_count(12, 6), 2);
        assert_eq!(page_count(1, 6), 1);
    }

    #[test]
    fn page_count_minimum_is_one() {
        assert_eq!(page_count(0, 6), 1);
        assert_eq!(page_count(5, 0), 1);
    }

    #[test]
    fn parse_page_defaults_to_first() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-4")), 1);
        assert_eq!(parse_page(Some("3")), 3);
    }

    #[test]
    fn page_offset_is_zero_based() {
        assert_eq!(page_offset(1, 6), 0);
        assert_eq!(page_offset(3, 6), 12);
        assert_eq!(page_offset(0, 6), 0);
    }

    #[test]
    fn page_offset_saturates() {
        assert_eq!(page_offset(i64::MAX, 6), i64::MAX);
    }
}
