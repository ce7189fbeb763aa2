use crate::dom::{root, sel};
use crate::models::Pagination;
use scraper::Html;

/// Listing pages on the origin show 50 cards per page
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 50;

/// Derive pagination metadata from a listing page.
///
/// The origin exposes no item count, so `total_items` is estimated as
/// `total_pages * items_per_page`.
pub fn parse_pagination(document: &Html, items_per_page: u32) -> Pagination {
    let widget_selector = sel(".pagenavix, .pagination");
    let current_selector = sel(".page-numbers.current");
    let page_selector = sel(".page-numbers:not(.prev):not(.next)");

    let mut current_page = None;
    let mut pages: Vec<u32> = Vec::new();

    for widget in root(document).select(&widget_selector) {
        if current_page.is_none() {
            current_page = widget
                .select(&current_selector)
                .next()
                .and_then(|e| parse_page_number(&e.text().collect::<String>()));
        }
        pages.extend(
            widget
                .select(&page_selector)
                .filter_map(|e| parse_page_number(&e.text().collect::<String>())),
        );
    }

    let current_page = current_page.unwrap_or(1);
    let total_pages = pages.into_iter().max().unwrap_or(1);

    build_pagination(current_page, total_pages, items_per_page)
}

/// Assemble the record so the has/prev/next fields agree with the page numbers
pub fn build_pagination(current_page: u32, total_pages: u32, items_per_page: u32) -> Pagination {
    let current_page = current_page.max(1);
    let total_pages = total_pages.max(1);
    let has_prev_page = current_page > 1;
    let has_next_page = current_page < total_pages;

    Pagination {
        current_page,
        total_pages,
        items_per_page,
        total_items: total_pages.checked_mul(items_per_page),
        has_prev_page,
        has_next_page,
        prev_page: has_prev_page.then(|| current_page - 1),
        next_page: has_next_page.then(|| current_page + 1),
    }
}

/// Leading integer of a label, like `parseInt`; non-positive values are rejected
pub fn parse_page_number(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Pagination {
        parse_pagination(&Html::parse_document(html), DEFAULT_ITEMS_PER_PAGE)
    }

    #[test]
    fn test_no_widget_defaults_to_single_page() {
        let p = parse("<html><body><p>nothing here</p></body></html>");
        assert_eq!(p.current_page, 1);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_prev_page);
        assert!(!p.has_next_page);
        assert_eq!(p.prev_page, None);
        assert_eq!(p.next_page, None);
        assert_eq!(p.total_items, Some(50));
    }

    #[test]
    fn test_pagenavix_widget() {
        let p = parse(
            r#"<div class="pagenavix">
                <a class="prev page-numbers" href="/page/2/">« Previous</a>
                <a class="page-numbers" href="/page/1/">1</a>
                <a class="page-numbers" href="/page/2/">2</a>
                <span class="page-numbers current">3</span>
                <a class="page-numbers" href="/page/4/">4</a>
                <span class="page-numbers dots">…</span>
                <a class="page-numbers" href="/page/38/">38</a>
                <a class="next page-numbers" href="/page/4/">Next »</a>
            </div>"#,
        );
        assert_eq!(p.current_page, 3);
        assert_eq!(p.total_pages, 38);
        assert_eq!(p.total_items, Some(38 * 50));
        assert!(p.has_prev_page);
        assert!(p.has_next_page);
        assert_eq!(p.prev_page, Some(2));
        assert_eq!(p.next_page, Some(4));
    }

    #[test]
    fn test_alternate_pagination_shape_on_last_page() {
        let p = parse(
            r#"<div class="pagination">
                <a class="page-numbers" href="/page/1/">1</a>
                <span class="page-numbers current">2</span>
            </div>"#,
        );
        assert_eq!(p.current_page, 2);
        assert_eq!(p.total_pages, 2);
        assert!(!p.has_next_page);
        assert_eq!(p.next_page, None);
        assert_eq!(p.prev_page, Some(1));
    }

    #[test]
    fn test_non_numeric_current_falls_back_to_one() {
        let p = parse(r#"<div class="pagenavix"><span class="page-numbers current">abc</span></div>"#);
        assert_eq!(p.current_page, 1);
        assert_eq!(p.total_pages, 1);
    }

    #[test]
    fn test_flags_follow_page_numbers() {
        for total in 1..6u32 {
            for current in 1..=total {
                let p = build_pagination(current, total, 20);
                assert_eq!(p.has_next_page, current < total);
                assert_eq!(p.next_page, if current < total { Some(current + 1) } else { None });
                assert_eq!(p.has_prev_page, current > 1);
                assert_eq!(p.prev_page, if current > 1 { Some(current - 1) } else { None });
            }
        }
    }
}
