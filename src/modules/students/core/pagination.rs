use serde::Serialize;

/// At or below this many pages every page number is shown.
const FULL_WINDOW: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// `ceil(total / page_size)`, never less than 1.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(page_size as u64).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn clamp_page(page: u32, total: u64, page_size: u32) -> u32 {
    page.clamp(1, total_pages(total, page_size))
}

pub fn page_window(current: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= FULL_WINDOW {
        return (1..=total_pages).map(PageItem::Page).collect();
    }
    let current = current.clamp(1, total_pages);
    let mut items = vec![PageItem::Page(1)];
    if current > 3 {
        items.push(PageItem::Ellipsis);
    }
    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total_pages - 1);
    items.extend((start..=end).map(PageItem::Page));
    if current < total_pages - 2 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total_pages));
    items
}

#[cfg(test)]
mod pagination_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(45, 20, 3)]
    #[case(40, 20, 2)]
    #[case(0, 20, 1)]
    #[case(1, 20, 1)]
    fn it_should_count_the_pages(#[case] total: u64, #[case] size: u32, #[case] expected: u32) {
        assert_eq!(total_pages(total, size), expected);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(2, 2)]
    #[case(9, 3)]
    fn it_should_clamp_the_page(#[case] page: u32, #[case] expected: u32) {
        assert_eq!(clamp_page(page, 45, 20), expected);
    }

    #[rstest]
    fn it_should_list_every_page_for_a_short_range() {
        assert_eq!(
            page_window(2, 4),
            vec![
                PageItem::Page(1),
                PageItem::Page(2),
                PageItem::Page(3),
                PageItem::Page(4)
            ]
        );
    }

    #[rstest]
    fn it_should_elide_around_the_current_page() {
        use PageItem::*;
        assert_eq!(
            page_window(6, 12),
            vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Ellipsis, Page(12)]
        );
        assert_eq!(page_window(1, 12), vec![Page(1), Page(2), Ellipsis, Page(12)]);
        assert_eq!(
            page_window(12, 12),
            vec![Page(1), Ellipsis, Page(11), Page(12)]
        );
    }
}
