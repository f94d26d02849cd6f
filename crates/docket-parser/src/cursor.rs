//! Cursor-to-declaration lookup over start-sorted records.

use docket_core::LineSpan;

/// The record whose `[start_line, end_line]` span contains `line`.
///
/// `items` must be sorted ascending by start line. Picks the rightmost record
/// starting at or before `line` and accepts it only if `line` is within its
/// end, so a line in a gap between records yields `None`.
pub fn locate_enclosing<T: LineSpan>(items: &[T], line: u32) -> Option<&T> {
    let first = items.first()?;
    let last = items.last()?;
    if line < first.start_line() || line > last.end_line() {
        return None;
    }

    let after = items.partition_point(|item| item.start_line() <= line);
    let candidate = &items[after.checked_sub(1)?];
    (line <= candidate.end_line()).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Span(u32, u32);

    impl LineSpan for Span {
        fn start_line(&self) -> u32 {
            self.0
        }

        fn end_line(&self) -> u32 {
            self.1
        }
    }

    fn spans() -> Vec<Span> {
        vec![Span(3, 6), Span(7, 7), Span(10, 14), Span(20, 25)]
    }

    #[rstest]
    #[case(0, None)]
    #[case(3, Some(0))]
    #[case(6, Some(0))]
    #[case(7, Some(1))]
    #[case(8, None)]
    #[case(9, None)]
    #[case(12, Some(2))]
    #[case(17, None)]
    #[case(25, Some(3))]
    #[case(26, None)]
    fn locates_enclosing_span(#[case] line: u32, #[case] expected: Option<usize>) {
        let items = spans();
        let found = locate_enclosing(&items, line);
        assert_eq!(found, expected.map(|index| &items[index]));
    }

    #[test]
    fn agrees_with_a_linear_scan() {
        let items = spans();
        for line in 0..30 {
            let linear = items
                .iter()
                .rfind(|span| span.0 <= line)
                .filter(|span| line <= span.1);
            assert_eq!(locate_enclosing(&items, line), linear, "line {line}");
        }
    }

    #[test]
    fn overlapping_spans_pick_the_rightmost_start() {
        let items = vec![Span(0, 30), Span(5, 8)];
        assert_eq!(locate_enclosing(&items, 6), Some(&items[1]));
        assert_eq!(locate_enclosing(&items, 12), None);
    }

    #[test]
    fn empty_list_has_no_match() {
        let items: Vec<Span> = Vec::new();
        assert_eq!(locate_enclosing(&items, 0), None);
    }
}
