use std::collections::BTreeSet;
use std::fmt;

/// A maximal run of consecutive page numbers, 1-based and inclusive.
///
/// A single page is a run with `start == end`. Splitting produces one output
/// document per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRun {
    pub start: u32,
    pub end: u32,
}

impl PageRun {
    pub fn single(page: u32) -> Self {
        PageRun {
            start: page,
            end: page,
        }
    }

    /// The pages covered by this run, in ascending order.
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }

    /// Substitute this run into a name pattern, replacing the `{n}`
    /// placeholder with either the single page number or `start-end`.
    pub fn render(&self, pattern: &str) -> String {
        pattern.replace("{n}", &self.to_string())
    }
}

impl fmt::Display for PageRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Parse a page selection like "1-3,5,7-9" against a known page count.
///
/// Each comma-separated token is a single page number or a `start-end` range.
/// Tokens that do not parse, reversed ranges, and pages outside
/// `1..=total_pages` are dropped without raising; partial valid input still
/// yields a usable selection. The result is deduplicated and strictly
/// ascending. An empty result is the caller's cue that the user supplied no
/// valid pages.
pub fn parse(spec: &str, total_pages: u32) -> Vec<u32> {
    let mut pages = BTreeSet::new();

    for token in spec.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if let Some((lo, hi)) = token.split_once('-') {
            if let (Ok(start), Ok(end)) = (lo.trim().parse::<u32>(), hi.trim().parse::<u32>()) {
                if start >= 1 && end <= total_pages && start <= end {
                    pages.extend(start..=end);
                }
            }
        } else if let Ok(page) = token.parse::<u32>() {
            if page >= 1 && page <= total_pages {
                pages.insert(page);
            }
        }
    }

    pages.into_iter().collect()
}

/// Group an ascending, deduplicated selection into maximal consecutive runs.
///
/// Single forward pass: a page extends the current run when it is exactly one
/// past the run's end, otherwise it opens a new run. Adjacent runs in the
/// output are therefore never mergeable, and flattening the runs reproduces
/// the input exactly.
pub fn compact(pages: &[u32]) -> Vec<PageRun> {
    let mut runs = Vec::new();
    let mut iter = pages.iter().copied();

    let Some(first) = iter.next() else {
        return runs;
    };
    let mut run = PageRun::single(first);

    for page in iter {
        if page == run.end + 1 {
            run.end = page;
        } else {
            runs.push(run);
            run = PageRun::single(page);
        }
    }
    runs.push(run);

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_tokens() {
        assert_eq!(parse("1-3,5,7-9", 10), vec![1, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn test_parse_single_page() {
        assert_eq!(parse("5", 10), vec![5]);
    }

    #[test]
    fn test_parse_reversed_range_dropped() {
        assert_eq!(parse("3-1", 10), Vec::<u32>::new());
    }

    #[test]
    fn test_parse_out_of_bounds_dropped_not_clamped() {
        assert_eq!(parse("0,11", 10), Vec::<u32>::new());
        assert_eq!(parse("8-12", 10), Vec::<u32>::new());
    }

    #[test]
    fn test_parse_whitespace_and_degenerate_range() {
        assert_eq!(parse("  2 , 4-4 ", 10), vec![2, 4]);
    }

    #[test]
    fn test_parse_empty_and_comma_only() {
        assert_eq!(parse("", 10), Vec::<u32>::new());
        assert_eq!(parse("  ,, ,", 10), Vec::<u32>::new());
    }

    #[test]
    fn test_parse_garbage_tokens_dropped_valid_kept() {
        assert_eq!(parse("abc,2,x-y,4-6", 10), vec![2, 4, 5, 6]);
    }

    #[test]
    fn test_parse_overlapping_ranges_deduplicated() {
        assert_eq!(parse("1-5,3-7", 10), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(parse("2,2,2", 10), vec![2]);
    }

    #[test]
    fn test_parse_output_is_sorted_regardless_of_input_order() {
        assert_eq!(parse("9,1,5-6,3", 10), vec![1, 3, 5, 6, 9]);
    }

    #[test]
    fn test_compact_runs() {
        assert_eq!(
            compact(&[1, 2, 3, 5, 7, 8, 9]),
            vec![
                PageRun { start: 1, end: 3 },
                PageRun { start: 5, end: 5 },
                PageRun { start: 7, end: 9 },
            ]
        );
    }

    #[test]
    fn test_compact_empty() {
        assert_eq!(compact(&[]), Vec::<PageRun>::new());
    }

    #[test]
    fn test_compact_single_run() {
        assert_eq!(compact(&[4, 5, 6]), vec![PageRun { start: 4, end: 6 }]);
    }

    #[test]
    fn test_compact_all_isolated() {
        assert_eq!(
            compact(&[1, 3, 5]),
            vec![
                PageRun::single(1),
                PageRun::single(3),
                PageRun::single(5),
            ]
        );
    }

    #[test]
    fn test_compact_idempotent_over_reexpansion() {
        let runs = compact(&[1, 2, 3, 5, 7, 8, 9]);
        let flattened: Vec<u32> = runs.iter().flat_map(|r| r.pages()).collect();
        assert_eq!(flattened, vec![1, 2, 3, 5, 7, 8, 9]);
        assert_eq!(compact(&flattened), runs);
    }

    #[test]
    fn test_render_range_and_single() {
        assert_eq!(PageRun { start: 7, end: 9 }.render("part{n}"), "part7-9");
        assert_eq!(PageRun::single(5).render("part{n}"), "part5");
    }

    #[test]
    fn test_parse_then_compact() {
        let pages = parse("1-3,5,7-9", 10);
        let runs = compact(&pages);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].to_string(), "1-3");
        assert_eq!(runs[1].to_string(), "5");
        assert_eq!(runs[2].to_string(), "7-9");
    }
}
