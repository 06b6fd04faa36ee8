//! Parallel XPath Computation
//!
//! Uses Rayon to resolve many offsets of one document concurrently. Each
//! query rescans the text on its own, so nothing is shared but the input.

use rayon::prelude::*;

use super::query::QueryContext;
use crate::path::PathSegment;

/// Compute the XPath at each offset in parallel, in input order
pub fn xpaths_parallel(ctx: &QueryContext<'_>, text: &str, offsets: &[usize]) -> Vec<Option<String>> {
    offsets
        .par_iter()
        .map(|&offset| ctx.xpath_at(text, offset))
        .collect()
}

/// Compute the segments at each offset in parallel, in input order
pub fn segments_parallel(ctx: &QueryContext<'_>, text: &str, offsets: &[usize]) -> Vec<Vec<PathSegment>> {
    offsets
        .par_iter()
        .map(|&offset| ctx.segments_at(text, offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::path::SkipSet;
    use crate::xpath::XPathFormat;

    const DOC: &str = "<root><a/><b><a/><a/></b><a/></root>";

    #[test]
    fn test_parallel_matches_sequential() {
        let settings = Settings::default();
        let ctx = QueryContext::new(&settings, Some(XPathFormat::Full), SkipSet::new()).unwrap();
        let offsets: Vec<usize> = (0..=DOC.len() + 1).collect();

        let parallel = xpaths_parallel(&ctx, DOC, &offsets);
        let sequential: Vec<_> = offsets.iter().map(|&o| ctx.xpath_at(DOC, o)).collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_parallel_results() {
        let settings = Settings::default();
        let ctx = QueryContext::new(&settings, Some(XPathFormat::Compact), SkipSet::new()).unwrap();
        let results = xpaths_parallel(&ctx, DOC, &[7, 18, 26, 100]);
        assert_eq!(
            results,
            vec![
                Some("/root/a".to_string()),
                Some("/root/b/a[2]".to_string()),
                Some("/root/a[2]".to_string()),
                None,
            ]
        );

        let segments = segments_parallel(&ctx, DOC, &[7, 100]);
        assert_eq!(segments[0], vec![PathSegment::new("root", 1), PathSegment::new("a", 1)]);
        assert!(segments[1].is_empty());
    }
}
