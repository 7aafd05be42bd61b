use crate::types::Report;

/// Returns the first report whose feed id matches `feed_id`, ignoring ASCII
/// case. `None` is a normal outcome: the caller decides whether to skip.
///
/// When the same feed id appears more than once, the earliest entry wins.
pub fn find_report<'a>(reports: &'a [Report], feed_id: &str) -> Option<&'a Report> {
    reports
        .iter()
        .find(|report| report.feed_id.eq_ignore_ascii_case(feed_id))
}
