//! Affiliate tag removal from the query string.

use url::Url;

/// Query parameter carrying the referral attribution.
pub const AFFILIATE_PARAM: &str = "tag";

/// Removes every `tag` pair, keeping the other pairs in order.
///
/// Returns `false` (and leaves `url` untouched) when there was no `tag`.
/// The remaining pairs are re-serialized as form-urlencoded; an emptied query
/// is dropped together with its `?`.
pub fn strip_affiliate_tag(url: &mut Url) -> bool {
    if !url.query_pairs().any(|(k, _)| k == AFFILIATE_PARAM) {
        return false;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .filter(|(k, _)| k != AFFILIATE_PARAM)
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    true
}
